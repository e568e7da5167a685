//! Errors surfaced by dispatch operations.

use crate::automaton::ConfigurationError;
use crate::transition::TransitionError;
use thiserror::Error;

/// Any error a dispatch can return.
///
/// Either way the stack is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushdownError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl PushdownError {
    /// Structural transition errors are recoverable: the caller may pick a
    /// different transition. Configuration errors are defects and are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transition(_))
    }
}
