//! Configuration errors for automaton declarations and state resolution.

use crate::transition::TransitionKind;
use thiserror::Error;

/// Programmer or configuration defects. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("No pushdown stack named '{name}'")]
    UnknownStack { name: String },

    #[error("Stack '{name}' is declared more than once")]
    DuplicateStack { name: String },

    #[error("Initial state not specified for stack '{stack}'. Call .initial(state) before .build()")]
    MissingInitialState { stack: String },

    #[error("State '{state}' declares no transition named '{transition}'")]
    UnknownTransition { state: String, transition: String },

    #[error("No state type found for '{name}' using the {resolver} resolver")]
    UnresolvedState {
        name: String,
        resolver: &'static str,
    },

    #[error("A {kind} transition requires a target state")]
    MissingTarget { kind: TransitionKind },
}
