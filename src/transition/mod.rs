//! Stack transitions.
//!
//! A `Transition` is a single-use value that performs exactly one stack
//! mutation. The set of variants is closed:
//!
//! - **Push**: pause the current state and add a new one above it
//! - **Pop**: remove the current state and resume the one below
//! - **Switch**: replace only the current state
//! - **Replace**: stop every state and install a single new one
//!
//! Every `apply` checks its preconditions before it touches the stack or
//! fires a callback, so a failed apply leaves the stack as it was.

mod pop;
mod push;
mod replace;
mod switch;

pub use pop::Pop;
pub use push::Push;
pub use replace::Replace;
pub use switch::Switch;

use crate::automaton::ConfigurationError;
use crate::core::{Domain, Stack, StateType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The four kinds of stack transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Push,
    Pop,
    Switch,
    Replace,
}

impl TransitionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Switch => "switch",
            Self::Replace => "replace",
        }
    }

    /// Whether transitions of this kind install a target state.
    pub fn takes_target(&self) -> bool {
        !matches!(self, Self::Pop)
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Structural violations detected before a transition mutates the stack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("can't {kind} from an empty stack")]
    EmptyStack { kind: TransitionKind },

    #[error("can't pop the only state on the stack")]
    OnlyState,
}

/// A single stack mutation.
pub enum Transition<D: Domain> {
    Push(Push<D>),
    Pop(Pop<D>),
    Switch(Switch<D>),
    Replace(Replace<D>),
}

impl<D: Domain> Transition<D> {
    pub fn push(name: impl Into<String>, target: Arc<StateType<D>>) -> Self {
        Self::Push(Push::new(name, target))
    }

    pub fn pop(name: impl Into<String>) -> Self {
        Self::Pop(Pop::new(name))
    }

    pub fn switch(name: impl Into<String>, target: Arc<StateType<D>>) -> Self {
        Self::Switch(Switch::new(name, target))
    }

    pub fn replace(name: impl Into<String>, target: Arc<StateType<D>>) -> Self {
        Self::Replace(Replace::new(name, target))
    }

    /// Build a transition of the given kind.
    ///
    /// Fails if `kind` installs a state and no `target` is given. A target
    /// passed to a pop is ignored.
    pub fn create(
        kind: TransitionKind,
        name: impl Into<String>,
        target: Option<Arc<StateType<D>>>,
        data: Option<D::Data>,
    ) -> Result<Self, ConfigurationError> {
        let transition = match (kind, target) {
            (TransitionKind::Pop, _) => Self::pop(name),
            (TransitionKind::Push, Some(target)) => Self::push(name, target),
            (TransitionKind::Switch, Some(target)) => Self::switch(name, target),
            (TransitionKind::Replace, Some(target)) => Self::replace(name, target),
            (kind, None) => return Err(ConfigurationError::MissingTarget { kind }),
        };

        Ok(match data {
            Some(data) => transition.with_data(data),
            None => transition,
        })
    }

    /// Attach a payload to thread through the transition's callbacks.
    pub fn with_data(mut self, data: D::Data) -> Self {
        *self.data_slot() = Some(data);
        self
    }

    /// Diagnostic name; never drives dispatch.
    pub fn name(&self) -> &str {
        match self {
            Self::Push(t) => t.name(),
            Self::Pop(t) => t.name(),
            Self::Switch(t) => t.name(),
            Self::Replace(t) => t.name(),
        }
    }

    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Push(_) => TransitionKind::Push,
            Self::Pop(_) => TransitionKind::Pop,
            Self::Switch(_) => TransitionKind::Switch,
            Self::Replace(_) => TransitionKind::Replace,
        }
    }

    /// The state type this transition installs, if any.
    pub fn target(&self) -> Option<&Arc<StateType<D>>> {
        match self {
            Self::Push(t) => Some(t.target()),
            Self::Pop(_) => None,
            Self::Switch(t) => Some(t.target()),
            Self::Replace(t) => Some(t.target()),
        }
    }

    /// The payload still held by the transition. `apply` consumes it.
    pub fn data(&self) -> Option<&D::Data> {
        match self {
            Self::Push(t) => t.data.as_ref(),
            Self::Pop(t) => t.data.as_ref(),
            Self::Switch(t) => t.data.as_ref(),
            Self::Replace(t) => t.data.as_ref(),
        }
    }

    fn data_slot(&mut self) -> &mut Option<D::Data> {
        match self {
            Self::Push(t) => &mut t.data,
            Self::Pop(t) => &mut t.data,
            Self::Switch(t) => &mut t.data,
            Self::Replace(t) => &mut t.data,
        }
    }

    /// Apply the transition to `stack`.
    pub fn apply(&mut self, stack: &mut Stack<D>) -> Result<(), TransitionError> {
        match self {
            Self::Push(t) => t.apply(stack),
            Self::Pop(t) => t.apply(stack),
            Self::Switch(t) => t.apply(stack),
            Self::Replace(t) => t.apply(stack),
        }
    }
}

impl<D: Domain> fmt::Debug for Transition<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Transition");
        out.field("kind", &self.kind()).field("name", &self.name());
        if let Some(target) = self.target() {
            out.field("target", &target.name());
        }
        out.field("has_data", &self.data().is_some()).finish()
    }
}
