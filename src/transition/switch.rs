//! Switch: replace only the current state.

use super::{TransitionError, TransitionKind};
use crate::core::{Domain, Frame, Stack, StateType};
use std::sync::Arc;
use tracing::debug;

/// Stops the current state and puts a new instance of `target` in its place.
/// States below the current one are untouched.
pub struct Switch<D: Domain> {
    name: String,
    target: Arc<StateType<D>>,
    pub(super) data: Option<D::Data>,
    switched_out: Option<String>,
}

impl<D: Domain> Switch<D> {
    pub fn new(name: impl Into<String>, target: Arc<StateType<D>>) -> Self {
        Self {
            name: name.into(),
            target,
            data: None,
            switched_out: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Arc<StateType<D>> {
        &self.target
    }

    /// Type name of the state that was replaced, once applied.
    pub fn switched_out(&self) -> Option<&str> {
        self.switched_out.as_deref()
    }

    pub fn apply(&mut self, stack: &mut Stack<D>) -> Result<(), TransitionError> {
        if stack.is_empty() {
            return Err(TransitionError::EmptyStack {
                kind: TransitionKind::Switch,
            });
        }

        let frame = Frame::new(Arc::clone(&self.target));
        let Some(mut old) = stack.pop() else {
            return Err(TransitionError::EmptyStack {
                kind: TransitionKind::Switch,
            });
        };

        debug!(
            transition = %self.name,
            from = %old.name(),
            to = %frame.name(),
            "switching current state with a new state"
        );
        let data = old.state_mut().on_stop(self.data.take());
        self.switched_out = Some(old.name().to_string());
        drop(old);

        stack.push(frame).state_mut().on_start(data);

        Ok(())
    }
}
