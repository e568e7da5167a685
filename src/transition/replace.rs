//! Replace: clear the whole stack and install a single new state.

use super::TransitionError;
use crate::core::{Domain, Frame, Stack, StateType};
use std::sync::Arc;
use tracing::debug;

/// Drains the stack top to bottom, then pushes a new instance of `target`.
///
/// Each drained state's `on_stop` receives what the previous one returned;
/// the final value goes to the new state's `on_start`.
pub struct Replace<D: Domain> {
    name: String,
    target: Arc<StateType<D>>,
    pub(super) data: Option<D::Data>,
    drained: Vec<String>,
}

impl<D: Domain> Replace<D> {
    pub fn new(name: impl Into<String>, target: Arc<StateType<D>>) -> Self {
        Self {
            name: name.into(),
            target,
            data: None,
            drained: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Arc<StateType<D>> {
        &self.target
    }

    /// Type names of the states that were stopped, top first, once applied.
    pub fn drained(&self) -> &[String] {
        &self.drained
    }

    pub fn apply(&mut self, stack: &mut Stack<D>) -> Result<(), TransitionError> {
        let frame = Frame::new(Arc::clone(&self.target));
        debug!(
            transition = %self.name,
            state = %frame.name(),
            depth = stack.len(),
            "replacing the stack with a new state"
        );

        let mut data = self.data.take();
        while let Some(mut old) = stack.pop() {
            data = old.state_mut().on_stop(data);
            self.drained.push(old.name().to_string());
        }

        stack.push(frame).state_mut().on_start(data);

        Ok(())
    }
}
