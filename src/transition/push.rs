//! Push: suspend the current state and add a new one above it.

use super::TransitionError;
use crate::core::{Domain, Frame, Stack, StateType};
use std::sync::Arc;
use tracing::debug;

/// Pushes a new instance of `target` onto the stack.
///
/// The current state (if any) is paused with the transition's data; whatever
/// `on_pause` returns is what the new state's `on_start` receives.
pub struct Push<D: Domain> {
    name: String,
    target: Arc<StateType<D>>,
    pub(super) data: Option<D::Data>,
}

impl<D: Domain> Push<D> {
    pub fn new(name: impl Into<String>, target: Arc<StateType<D>>) -> Self {
        Self {
            name: name.into(),
            target,
            data: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Arc<StateType<D>> {
        &self.target
    }

    pub fn apply(&mut self, stack: &mut Stack<D>) -> Result<(), TransitionError> {
        let frame = Frame::new(Arc::clone(&self.target));
        debug!(transition = %self.name, state = %frame.name(), "pushing a new state");

        let mut data = self.data.take();
        if let Some(current) = stack.current_mut() {
            data = current.state_mut().on_pause(data);
        }

        stack.push(frame).state_mut().on_start(data);

        Ok(())
    }
}
