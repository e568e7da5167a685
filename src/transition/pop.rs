//! Pop: remove the current state and resume the one below it.

use super::{TransitionError, TransitionKind};
use crate::core::{Domain, Stack};
use tracing::debug;

/// Pops the current state off the stack.
///
/// Refuses to pop the last state. The popped state is stopped with the
/// transition's data, and what `on_stop` returns goes to the new current
/// state's `on_resume`.
pub struct Pop<D: Domain> {
    name: String,
    pub(super) data: Option<D::Data>,
    popped: Option<String>,
}

impl<D: Domain> Pop<D> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
            popped: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name of the state that was popped, once applied.
    pub fn popped(&self) -> Option<&str> {
        self.popped.as_deref()
    }

    pub fn apply(&mut self, stack: &mut Stack<D>) -> Result<(), TransitionError> {
        if stack.len() == 1 {
            return Err(TransitionError::OnlyState);
        }
        let Some(mut popped) = stack.pop() else {
            return Err(TransitionError::EmptyStack {
                kind: TransitionKind::Pop,
            });
        };

        debug!(transition = %self.name, state = %popped.name(), "popping a state");
        let data = popped.state_mut().on_stop(self.data.take());
        self.popped = Some(popped.name().to_string());
        drop(popped);

        if let Some(current) = stack.current_mut() {
            current.state_mut().on_resume(data);
        }

        Ok(())
    }
}
