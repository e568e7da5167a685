//! The state stack.

use super::state::{Domain, State};
use super::state_type::StateType;
use std::fmt;
use std::sync::Arc;

/// One entry on a stack: a live state and the type it was built from.
pub struct Frame<D: Domain> {
    state: Box<dyn State<D>>,
    state_type: Arc<StateType<D>>,
}

impl<D: Domain> Frame<D> {
    /// Construct a fresh instance of `state_type`.
    pub(crate) fn new(state_type: Arc<StateType<D>>) -> Self {
        Self {
            state: state_type.instantiate(),
            state_type,
        }
    }

    pub fn state(&self) -> &dyn State<D> {
        &*self.state
    }

    pub fn state_mut(&mut self) -> &mut dyn State<D> {
        &mut *self.state
    }

    pub fn state_type(&self) -> &Arc<StateType<D>> {
        &self.state_type
    }

    /// Name of the state type this entry was built from.
    pub fn name(&self) -> &str {
        self.state_type.name()
    }

    /// Check whether the live state is a `T`.
    pub fn is<T: State<D>>(&self) -> bool {
        self.state().as_any().is::<T>()
    }

    pub fn downcast_ref<T: State<D>>(&self) -> Option<&T> {
        self.state().as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: State<D>>(&mut self) -> Option<&mut T> {
        self.state_mut().as_any_mut().downcast_mut::<T>()
    }
}

impl<D: Domain> fmt::Debug for Frame<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("type", &self.name())
            .field("state", &self.state)
            .finish()
    }
}

/// An ordered stack of states. The last entry is the current state.
///
/// Outside a transition's `apply`, a stack owned by a `StateMachine` always
/// holds at least one state. Transitions are the only way to change it.
pub struct Stack<D: Domain> {
    frames: Vec<Frame<D>>,
}

impl<D: Domain> Stack<D> {
    /// Create an empty stack, ready for an initial push.
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The current (topmost) state.
    pub fn current(&self) -> Option<&Frame<D>> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Frame<D>> {
        self.frames.last_mut()
    }

    /// Type of the current state.
    pub fn current_type(&self) -> Option<&Arc<StateType<D>>> {
        self.current().map(Frame::state_type)
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Frame<D>> {
        self.frames.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Frame<D>> {
        self.frames.iter_mut()
    }

    /// State type names, bottom to top.
    pub fn state_names(&self) -> Vec<&str> {
        self.frames.iter().map(Frame::name).collect()
    }

    /// Push a frame and return it as the new current entry.
    pub(crate) fn push(&mut self, frame: Frame<D>) -> &mut Frame<D> {
        self.frames.push(frame);
        let top = self.frames.len() - 1;
        &mut self.frames[top]
    }

    pub(crate) fn pop(&mut self) -> Option<Frame<D>> {
        self.frames.pop()
    }
}

impl<D: Domain> Default for Stack<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> fmt::Debug for Stack<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.state_names()).finish()
    }
}
