//! Per-host state machine: the stacks and their dispatch operations.

use crate::automaton::error::ConfigurationError;
use crate::automaton::host::Automaton;
use crate::core::{Domain, Frame, Stack, TransitionResult};
use crate::diagnostics::{TraceEvent, TraceRecord};
use crate::error::PushdownError;
use crate::transition::Transition;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// The live stacks of one host, built by [`Automaton::start`].
///
/// Every stack holds at least one state between dispatch calls. A dispatch
/// either applies exactly one transition or fails and leaves the stack as it
/// was.
pub struct StateMachine<D: Domain> {
    id: Uuid,
    automaton: Arc<Automaton<D>>,
    stacks: HashMap<String, Stack<D>>,
}

impl<D: Domain> StateMachine<D> {
    pub(crate) fn new(
        id: Uuid,
        automaton: Arc<Automaton<D>>,
        stacks: HashMap<String, Stack<D>>,
    ) -> Self {
        Self {
            id,
            automaton,
            stacks,
        }
    }

    /// Identifies this machine in trace records.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn automaton(&self) -> &Arc<Automaton<D>> {
        &self.automaton
    }

    /// Stack names, in declaration order.
    pub fn stack_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.automaton.stack_names()
    }

    pub fn stack(&self, name: &str) -> Option<&Stack<D>> {
        self.stacks.get(name)
    }

    /// The current state of the stack called `name`.
    pub fn current(&self, name: &str) -> Option<&Frame<D>> {
        self.stack(name).and_then(Stack::current)
    }

    /// Mutable access to the current state, for hosts that poke at state
    /// fields between dispatches.
    pub fn current_mut(&mut self, name: &str) -> Option<&mut Frame<D>> {
        self.stacks.get_mut(name).and_then(Stack::current_mut)
    }

    /// Deliver `event` to the current state of `name` and apply whatever
    /// transition it asks for.
    ///
    /// Returns the applied transition, or `None` if the state asked for none.
    pub fn handle_event(
        &mut self,
        name: &str,
        event: &D::Event,
    ) -> Result<Option<Transition<D>>, PushdownError> {
        let result = match self.current_for_dispatch(name) {
            Ok(frame) => frame.state_mut().on_event(event),
            Err(error) => return Err(self.failed(name, None, error.into())),
        };
        self.apply(name, result)
    }

    /// Call `update` on the current state of `name` and apply whatever
    /// transition it asks for.
    pub fn update(
        &mut self,
        name: &str,
        tick: &D::Tick,
    ) -> Result<Option<Transition<D>>, PushdownError> {
        let result = match self.current_for_dispatch(name) {
            Ok(frame) => frame.state_mut().update(tick),
            Err(error) => return Err(self.failed(name, None, error.into())),
        };
        self.apply(name, result)
    }

    /// Call `shadow_update` on every state of `name`, bottom to top.
    pub fn shadow_update(&mut self, name: &str, tick: &D::Tick) -> Result<(), PushdownError> {
        let stack = self
            .stacks
            .get_mut(name)
            .ok_or_else(|| ConfigurationError::UnknownStack {
                name: name.to_string(),
            })?;

        for frame in stack.iter_mut() {
            frame.state_mut().shadow_update(tick);
        }
        Ok(())
    }

    /// Apply a transition result to the stack called `name`, as if the
    /// current state had returned it.
    pub fn apply(
        &mut self,
        name: &str,
        result: TransitionResult<D>,
    ) -> Result<Option<Transition<D>>, PushdownError> {
        let requested = match &result {
            TransitionResult::NoTransition => None,
            TransitionResult::Named { name, .. } => Some(name.clone()),
            TransitionResult::Explicit(transition) => Some(transition.name().to_string()),
        };

        self.try_apply(name, result)
            .map_err(|error| self.failed(name, requested, error))
    }

    fn try_apply(
        &mut self,
        name: &str,
        result: TransitionResult<D>,
    ) -> Result<Option<Transition<D>>, PushdownError> {
        let stack = self
            .stacks
            .get_mut(name)
            .ok_or_else(|| ConfigurationError::UnknownStack {
                name: name.to_string(),
            })?;

        let mut transition = match result {
            TransitionResult::NoTransition => return Ok(None),
            TransitionResult::Named {
                name: transition,
                data,
            } => {
                let state_type = stack.current_type().ok_or_else(|| {
                    ConfigurationError::UnknownTransition {
                        state: String::new(),
                        transition: transition.clone(),
                    }
                })?;
                let built = state_type.transition(&transition, &self.automaton, name)?;
                match data {
                    Some(data) => built.with_data(data),
                    None => built,
                }
            }
            TransitionResult::Explicit(transition) => transition,
        };

        transition.apply(stack)?;

        debug!(
            machine = %self.id,
            stack = %name,
            transition = %transition.name(),
            kind = %transition.kind(),
            depth = stack.len(),
            "applied transition"
        );
        self.automaton.sink().record(TraceRecord::new(
            self.id,
            name,
            TraceEvent::applied(&transition, stack),
        ));

        Ok(Some(transition))
    }

    fn current_for_dispatch(&mut self, name: &str) -> Result<&mut Frame<D>, ConfigurationError> {
        self.stacks
            .get_mut(name)
            .and_then(Stack::current_mut)
            .ok_or_else(|| ConfigurationError::UnknownStack {
                name: name.to_string(),
            })
    }

    fn failed(
        &self,
        name: &str,
        transition: Option<String>,
        error: PushdownError,
    ) -> PushdownError {
        warn!(
            machine = %self.id,
            stack = %name,
            transition = ?transition,
            error = %error,
            "dispatch failed"
        );
        self.automaton.sink().record(TraceRecord::new(
            self.id,
            name,
            TraceEvent::Failed {
                transition,
                error: error.to_string(),
            },
        ));
        error
    }
}

impl<D: Domain> fmt::Debug for StateMachine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("StateMachine");
        out.field("id", &self.id);
        for name in self.automaton.stack_names() {
            if let Some(stack) = self.stacks.get(name) {
                out.field(name, stack);
            }
        }
        out.finish()
    }
}
