//! The declared automaton shared by every host instance.

use crate::automaton::builder::{AutomatonBuilder, StackDeclaration};
use crate::automaton::error::ConfigurationError;
use crate::automaton::machine::StateMachine;
use crate::core::{Domain, Stack, StateType};
use crate::diagnostics::{DiagnosticSink, TraceEvent, TraceRecord};
use crate::error::PushdownError;
use crate::resolver::Namespace;
use crate::transition::Transition;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Declared stacks, their resolvers, and the registered state types.
///
/// An automaton is immutable once built. Share it behind an `Arc` and call
/// [`Automaton::start`] once per host to get that host's [`StateMachine`].
pub struct Automaton<D: Domain> {
    namespace: Namespace<D>,
    stacks: Vec<StackDeclaration<D>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<D: Domain> Automaton<D> {
    pub(crate) fn new(
        namespace: Namespace<D>,
        stacks: Vec<StackDeclaration<D>>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            namespace,
            stacks,
            sink,
        }
    }

    pub fn builder() -> AutomatonBuilder<D> {
        AutomatonBuilder::new()
    }

    /// Declared stack names, in declaration order.
    pub fn stack_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.stacks.iter().map(StackDeclaration::name)
    }

    pub fn declaration(&self, stack: &str) -> Result<&StackDeclaration<D>, ConfigurationError> {
        self.stacks
            .iter()
            .find(|declaration| declaration.name() == stack)
            .ok_or_else(|| ConfigurationError::UnknownStack {
                name: stack.to_string(),
            })
    }

    /// A registered state type, by type name.
    pub fn state_type(&self, name: &str) -> Option<&Arc<StateType<D>>> {
        self.namespace.get(name)
    }

    /// Resolve a symbolic state name with the resolver declared for `stack`.
    pub fn resolve_state(
        &self,
        stack: &str,
        name: &str,
    ) -> Result<Arc<StateType<D>>, ConfigurationError> {
        self.declaration(stack)?
            .resolver_ref()
            .resolve(name, &self.namespace)
    }

    /// The state type `stack` starts in.
    pub fn initial_state(&self, stack: &str) -> Result<Arc<StateType<D>>, ConfigurationError> {
        let declaration = self.declaration(stack)?;
        let initial = declaration.initial_state().ok_or_else(|| {
            ConfigurationError::MissingInitialState {
                stack: stack.to_string(),
            }
        })?;
        declaration.resolver_ref().resolve(initial, &self.namespace)
    }

    pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
        &self.sink
    }

    /// Build a state machine with every declared stack holding its initial
    /// state.
    pub fn start(self: &Arc<Self>) -> Result<StateMachine<D>, PushdownError> {
        self.start_with(|_| None)
    }

    /// Like [`Automaton::start`], but `initial_data` may supply the data for
    /// each stack's initial `on_start`. Returning `None` falls back to the
    /// stack's declared initial data, if any.
    pub fn start_with<F>(
        self: &Arc<Self>,
        mut initial_data: F,
    ) -> Result<StateMachine<D>, PushdownError>
    where
        F: FnMut(&str) -> Option<D::Data>,
    {
        let id = Uuid::new_v4();
        let mut stacks = HashMap::with_capacity(self.stacks.len());

        for declaration in &self.stacks {
            let name = declaration.name();
            let state_type = self.initial_state(name)?;

            let mut push = Transition::push("initial", state_type);
            if let Some(data) = initial_data(name).or_else(|| declaration.make_initial_data()) {
                push = push.with_data(data);
            }

            let mut stack = Stack::new();
            push.apply(&mut stack)?;

            info!(
                machine = %id,
                stack = %name,
                state = ?stack.current().map(|frame| frame.name()),
                "pushed initial state"
            );
            self.sink.record(TraceRecord::new(
                id,
                name,
                TraceEvent::applied(&push, &stack),
            ));

            stacks.insert(name.to_string(), stack);
        }

        Ok(StateMachine::new(id, Arc::clone(self), stacks))
    }
}

impl<D: Domain> fmt::Debug for Automaton<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&String> = self.namespace.keys().collect();
        states.sort();
        f.debug_struct("Automaton")
            .field("stacks", &self.stacks)
            .field("states", &states)
            .finish()
    }
}
