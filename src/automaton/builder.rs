//! Builder for declaring automata.

use crate::automaton::error::ConfigurationError;
use crate::automaton::host::Automaton;
use crate::core::{Domain, StateType};
use crate::diagnostics::{DiagnosticSink, NoopSink};
use crate::resolver::{Namespace, Resolver};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Factory for the data handed to a stack's initial state.
pub type InitialData<D> = Arc<dyn Fn() -> <D as Domain>::Data + Send + Sync>;

/// Declaration of one named stack.
pub struct StackDeclaration<D: Domain> {
    name: String,
    initial: Option<String>,
    resolver: Resolver<D>,
    initial_data: Option<InitialData<D>>,
}

impl<D: Domain> StackDeclaration<D> {
    /// Declare a stack called `name`, resolving state names by inference
    /// unless another resolver is given.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            resolver: Resolver::Inferred,
            initial_data: None,
        }
    }

    /// Set the symbolic name of the initial state (required).
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial = Some(state.into());
        self
    }

    pub fn resolver(mut self, resolver: Resolver<D>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Hand the value built by `factory` to the initial state's `on_start`.
    pub fn initial_data<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> D::Data + Send + Sync + 'static,
    {
        self.initial_data = Some(Arc::new(factory));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    pub fn resolver_ref(&self) -> &Resolver<D> {
        &self.resolver
    }

    pub(crate) fn make_initial_data(&self) -> Option<D::Data> {
        self.initial_data.as_ref().map(|factory| factory())
    }
}

impl<D: Domain> fmt::Debug for StackDeclaration<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackDeclaration")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("resolver", &self.resolver)
            .field("initial_data", &self.initial_data.is_some())
            .finish()
    }
}

/// Builder for declaring an automaton with a fluent API.
///
/// # Example
///
/// ```rust
/// use pushdown::automaton::AutomatonBuilder;
/// use pushdown::core::{Domain, State, StateType};
/// use pushdown::resolver::Resolver;
///
/// struct Engine;
///
/// impl Domain for Engine {
///     type Data = ();
///     type Event = ();
///     type Tick = ();
/// }
///
/// #[derive(Debug, Default)]
/// struct Off;
///
/// impl State<Engine> for Off {}
///
/// let automaton = AutomatonBuilder::<Engine>::new()
///     .state(StateType::<Engine>::of::<Off>())
///     .declare("state", "off", Resolver::Inferred)
///     .build()
///     .unwrap();
///
/// assert_eq!(automaton.stack_names().collect::<Vec<_>>(), vec!["state"]);
/// ```
pub struct AutomatonBuilder<D: Domain> {
    namespace: Namespace<D>,
    stacks: Vec<StackDeclaration<D>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl<D: Domain> AutomatonBuilder<D> {
    pub fn new() -> Self {
        Self {
            namespace: Namespace::new(),
            stacks: Vec::new(),
            sink: None,
        }
    }

    /// Register a state type in the namespace used by inferred resolution.
    pub fn state(mut self, state_type: impl Into<Arc<StateType<D>>>) -> Self {
        let state_type = state_type.into();
        self.namespace
            .insert(state_type.name().to_string(), state_type);
        self
    }

    /// Register several state types at once.
    pub fn states<I>(mut self, state_types: I) -> Self
    where
        I: IntoIterator<Item = Arc<StateType<D>>>,
    {
        for state_type in state_types {
            self = self.state(state_type);
        }
        self
    }

    /// Declare a stack called `name` starting in `initial_state`.
    pub fn declare(
        self,
        name: impl Into<String>,
        initial_state: impl Into<String>,
        resolver: Resolver<D>,
    ) -> Self {
        self.stack(
            StackDeclaration::new(name)
                .initial(initial_state)
                .resolver(resolver),
        )
    }

    /// Add a fully configured stack declaration.
    pub fn stack(mut self, declaration: StackDeclaration<D>) -> Self {
        self.stacks.push(declaration);
        self
    }

    /// Send trace records to `sink`.
    pub fn sink<S>(mut self, sink: Arc<S>) -> Self
    where
        S: DiagnosticSink + 'static,
    {
        let sink: Arc<dyn DiagnosticSink> = sink;
        self.sink = Some(sink);
        self
    }

    /// Build the automaton.
    /// Returns an error if a stack lacks an initial state or is declared twice.
    pub fn build(self) -> Result<Automaton<D>, ConfigurationError> {
        let mut seen = HashSet::new();
        for declaration in &self.stacks {
            if declaration.initial.is_none() {
                return Err(ConfigurationError::MissingInitialState {
                    stack: declaration.name.clone(),
                });
            }
            if !seen.insert(declaration.name.as_str()) {
                return Err(ConfigurationError::DuplicateStack {
                    name: declaration.name.clone(),
                });
            }
        }

        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(NoopSink) as Arc<dyn DiagnosticSink>);
        Ok(Automaton::new(self.namespace, self.stacks, sink))
    }
}

impl<D: Domain> Default for AutomatonBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
