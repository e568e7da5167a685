//! State type descriptors and their declared transitions.

use super::naming::short_type_name;
use super::state::{Domain, State};
use crate::automaton::{Automaton, ConfigurationError};
use crate::transition::{Transition, TransitionKind};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Factory that constructs a fresh state instance.
pub type StateFactory<D> = Arc<dyn Fn() -> Box<dyn State<D>> + Send + Sync>;

/// A transition declared on a state type: its kind and, for every kind but
/// pop, the symbolic name of the state it targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredTransition {
    pub kind: TransitionKind,
    pub target: Option<String>,
}

/// Transition name -> declared transition.
pub type TransitionTable = HashMap<String, DeclaredTransition>;

/// A concrete kind of state: a stable name, a factory, and the type's own
/// table of declared transitions.
///
/// Tables belong to exactly one `StateType`; a type built from another
/// starts with an empty table.
///
/// # Example
///
/// ```rust
/// use pushdown::core::{Domain, State, StateType};
/// use pushdown::transition::TransitionKind;
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
/// struct Starting;
///
/// impl State<Engine> for Starting {}
///
/// let starting = StateType::<Engine>::of::<Starting>()
///     .declare_switch("started", "running")
///     .declare_pop("didnt_start");
///
/// assert_eq!(starting.name(), "Starting");
/// assert_eq!(starting.declared("didnt_start").map(|t| t.kind), Some(TransitionKind::Pop));
/// ```
pub struct StateType<D: Domain> {
    name: String,
    factory: StateFactory<D>,
    transitions: TransitionTable,
}

impl<D: Domain> StateType<D> {
    /// Create a state type from a name and a factory.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn State<D>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Arc::new(factory),
            transitions: TransitionTable::new(),
        }
    }

    /// Create a state type for `T`, named after the Rust type (`Starting` for
    /// `engine::Starting`) and constructed with `T::default()`.
    pub fn of<T>() -> Self
    where
        T: State<D> + Default + 'static,
    {
        Self::new(short_type_name(std::any::type_name::<T>()), || {
            Box::new(T::default()) as Box<dyn State<D>>
        })
    }

    /// Declare a push transition to the state named `target`.
    pub fn declare_push(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.declare(name, TransitionKind::Push, Some(target.into()))
    }

    /// Declare a pop transition.
    pub fn declare_pop(self, name: impl Into<String>) -> Self {
        self.declare(name, TransitionKind::Pop, None)
    }

    /// Declare a switch transition to the state named `target`.
    pub fn declare_switch(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.declare(name, TransitionKind::Switch, Some(target.into()))
    }

    /// Declare a replace transition to the state named `target`.
    pub fn declare_replace(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.declare(name, TransitionKind::Replace, Some(target.into()))
    }

    fn declare(
        mut self,
        name: impl Into<String>,
        kind: TransitionKind,
        target: Option<String>,
    ) -> Self {
        self.transitions
            .insert(name.into(), DeclaredTransition { kind, target });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All transitions declared on this type.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Look up a single declared transition.
    pub fn declared(&self, name: &str) -> Option<&DeclaredTransition> {
        self.transitions.get(name)
    }

    /// Construct a fresh instance of this state.
    pub fn instantiate(&self) -> Box<dyn State<D>> {
        (self.factory)()
    }

    /// Build the concrete transition declared as `name`, resolving its
    /// target through the resolver configured for `stack_name`.
    pub fn transition(
        &self,
        name: &str,
        automaton: &Automaton<D>,
        stack_name: &str,
    ) -> Result<Transition<D>, ConfigurationError> {
        let declared = self
            .transitions
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownTransition {
                state: self.name.clone(),
                transition: name.to_string(),
            })?;

        let target = declared
            .target
            .as_deref()
            .map(|target| automaton.resolve_state(stack_name, target))
            .transpose()?;

        Transition::create(declared.kind, name, target, None)
    }
}

impl<D: Domain> fmt::Debug for StateType<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateType")
            .field("name", &self.name)
            .field("transitions", &self.transitions)
            .finish()
    }
}
