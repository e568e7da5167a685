//! Pluggable state registries.

use crate::core::{Domain, StateType};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// An open source of state types, consulted by `Resolver::Registry`.
pub trait StateRegistry<D: Domain>: Send + Sync {
    /// Look up the state type registered under `name`.
    fn resolve(&self, name: &str) -> Option<Arc<StateType<D>>>;
}

/// A registry that accepts new state types at any time, so plugins can add
/// states to an automaton without touching its declaration.
///
/// # Example
///
/// ```rust
/// use pushdown::core::{Domain, State, StateType};
/// use pushdown::resolver::{PluginRegistry, StateRegistry};
///
/// struct Jobs;
///
/// impl Domain for Jobs {
///     type Data = ();
///     type Event = ();
///     type Tick = ();
/// }
///
/// #[derive(Debug, Default)]
/// struct Queued;
///
/// impl State<Jobs> for Queued {}
///
/// let registry = PluginRegistry::<Jobs>::new();
/// registry.register("queued", StateType::<Jobs>::of::<Queued>());
///
/// assert!(registry.resolve("queued").is_some());
/// assert!(registry.resolve("running").is_none());
/// ```
pub struct PluginRegistry<D: Domain> {
    types: RwLock<HashMap<String, Arc<StateType<D>>>>,
}

impl<D: Domain> PluginRegistry<D> {
    pub fn new() -> Self {
        Self {
            types: RwLock::new(HashMap::new()),
        }
    }

    /// Register `state_type` under `name`, replacing any earlier entry.
    pub fn register(
        &self,
        name: impl Into<String>,
        state_type: impl Into<Arc<StateType<D>>>,
    ) -> Option<Arc<StateType<D>>> {
        self.types
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), state_type.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<D: Domain> Default for PluginRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Domain> StateRegistry<D> for PluginRegistry<D> {
    fn resolve(&self, name: &str) -> Option<Arc<StateType<D>>> {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
