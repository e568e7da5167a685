//! Resolution of symbolic state names to state types.
//!
//! Each declared stack picks one strategy when it is declared:
//!
//! - **Inferred**: `starting_up` becomes `StartingUp` and is looked up in
//!   the automaton's namespace of registered state types
//! - **Table**: a fixed symbol -> type map
//! - **Registry**: delegate to an open `StateRegistry`, which can gain
//!   entries after the automaton is built
//!
//! All three fail with `ConfigurationError::UnresolvedState` for an unknown
//! name.

mod registry;

pub use registry::{PluginRegistry, StateRegistry};

use crate::automaton::ConfigurationError;
use crate::core::{pascal_case, Domain, StateType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// State types registered on an automaton, keyed by type name.
pub type Namespace<D> = HashMap<String, Arc<StateType<D>>>;

/// Strategy for resolving a symbolic state name.
pub enum Resolver<D: Domain> {
    Inferred,
    Table(HashMap<String, Arc<StateType<D>>>),
    Registry(Arc<dyn StateRegistry<D>>),
}

impl<D: Domain> Resolver<D> {
    /// Build a static table resolver.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pushdown::core::{Domain, State, StateType};
    /// use pushdown::resolver::Resolver;
    /// use std::sync::Arc;
    ///
    /// struct Payments;
    ///
    /// impl Domain for Payments {
    ///     type Data = ();
    ///     type Event = ();
    ///     type Tick = ();
    /// }
    ///
    /// #[derive(Debug, Default)]
    /// struct Created;
    ///
    /// impl State<Payments> for Created {}
    ///
    /// let created = Arc::new(StateType::<Payments>::of::<Created>());
    /// let resolver = Resolver::table([("created", created)]);
    /// assert_eq!(resolver.mode(), "table");
    /// ```
    pub fn table<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Arc<StateType<D>>)>,
        K: Into<String>,
    {
        Self::Table(
            entries
                .into_iter()
                .map(|(key, state_type)| (key.into(), state_type))
                .collect(),
        )
    }

    /// Delegate resolution to `registry`.
    pub fn registry<R>(registry: Arc<R>) -> Self
    where
        R: StateRegistry<D> + 'static,
    {
        Self::Registry(registry)
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Inferred => "inferred",
            Self::Table(_) => "table",
            Self::Registry(_) => "registry",
        }
    }

    /// Resolve `name` to a state type. `namespace` is only consulted by the
    /// inferred strategy.
    pub fn resolve(
        &self,
        name: &str,
        namespace: &Namespace<D>,
    ) -> Result<Arc<StateType<D>>, ConfigurationError> {
        let resolved = match self {
            Self::Inferred => namespace.get(&pascal_case(name)).cloned(),
            Self::Table(table) => table.get(name).cloned(),
            Self::Registry(registry) => registry.resolve(name),
        };

        resolved.ok_or_else(|| ConfigurationError::UnresolvedState {
            name: name.to_string(),
            resolver: self.mode(),
        })
    }
}

impl<D: Domain> Default for Resolver<D> {
    fn default() -> Self {
        Self::Inferred
    }
}

impl<D: Domain> fmt::Debug for Resolver<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inferred => f.write_str("Inferred"),
            Self::Table(table) => {
                let mut keys: Vec<&String> = table.keys().collect();
                keys.sort();
                f.debug_tuple("Table").field(&keys).finish()
            }
            Self::Registry(_) => f.write_str("Registry"),
        }
    }
}
