//! Whole-automaton configuration checks.
//!
//! Resolution normally fails lazily, the first time a dispatch needs a
//! missing state. `validate` walks every state reachable from each stack's
//! initial state and reports every name that cannot be resolved, all at once.

use crate::automaton::error::ConfigurationError;
use crate::automaton::host::Automaton;
use crate::core::Domain;
use std::collections::{HashSet, VecDeque};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl<D: Domain> Automaton<D> {
    /// Check every declared stack, accumulating ALL configuration errors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pushdown::automaton::Automaton;
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
    /// let automaton = Automaton::<Engine>::builder()
    ///     .state(StateType::<Engine>::of::<Off>().declare_push("start", "starting"))
    ///     .declare("state", "off", Resolver::Inferred)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(automaton.validate().is_failure());
    /// ```
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigurationError>> {
        let checks: Vec<Validation<(), NonEmptyVec<ConfigurationError>>> = self
            .stack_names()
            .flat_map(|stack| self.check_stack(stack))
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_stack(&self, stack: &str) -> Vec<Validation<(), NonEmptyVec<ConfigurationError>>> {
        let mut checks = Vec::new();

        let initial = match self.initial_state(stack) {
            Ok(state_type) => state_type,
            Err(error) => {
                checks.push(Validation::fail(error));
                return checks;
            }
        };

        let mut visited = HashSet::from([initial.name().to_string()]);
        let mut reported = HashSet::new();
        let mut queue = VecDeque::from([initial]);

        while let Some(state_type) = queue.pop_front() {
            let mut targets: Vec<&str> = state_type
                .transitions()
                .values()
                .filter_map(|declared| declared.target.as_deref())
                .collect();
            targets.sort_unstable();
            targets.dedup();

            for target in targets {
                match self.resolve_state(stack, target) {
                    Ok(next) => {
                        if visited.insert(next.name().to_string()) {
                            queue.push_back(next);
                        }
                    }
                    Err(error) => {
                        if reported.insert(target.to_string()) {
                            checks.push(Validation::fail(error));
                        }
                    }
                }
            }
        }

        if checks.is_empty() {
            checks.push(Validation::success(()));
        }
        checks
    }
}
