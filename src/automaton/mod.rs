//! Automaton declaration and per-host state machines.
//!
//! An `Automaton` is declared once with `AutomatonBuilder`: the state types
//! it knows, and for each named stack its initial state and how symbolic
//! state names resolve. Each host then calls `Automaton::start` to get its
//! own `StateMachine`, which owns the live stacks and dispatches events and
//! update ticks to their current states.
//!
//! # Example
//!
//! ```rust
//! use pushdown::automaton::Automaton;
//! use pushdown::core::{Domain, State, StateType, TransitionResult};
//! use pushdown::resolver::Resolver;
//! use std::sync::Arc;
//!
//! struct Workflow;
//!
//! impl Domain for Workflow {
//!     type Data = ();
//!     type Event = &'static str;
//!     type Tick = ();
//! }
//!
//! #[derive(Debug, Default)]
//! struct Drafting;
//!
//! impl State<Workflow> for Drafting {
//!     fn on_event(&mut self, event: &&'static str) -> TransitionResult<Workflow> {
//!         match *event {
//!             "review" => TransitionResult::named("review"),
//!             _ => TransitionResult::NoTransition,
//!         }
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct InReview;
//!
//! impl State<Workflow> for InReview {}
//!
//! let automaton = Automaton::<Workflow>::builder()
//!     .state(StateType::<Workflow>::of::<Drafting>().declare_push("review", "in_review"))
//!     .state(StateType::<Workflow>::of::<InReview>())
//!     .declare("document", "drafting", Resolver::Inferred)
//!     .build()
//!     .unwrap();
//!
//! let mut machine = Arc::new(automaton).start().unwrap();
//! machine.handle_event("document", &"review").unwrap();
//!
//! assert_eq!(
//!     machine.stack("document").unwrap().state_names(),
//!     vec!["Drafting", "InReview"]
//! );
//! ```

pub mod builder;
pub mod error;
pub mod host;
pub mod machine;
pub mod macros;
mod validate;

pub use builder::{AutomatonBuilder, InitialData, StackDeclaration};
pub use error::ConfigurationError;
pub use host::Automaton;
pub use machine::StateMachine;
