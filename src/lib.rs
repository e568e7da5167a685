//! Pushdown: a pushdown automaton engine
//!
//! A pushdown automaton is a state machine whose active configuration is a
//! *stack* of states. A state can be paused beneath a newly pushed one and
//! resumed when that one is popped, which suits processes with nested,
//! interruptible phases such as workflow steps or engine modes.
//!
//! # Core Concepts
//!
//! - **State**: behavior with lifecycle callbacks (`on_start`, `on_stop`,
//!   `on_pause`, `on_resume`) and hooks (`on_event`, `update`) that ask for
//!   the next transition
//! - **StateType**: a named factory for a state plus its own table of
//!   declared transitions
//! - **Transition**: one of Push, Pop, Switch or Replace, applied atomically
//! - **Resolver**: maps symbolic state names to state types, by inference,
//!   a static table or an open registry
//! - **Automaton / StateMachine**: the declared stacks, and one host's live
//!   copy of them
//!
//! The engine never schedules anything itself. Callers drive `update` and
//! `shadow_update` from their own loop.
//!
//! # Example
//!
//! ```rust
//! use pushdown::automaton::Automaton;
//! use pushdown::core::{Domain, State, StateType, TransitionResult};
//! use pushdown::resolver::Resolver;
//! use std::sync::Arc;
//!
//! struct Engine;
//!
//! impl Domain for Engine {
//!     type Data = ();
//!     type Event = ();
//!     type Tick = bool;
//! }
//!
//! #[derive(Debug, Default)]
//! struct Off;
//!
//! impl State<Engine> for Off {
//!     fn update(&mut self, key_turned: &bool) -> TransitionResult<Engine> {
//!         if *key_turned {
//!             TransitionResult::named("start")
//!         } else {
//!             TransitionResult::NoTransition
//!         }
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Starting;
//!
//! impl State<Engine> for Starting {
//!     fn update(&mut self, _tick: &bool) -> TransitionResult<Engine> {
//!         TransitionResult::named("didnt_start")
//!     }
//! }
//!
//! let automaton = Automaton::<Engine>::builder()
//!     .state(StateType::<Engine>::of::<Off>().declare_push("start", "starting"))
//!     .state(StateType::<Engine>::of::<Starting>().declare_pop("didnt_start"))
//!     .declare("state", "off", Resolver::Inferred)
//!     .build()
//!     .unwrap();
//!
//! let mut car = Arc::new(automaton).start().unwrap();
//!
//! car.update("state", &true).unwrap();
//! assert_eq!(car.stack("state").unwrap().state_names(), vec!["Off", "Starting"]);
//!
//! car.update("state", &false).unwrap();
//! assert_eq!(car.stack("state").unwrap().state_names(), vec!["Off"]);
//! ```

pub mod automaton;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod resolver;
pub mod transition;

// Re-export commonly used types
pub use automaton::{Automaton, AutomatonBuilder, ConfigurationError, StateMachine};
pub use crate::core::{Domain, State, StateType, TransitionResult};
pub use error::PushdownError;
pub use resolver::Resolver;
pub use transition::{Transition, TransitionError, TransitionKind};
