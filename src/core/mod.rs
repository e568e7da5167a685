//! Core pushdown automaton types.
//!
//! This module contains the building blocks the rest of the crate works on:
//! - The `Domain` binding and the `State` trait with its lifecycle callbacks
//! - `StateType` descriptors carrying each type's declared transitions
//! - The `Stack` of live states

mod naming;
mod stack;
mod state;
mod state_type;

pub use naming::{engine_phrase, pascal_case, short_type_name};
pub use stack::{Frame, Stack};
pub use state::{AsAny, Domain, State, TransitionResult};
pub use state_type::{DeclaredTransition, StateFactory, StateType, TransitionTable};
