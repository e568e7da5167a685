//! Property-based tests for stack transitions.
//!
//! These tests use proptest to drive random transition sequences through a
//! state machine and check them against a plain vector model of the stack.

use proptest::prelude::*;
use pushdown::automaton::{Automaton, StateMachine};
use pushdown::core::{Domain, State, StateType, TransitionResult};
use pushdown::resolver::Resolver;
use pushdown::{PushdownError, TransitionError};
use std::sync::Arc;

struct Steps;

impl Domain for Steps {
    type Data = u64;
    type Event = Op;
    type Tick = ();
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Push,
    Pop,
    Switch,
    Replace,
}

impl Op {
    fn transition_name(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pop => "pop",
            Self::Switch => "switch",
            Self::Replace => "replace",
        }
    }
}

#[derive(Debug, Default)]
struct Alpha {
    started_with: Option<u64>,
}

impl State<Steps> for Alpha {
    fn on_start(&mut self, data: Option<u64>) {
        self.started_with = data;
    }

    fn on_event(&mut self, op: &Op) -> TransitionResult<Steps> {
        TransitionResult::named(op.transition_name())
    }
}

#[derive(Debug, Default)]
struct Beta;

impl State<Steps> for Beta {
    fn on_event(&mut self, op: &Op) -> TransitionResult<Steps> {
        TransitionResult::named(op.transition_name())
    }
}

fn declare_all(state_type: StateType<Steps>) -> StateType<Steps> {
    state_type
        .declare_push("push", "beta")
        .declare_pop("pop")
        .declare_switch("switch", "alpha")
        .declare_replace("replace", "alpha")
}

fn machine() -> StateMachine<Steps> {
    let automaton = Automaton::<Steps>::builder()
        .state(declare_all(StateType::of::<Alpha>()))
        .state(declare_all(StateType::of::<Beta>()))
        .declare("steps", "alpha", Resolver::Inferred)
        .build()
        .unwrap();
    Arc::new(automaton).start().unwrap()
}

fn names(machine: &StateMachine<Steps>) -> Vec<String> {
    machine
        .stack("steps")
        .unwrap()
        .state_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

prop_compose! {
    fn arbitrary_op()(variant in 0..4u8) -> Op {
        match variant {
            0 => Op::Push,
            1 => Op::Pop,
            2 => Op::Switch,
            _ => Op::Replace,
        }
    }
}

proptest! {
    #[test]
    fn stack_matches_model_and_never_empties(
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut machine = machine();
        let mut model = vec!["Alpha".to_string()];

        for op in ops {
            let result = machine.handle_event("steps", &op);

            match op {
                Op::Push => model.push("Beta".to_string()),
                Op::Pop if model.len() == 1 => {
                    prop_assert_eq!(
                        result.as_ref().err(),
                        Some(&PushdownError::Transition(TransitionError::OnlyState))
                    );
                    prop_assert_eq!(names(&machine), model.clone());
                    continue;
                }
                Op::Pop => {
                    model.pop();
                }
                Op::Switch => {
                    if let Some(top) = model.last_mut() {
                        *top = "Alpha".to_string();
                    }
                }
                Op::Replace => model = vec!["Alpha".to_string()],
            }

            prop_assert!(result.is_ok());
            prop_assert!(machine.stack("steps").unwrap().len() >= 1);
            prop_assert_eq!(names(&machine), model.clone());
        }
    }

    #[test]
    fn push_then_pop_restores_stack(
        setup in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let mut machine = machine();
        for op in setup {
            let _ = machine.handle_event("steps", &op);
        }
        let before = names(&machine);

        machine.handle_event("steps", &Op::Push).unwrap();
        prop_assert_eq!(names(&machine).len(), before.len() + 1);

        machine.handle_event("steps", &Op::Pop).unwrap();
        prop_assert_eq!(names(&machine), before);
    }

    #[test]
    fn named_data_reaches_new_state(data in any::<u64>()) {
        let mut machine = machine();

        machine
            .apply("steps", TransitionResult::named_with("replace", data))
            .unwrap();

        let alpha = machine
            .current("steps")
            .and_then(|frame| frame.downcast_ref::<Alpha>());
        prop_assert_eq!(alpha.and_then(|a| a.started_with), Some(data));
    }
}
