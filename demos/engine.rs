//! Engine Pushdown Automaton
//!
//! This demo drives a car engine through its states from an external tick
//! loop.
//!
//! Key concepts:
//! - Declared push, pop, switch and replace transitions
//! - Event dispatch and update ticks
//! - Named per-stack methods on a host via `pushdown_methods!`
//! - Tracing output and a recorded diagnostic trace
//!
//! Run with: RUST_LOG=pushdown=debug cargo run --example engine

use pushdown::automaton::{Automaton, StateMachine};
use pushdown::core::{Domain, State, StateType, TransitionResult};
use pushdown::diagnostics::RecordingSink;
use pushdown::pushdown_methods;
use pushdown::resolver::Resolver;
use std::sync::Arc;
use std::time::Duration;
use stillwater::validation::Validation;
use tracing_subscriber::EnvFilter;

struct Engine;

#[derive(Clone, Copy, Debug)]
enum Command {
    Start,
    Stop,
}

struct Tick {
    elapsed: Duration,
    catches: bool,
}

impl Domain for Engine {
    type Data = ();
    type Event = Command;
    type Tick = Tick;
}

#[derive(Debug, Default)]
struct Off;

impl State<Engine> for Off {
    fn on_event(&mut self, event: &Command) -> TransitionResult<Engine> {
        match event {
            Command::Start => TransitionResult::named("start"),
            Command::Stop => TransitionResult::NoTransition,
        }
    }
}

#[derive(Debug, Default)]
struct Starting {
    cranking: Duration,
}

impl State<Engine> for Starting {
    fn update(&mut self, tick: &Tick) -> TransitionResult<Engine> {
        self.cranking += tick.elapsed;
        if tick.catches {
            TransitionResult::named("started")
        } else if self.cranking > Duration::from_secs(5) {
            TransitionResult::named("didnt_start")
        } else {
            TransitionResult::NoTransition
        }
    }
}

#[derive(Debug, Default)]
struct Running;

impl State<Engine> for Running {
    fn on_event(&mut self, event: &Command) -> TransitionResult<Engine> {
        match event {
            Command::Stop => TransitionResult::named("stop"),
            Command::Start => TransitionResult::NoTransition,
        }
    }
}

struct Car {
    name: &'static str,
    engine: StateMachine<Engine>,
}

pushdown_methods! {
    impl Car {
        engine: Engine;
        "state" => {
            current: current_state,
            stack: state_stack,
            event: handle_state_event,
            update: update_state,
            shadow_update: shadow_update_state,
        }
    }
}

impl Car {
    fn describe(&self) -> String {
        let state = self
            .current_state()
            .map(|frame| frame.state().description())
            .unwrap_or_default();
        let stack = self
            .state_stack()
            .map(|stack| stack.state_names())
            .unwrap_or_default();
        format!("{} is {} {:?}", self.name, state, stack)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pushdown=info".parse()?))
        .init();

    println!("=== Engine Pushdown Automaton ===\n");

    let sink = Arc::new(RecordingSink::new());
    let automaton = Automaton::<Engine>::builder()
        .state(StateType::<Engine>::of::<Off>().declare_push("start", "starting"))
        .state(
            StateType::<Engine>::of::<Starting>()
                .declare_switch("started", "running")
                .declare_pop("didnt_start"),
        )
        .state(StateType::<Engine>::of::<Running>().declare_replace("stop", "off"))
        .declare("state", "off", Resolver::Inferred)
        .sink(Arc::clone(&sink))
        .build()?;

    if let Validation::Failure(errors) = automaton.validate() {
        for error in errors.iter() {
            println!("configuration error: {}", error);
        }
        return Ok(());
    }
    let automaton = Arc::new(automaton);

    // The first car catches on its third tick; the second never does.
    for (name, catches_on) in [("sedan", Some(3)), ("wreck", None)] {
        let mut car = Car {
            name,
            engine: automaton.start()?,
        };
        println!("{}", car.describe());

        car.handle_state_event(&Command::Start)?;
        println!("{}", car.describe());

        for tick in 1..=10 {
            let tick = Tick {
                elapsed: Duration::from_secs(1),
                catches: Some(tick) == catches_on,
            };
            car.shadow_update_state(&tick)?;
            if let Some(transition) = car.update_state(&tick)? {
                println!("  -> {} ({})", transition.name(), transition.kind());
                println!("{}", car.describe());
                break;
            }
        }

        car.handle_state_event(&Command::Stop)?;
        println!("{}\n", car.describe());
    }

    println!("Trace for all cars:");
    println!("{}", sink.to_json()?);

    Ok(())
}
