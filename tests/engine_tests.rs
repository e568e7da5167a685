//! Scenario tests: a small engine automaton driven through its lifecycle.

use pushdown::automaton::{Automaton, StackDeclaration, StateMachine};
use pushdown::core::{Domain, State, StateType, TransitionResult};
use pushdown::diagnostics::{RecordingSink, TraceEvent};
use pushdown::resolver::{PluginRegistry, Resolver};
use pushdown::{ConfigurationError, PushdownError, Transition, TransitionError, TransitionKind};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Engine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Start,
    Stop,
    Stall,
}

/// One tick of the external loop.
struct Tick {
    elapsed: Duration,
    caught: bool,
}

impl Domain for Engine {
    type Data = String;
    type Event = Command;
    type Tick = Tick;
}

#[derive(Debug, Default)]
struct Off;

impl State<Engine> for Off {
    fn on_event(&mut self, event: &Command) -> TransitionResult<Engine> {
        match event {
            Command::Start => TransitionResult::named("start"),
            Command::Stall => TransitionResult::named("stall"),
            Command::Stop => TransitionResult::NoTransition,
        }
    }

    fn update(&mut self, tick: &Tick) -> TransitionResult<Engine> {
        if tick.caught {
            TransitionResult::named("start")
        } else {
            TransitionResult::NoTransition
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
        if tick.caught {
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
            _ => TransitionResult::NoTransition,
        }
    }
}

fn engine_types() -> Vec<Arc<StateType<Engine>>> {
    vec![
        Arc::new(
            StateType::<Engine>::of::<Off>()
                .declare_push("start", "starting")
                .declare_pop("stall"),
        ),
        Arc::new(
            StateType::<Engine>::of::<Starting>()
                .declare_switch("started", "running")
                .declare_pop("didnt_start"),
        ),
        Arc::new(StateType::<Engine>::of::<Running>().declare_replace("stop", "off")),
    ]
}

fn engine_with_sink(sink: Arc<RecordingSink>) -> StateMachine<Engine> {
    let automaton = Automaton::builder()
        .states(engine_types())
        .declare("state", "off", Resolver::Inferred)
        .sink(sink)
        .build()
        .unwrap();
    Arc::new(automaton).start().unwrap()
}

fn engine() -> StateMachine<Engine> {
    engine_with_sink(Arc::new(RecordingSink::new()))
}

fn tick(secs: u64) -> Tick {
    Tick {
        elapsed: Duration::from_secs(secs),
        caught: false,
    }
}

fn names(machine: &StateMachine<Engine>) -> Vec<&str> {
    machine.stack("state").unwrap().state_names()
}

#[test]
fn engine_that_does_not_start_returns_to_off() {
    let mut engine = engine();
    assert_eq!(names(&engine), vec!["Off"]);

    let started = engine
        .update(
            "state",
            &Tick {
                elapsed: Duration::ZERO,
                caught: true,
            },
        )
        .unwrap();
    assert_eq!(started.map(|t| t.kind()), Some(TransitionKind::Push));
    assert_eq!(names(&engine), vec!["Off", "Starting"]);

    assert!(engine.update("state", &tick(3)).unwrap().is_none());
    assert_eq!(names(&engine), vec!["Off", "Starting"]);

    let gave_up = engine.update("state", &tick(3)).unwrap().unwrap();
    assert_eq!(gave_up.name(), "didnt_start");
    assert_eq!(names(&engine), vec!["Off"]);
}

#[test]
fn engine_that_starts_switches_to_running_then_stops() {
    let mut engine = engine();

    engine.handle_event("state", &Command::Start).unwrap();
    engine
        .update(
            "state",
            &Tick {
                elapsed: Duration::from_secs(1),
                caught: true,
            },
        )
        .unwrap();
    assert_eq!(names(&engine), vec!["Off", "Running"]);

    let stopped = engine.handle_event("state", &Command::Stop).unwrap().unwrap();
    assert_eq!(stopped.kind(), TransitionKind::Replace);
    assert_eq!(names(&engine), vec!["Off"]);
}

#[test]
fn pop_on_fresh_machine_fails_and_keeps_state() {
    let mut engine = engine();

    let error = engine.handle_event("state", &Command::Stall).unwrap_err();

    assert_eq!(error, PushdownError::Transition(TransitionError::OnlyState));
    assert_eq!(names(&engine), vec!["Off"]);
    assert!(engine.current("state").unwrap().is::<Off>());
}

#[test]
fn no_transition_is_idempotent() {
    let mut engine = engine();

    for _ in 0..3 {
        assert!(engine.handle_event("state", &Command::Stop).unwrap().is_none());
        assert!(engine.update("state", &tick(1)).unwrap().is_none());
    }

    assert_eq!(names(&engine), vec!["Off"]);
}

#[test]
fn shadow_update_leaves_stack_alone() {
    let mut engine = engine();
    engine.handle_event("state", &Command::Start).unwrap();

    engine.shadow_update("state", &tick(60)).unwrap();

    assert_eq!(names(&engine), vec!["Off", "Starting"]);
}

#[test]
fn trace_follows_the_engine() {
    let sink = Arc::new(RecordingSink::new());
    let mut engine = engine_with_sink(Arc::clone(&sink));

    engine.handle_event("state", &Command::Start).unwrap();
    engine.update("state", &tick(6)).unwrap();
    let _ = engine.handle_event("state", &Command::Stall);

    assert_eq!(sink.path("state"), vec!["Off", "Starting", "Off"]);
    assert_eq!(
        sink.failures()[0].event,
        TraceEvent::Failed {
            transition: Some("stall".to_string()),
            error: "can't pop the only state on the stack".to_string(),
        }
    );

    let json = sink.to_json().unwrap();
    assert!(json.contains("\"didnt_start\""));
}

// Data threading

#[derive(Debug)]
struct Threaded {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl Threaded {
    fn note(&self, callback: &str, data: &Option<String>) {
        self.log.lock().unwrap().push(format!(
            "{}.{}({})",
            self.label,
            callback,
            data.as_deref().unwrap_or("-")
        ));
    }
}

impl State<Engine> for Threaded {
    fn on_start(&mut self, data: Option<String>) {
        self.note("on_start", &data);
    }

    fn on_stop(&mut self, data: Option<String>) -> Option<String> {
        self.note("on_stop", &data);
        data.map(|d| format!("{}>{}", d, self.label))
    }

    fn on_pause(&mut self, data: Option<String>) -> Option<String> {
        self.note("on_pause", &data);
        Some(format!("paused-{}", self.label))
    }

    fn on_event(&mut self, _event: &Command) -> TransitionResult<Engine> {
        TransitionResult::named("deeper")
    }
}

fn threaded_machine(log: &Arc<Mutex<Vec<String>>>) -> StateMachine<Engine> {
    let types = ["a", "b", "c", "x"].map(|label| {
        let log = Arc::clone(log);
        StateType::new(label.to_uppercase(), move || {
            Box::new(Threaded {
                label,
                log: Arc::clone(&log),
            }) as Box<dyn State<Engine>>
        })
    });
    let [a, b, c, x] = types;

    let automaton = Automaton::builder()
        .state(a.declare_push("deeper", "b"))
        .state(b.declare_push("deeper", "c"))
        .state(c)
        .state(x)
        .declare("state", "a", Resolver::Inferred)
        .build()
        .unwrap();
    Arc::new(automaton).start().unwrap()
}

#[test]
fn push_hands_paused_data_to_new_state() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut machine = threaded_machine(&log);

    machine
        .apply("state", TransitionResult::named_with("deeper", "D".to_string()))
        .unwrap();

    let calls = log.lock().unwrap().clone();
    assert_eq!(calls, vec!["a.on_start(-)", "a.on_pause(D)", "b.on_start(paused-a)"]);
}

#[test]
fn replace_drains_top_to_bottom() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut machine = threaded_machine(&log);
    machine.handle_event("state", &Command::Start).unwrap();
    machine.handle_event("state", &Command::Start).unwrap();
    assert_eq!(names(&machine), vec!["A", "B", "C"]);
    log.lock().unwrap().clear();

    let x = machine.automaton().resolve_state("state", "x").unwrap();
    machine
        .apply(
            "state",
            Transition::replace("reset", x)
                .with_data("D".to_string())
                .into(),
        )
        .unwrap();

    let calls = log.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            "c.on_stop(D)",
            "b.on_stop(D>c)",
            "a.on_stop(D>c>b)",
            "x.on_start(D>c>b>a)",
        ]
    );
    assert_eq!(names(&machine), vec!["X"]);
}

// Resolver modes

#[test]
fn table_resolver_maps_symbols_to_types() {
    let running = Arc::new(StateType::<Engine>::of::<Running>().declare_replace("stop", "idle"));
    let off = Arc::new(StateType::<Engine>::of::<Off>().declare_push("start", "engine_on"));
    let automaton = Automaton::builder()
        .declare(
            "state",
            "idle",
            Resolver::table([("idle", off), ("engine_on", running)]),
        )
        .build()
        .unwrap();
    let mut engine = Arc::new(automaton).start().unwrap();

    engine.handle_event("state", &Command::Start).unwrap();
    assert_eq!(names(&engine), vec!["Off", "Running"]);

    engine.handle_event("state", &Command::Stop).unwrap();
    assert_eq!(names(&engine), vec!["Off"]);
}

#[test]
fn registry_resolver_sees_late_registrations() {
    let registry = Arc::new(PluginRegistry::<Engine>::new());
    registry.register("off", StateType::<Engine>::of::<Off>().declare_push("start", "starting"));
    let automaton = Arc::new(
        Automaton::builder()
            .declare("state", "off", Resolver::registry(Arc::clone(&registry)))
            .build()
            .unwrap(),
    );
    let mut engine = automaton.start().unwrap();

    let error = engine.handle_event("state", &Command::Start).unwrap_err();
    assert!(matches!(
        error,
        PushdownError::Configuration(ConfigurationError::UnresolvedState {
            resolver: "registry",
            ..
        })
    ));
    assert_eq!(names(&engine), vec!["Off"]);

    registry.register("starting", StateType::<Engine>::of::<Starting>());
    engine.handle_event("state", &Command::Start).unwrap();
    assert_eq!(names(&engine), vec!["Off", "Starting"]);
}

#[test]
fn stacks_resolve_independently() {
    let automaton = Automaton::builder()
        .states(engine_types())
        .declare("state", "off", Resolver::Inferred)
        .stack(
            StackDeclaration::new("backup")
                .initial("spare")
                .resolver(Resolver::table([(
                    "spare",
                    Arc::new(StateType::<Engine>::of::<Running>()),
                )]))
                .initial_data(|| "fuel".to_string()),
        )
        .build()
        .unwrap();
    let automaton = Arc::new(automaton);
    let engine = automaton.start().unwrap();

    assert_eq!(engine.stack_names().collect::<Vec<_>>(), vec!["state", "backup"]);
    assert!(engine.current("backup").unwrap().is::<Running>());
    assert!(automaton.resolve_state("backup", "off").is_err());
    assert!(automaton.validate().is_success());
}
