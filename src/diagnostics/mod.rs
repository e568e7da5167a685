//! Diagnostic trace of stack mutations.
//!
//! A `StateMachine` reports every applied transition and every failed
//! dispatch to the automaton's `DiagnosticSink`. The default sink discards
//! everything; `RecordingSink` keeps an ordered, serializable log.

use crate::core::{Domain, Stack};
use crate::transition::Transition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

/// What happened to a stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Pushed {
        transition: String,
        state: String,
    },
    Popped {
        transition: String,
        state: String,
        resumed: Option<String>,
    },
    Switched {
        transition: String,
        from: String,
        to: String,
    },
    Replaced {
        transition: String,
        drained: Vec<String>,
        state: String,
    },
    Failed {
        transition: Option<String>,
        error: String,
    },
}

impl TraceEvent {
    /// Describe `transition` after it has been applied to `stack`.
    pub fn applied<D: Domain>(transition: &Transition<D>, stack: &Stack<D>) -> Self {
        let transition_name = transition.name().to_string();
        let current = stack.current().map(|frame| frame.name().to_string());

        match transition {
            Transition::Push(push) => Self::Pushed {
                transition: transition_name,
                state: push.target().name().to_string(),
            },
            Transition::Pop(pop) => Self::Popped {
                transition: transition_name,
                state: pop.popped().unwrap_or_default().to_string(),
                resumed: current,
            },
            Transition::Switch(switch) => Self::Switched {
                transition: transition_name,
                from: switch.switched_out().unwrap_or_default().to_string(),
                to: switch.target().name().to_string(),
            },
            Transition::Replace(replace) => Self::Replaced {
                transition: transition_name,
                drained: replace.drained().to_vec(),
                state: replace.target().name().to_string(),
            },
        }
    }

    /// The state this event left current, if it changed.
    pub fn became_current(&self) -> Option<&str> {
        match self {
            Self::Pushed { state, .. } | Self::Replaced { state, .. } => Some(state),
            Self::Popped { resumed, .. } => resumed.as_deref(),
            Self::Switched { to, .. } => Some(to),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A trace event stamped with where and when it happened.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceRecord {
    /// The `StateMachine` instance that produced the event
    pub machine: Uuid,
    /// Name of the stack that changed
    pub stack: String,
    pub event: TraceEvent,
    pub timestamp: DateTime<Utc>,
}

impl TraceRecord {
    pub fn new(machine: Uuid, stack: impl Into<String>, event: TraceEvent) -> Self {
        Self {
            machine,
            stack: stack.into(),
            event,
            timestamp: Utc::now(),
        }
    }
}

/// Receives trace records from state machines.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, record: TraceRecord);
}

/// Discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn record(&self, _record: TraceRecord) {}
}

/// Keeps every record in arrival order.
///
/// # Example
///
/// ```rust
/// use pushdown::diagnostics::{DiagnosticSink, RecordingSink, TraceEvent, TraceRecord};
/// use uuid::Uuid;
///
/// let sink = RecordingSink::new();
/// sink.record(TraceRecord::new(
///     Uuid::new_v4(),
///     "state",
///     TraceEvent::Pushed {
///         transition: "start".to_string(),
///         state: "Starting".to_string(),
///     },
/// ));
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.path("state"), vec!["Starting".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<TraceRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of every record so far.
    pub fn records(&self) -> Vec<TraceRecord> {
        self.lock().clone()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().iter().map(|r| r.event.clone()).collect()
    }

    /// Records for one stack, in order.
    pub fn for_stack(&self, stack: &str) -> Vec<TraceRecord> {
        self.lock()
            .iter()
            .filter(|r| r.stack == stack)
            .cloned()
            .collect()
    }

    /// The sequence of states that became current on `stack`.
    pub fn path(&self, stack: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|r| r.stack == stack)
            .filter_map(|r| r.event.became_current().map(str::to_string))
            .collect()
    }

    pub fn failures(&self) -> Vec<TraceRecord> {
        self.lock()
            .iter()
            .filter(|r| r.event.is_failure())
            .cloned()
            .collect()
    }

    /// Time between the first and last record, if any.
    pub fn duration(&self) -> Option<Duration> {
        let records = self.lock();
        let (first, last) = (records.first()?, records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Export the log as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TraceRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, record: TraceRecord) {
        self.lock().push(record);
    }
}
