//! Core State trait for pushdown automaton states.
//!
//! A state is a unit of behavior that lives on a stack. The automaton calls
//! its lifecycle callbacks as it is pushed, paused, resumed and stopped, and
//! its behavior hooks when events and update ticks arrive.

use super::naming::{engine_phrase, short_type_name};
use crate::transition::Transition;
use std::any::Any;
use std::fmt::{self, Debug};

/// Binds the types a family of states works with.
///
/// One marker type per host ties together the payload threaded through
/// lifecycle callbacks, the events delivered to `on_event`, and the argument
/// passed to `update` and `shadow_update`.
///
/// # Example
///
/// ```rust
/// use pushdown::core::Domain;
///
/// struct Engine;
///
/// impl Domain for Engine {
///     type Data = String;
///     type Event = &'static str;
///     type Tick = std::time::Duration;
/// }
/// ```
pub trait Domain: 'static {
    /// Payload handed from one state's callbacks to the next
    type Data;
    /// Events delivered to the current state
    type Event;
    /// Argument of the interval callbacks
    type Tick;
}

/// Object-safe access to a state as `Any`, for downcasting stack entries.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// What a behavior hook asks the automaton to do next.
pub enum TransitionResult<D: Domain> {
    /// Leave the stack alone
    NoTransition,

    /// A transition declared in the current state's type table
    Named {
        name: String,
        data: Option<D::Data>,
    },

    /// A fully-formed transition, bypassing the table
    Explicit(Transition<D>),
}

impl<D: Domain> TransitionResult<D> {
    /// Request the declared transition called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            data: None,
        }
    }

    /// Request the declared transition called `name`, carrying `data` into it.
    pub fn named_with(name: impl Into<String>, data: D::Data) -> Self {
        Self::Named {
            name: name.into(),
            data: Some(data),
        }
    }

    pub fn is_transition(&self) -> bool {
        !matches!(self, Self::NoTransition)
    }
}

impl<D: Domain> Default for TransitionResult<D> {
    fn default() -> Self {
        Self::NoTransition
    }
}

impl<D: Domain> From<Transition<D>> for TransitionResult<D> {
    fn from(transition: Transition<D>) -> Self {
        Self::Explicit(transition)
    }
}

impl<D: Domain> Debug for TransitionResult<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransition => f.write_str("NoTransition"),
            Self::Named { name, data } => f
                .debug_struct("Named")
                .field("name", name)
                .field("has_data", &data.is_some())
                .finish(),
            Self::Explicit(transition) => f.debug_tuple("Explicit").field(transition).finish(),
        }
    }
}

/// Trait for pushdown automaton states.
///
/// Every callback has a no-op default. `on_stop` and `on_pause` hand the
/// data they receive back unchanged unless overridden; whatever they return
/// is what the next callback in the transition receives.
///
/// # Example
///
/// ```rust
/// use pushdown::core::{Domain, State, TransitionResult};
///
/// struct Engine;
///
/// impl Domain for Engine {
///     type Data = ();
///     type Event = &'static str;
///     type Tick = ();
/// }
///
/// #[derive(Debug, Default)]
/// struct Off;
///
/// impl State<Engine> for Off {
///     fn on_event(&mut self, event: &&'static str) -> TransitionResult<Engine> {
///         match *event {
///             "start" => TransitionResult::named("start"),
///             _ => TransitionResult::NoTransition,
///         }
///     }
/// }
///
/// assert_eq!(Off.description(), "off");
/// ```
pub trait State<D: Domain>: AsAny + Debug {
    /// Called when the state is added to the stack.
    fn on_start(&mut self, _data: Option<D::Data>) {}

    /// Called when the state is removed from the stack.
    fn on_stop(&mut self, data: Option<D::Data>) -> Option<D::Data> {
        data
    }

    /// Called when another state is pushed over this one.
    fn on_pause(&mut self, data: Option<D::Data>) -> Option<D::Data> {
        data
    }

    /// Called when the state above this one is popped, making it current again.
    fn on_resume(&mut self, _data: Option<D::Data>) {}

    /// Called with each event while this state is current.
    fn on_event(&mut self, _event: &D::Event) -> TransitionResult<D> {
        TransitionResult::NoTransition
    }

    /// Interval callback, called while this state is current.
    fn update(&mut self, _tick: &D::Tick) -> TransitionResult<D> {
        TransitionResult::NoTransition
    }

    /// Interval callback, called on every state on the stack.
    fn shadow_update(&mut self, _tick: &D::Tick) {}

    /// Describe the state as a short phrase, e.g. `"starting up"` for `StartingUp`.
    fn description(&self) -> String {
        engine_phrase(short_type_name(std::any::type_name::<Self>()))
    }
}
