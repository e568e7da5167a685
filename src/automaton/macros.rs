//! Macros for giving a host named per-stack methods.

/// Generate named accessor and dispatch methods on a host that owns a
/// [`StateMachine`](crate::automaton::StateMachine).
///
/// For each listed stack this produces a current-state accessor, a raw-stack
/// accessor, and event, update and shadow-update dispatchers, all forwarding
/// to the machine with the stack's name filled in.
///
/// # Example
///
/// ```
/// use pushdown::automaton::{Automaton, StateMachine};
/// use pushdown::core::{Domain, State, StateType};
/// use pushdown::pushdown_methods;
/// use pushdown::resolver::Resolver;
/// use std::sync::Arc;
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
/// impl State<Engine> for Off {}
///
/// struct Car {
///     machine: StateMachine<Engine>,
/// }
///
/// pushdown_methods! {
///     impl Car {
///         machine: Engine;
///         "state" => {
///             current: current_state,
///             stack: state_stack,
///             event: handle_state_event,
///             update: update_state,
///             shadow_update: shadow_update_state,
///         }
///     }
/// }
///
/// let automaton = Arc::new(
///     Automaton::<Engine>::builder()
///         .state(StateType::<Engine>::of::<Off>())
///         .declare("state", "off", Resolver::Inferred)
///         .build()
///         .unwrap(),
/// );
/// let mut car = Car { machine: automaton.start().unwrap() };
///
/// assert!(car.current_state().unwrap().is::<Off>());
/// assert!(car.handle_state_event(&"honk").unwrap().is_none());
/// ```
#[macro_export]
macro_rules! pushdown_methods {
    (
        impl $host:ty {
            $field:ident : $domain:ty;
            $(
                $stack:literal => {
                    current: $current:ident,
                    stack: $raw:ident,
                    event: $event:ident,
                    update: $update:ident,
                    shadow_update: $shadow:ident $(,)?
                }
            ),* $(,)?
        }
    ) => {
        impl $host {
            $(
                #[allow(dead_code)]
                pub fn $current(&self) -> Option<&$crate::core::Frame<$domain>> {
                    self.$field.current($stack)
                }

                #[allow(dead_code)]
                pub fn $raw(&self) -> Option<&$crate::core::Stack<$domain>> {
                    self.$field.stack($stack)
                }

                #[allow(dead_code)]
                pub fn $event(
                    &mut self,
                    event: &<$domain as $crate::core::Domain>::Event,
                ) -> Result<
                    Option<$crate::transition::Transition<$domain>>,
                    $crate::error::PushdownError,
                > {
                    self.$field.handle_event($stack, event)
                }

                #[allow(dead_code)]
                pub fn $update(
                    &mut self,
                    tick: &<$domain as $crate::core::Domain>::Tick,
                ) -> Result<
                    Option<$crate::transition::Transition<$domain>>,
                    $crate::error::PushdownError,
                > {
                    self.$field.update($stack, tick)
                }

                #[allow(dead_code)]
                pub fn $shadow(
                    &mut self,
                    tick: &<$domain as $crate::core::Domain>::Tick,
                ) -> Result<(), $crate::error::PushdownError> {
                    self.$field.shadow_update($stack, tick)
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Automaton, StateMachine};
    use crate::core::{Domain, State, StateType, TransitionResult};
    use crate::resolver::Resolver;
    use std::sync::Arc;

    struct Game;

    impl Domain for Game {
        type Data = ();
        type Event = char;
        type Tick = u32;
    }

    #[derive(Debug, Default)]
    struct Title;

    impl State<Game> for Title {
        fn on_event(&mut self, event: &char) -> TransitionResult<Game> {
            match event {
                'p' => TransitionResult::named("pause"),
                _ => TransitionResult::NoTransition,
            }
        }
    }

    #[derive(Debug, Default)]
    struct Paused {
        ticks: u32,
    }

    impl State<Game> for Paused {
        fn shadow_update(&mut self, tick: &u32) {
            self.ticks += tick;
        }

        fn update(&mut self, _tick: &u32) -> TransitionResult<Game> {
            TransitionResult::named("resume")
        }
    }

    #[derive(Debug, Default)]
    struct Hidden;

    impl State<Game> for Hidden {}

    struct Client {
        machine: StateMachine<Game>,
    }

    pushdown_methods! {
        impl Client {
            machine: Game;
            "screen" => {
                current: current_screen,
                stack: screen_stack,
                event: handle_screen_event,
                update: update_screen,
                shadow_update: shadow_update_screen,
            },
            "overlay" => {
                current: current_overlay,
                stack: overlay_stack,
                event: handle_overlay_event,
                update: update_overlay,
                shadow_update: shadow_update_overlay
            }
        }
    }

    fn client() -> Client {
        let automaton = Automaton::<Game>::builder()
            .state(StateType::<Game>::of::<Title>().declare_push("pause", "paused"))
            .state(StateType::<Game>::of::<Paused>().declare_pop("resume"))
            .state(StateType::<Game>::of::<Hidden>())
            .declare("screen", "title", Resolver::Inferred)
            .declare("overlay", "hidden", Resolver::Inferred)
            .build()
            .unwrap();

        Client {
            machine: Arc::new(automaton).start().unwrap(),
        }
    }

    #[test]
    fn generated_methods_target_their_stack() {
        let mut client = client();

        client.handle_screen_event(&'p').unwrap();

        assert!(client.current_screen().unwrap().is::<Paused>());
        assert_eq!(client.screen_stack().unwrap().len(), 2);
        assert_eq!(client.overlay_stack().unwrap().len(), 1);
        assert!(client.current_overlay().unwrap().is::<Hidden>());
    }

    #[test]
    fn generated_update_methods_dispatch() {
        let mut client = client();
        client.handle_screen_event(&'p').unwrap();

        client.shadow_update_screen(&5).unwrap();
        let paused = client.current_screen().unwrap().downcast_ref::<Paused>();
        assert_eq!(paused.map(|p| p.ticks), Some(5));

        client.update_screen(&1).unwrap();
        assert!(client.current_screen().unwrap().is::<Title>());

        assert!(client.update_overlay(&1).unwrap().is_none());
        client.shadow_update_overlay(&1).unwrap();
        assert!(client.handle_overlay_event(&'p').unwrap().is_none());
    }
}
