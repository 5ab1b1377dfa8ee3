use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::window;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::session;

/// Window events that count as user activity and defer the deadline.
const ACTIVITY_EVENTS: [&str; 5] = ["mousedown", "mousemove", "keypress", "scroll", "touchstart"];

/// Configuration for the idle watchdog
#[derive(Clone, PartialEq)]
pub struct IdleLogoutConfig {
    pub timeout_ms: u32,
}

impl Default for IdleLogoutConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30 * 60 * 1000, // 30 minutes
        }
    }
}

/// Single-instance inactivity timer. `reset` cancels any armed timeout
/// before re-arming, so there is never more than one live timer, and the
/// expiry callback fires at most once per arming.
pub struct IdleTimer {
    timeout_ms: u32,
    timer: Rc<RefCell<Option<Timeout>>>,
    on_expire: Rc<dyn Fn()>,
}

impl IdleTimer {
    pub fn new(timeout_ms: u32, on_expire: impl Fn() + 'static) -> Self {
        Self {
            timeout_ms,
            timer: Rc::new(RefCell::new(None)),
            on_expire: Rc::new(on_expire),
        }
    }

    /// Cancel the pending timeout (if any) and arm a fresh one.
    pub fn reset(&self) {
        if let Some(previous) = self.timer.borrow_mut().take() {
            previous.cancel();
        }
        let on_expire = self.on_expire.clone();
        let timeout = Timeout::new(self.timeout_ms, move || {
            on_expire();
        });
        *self.timer.borrow_mut() = Some(timeout);
    }

    /// Tear down without firing.
    pub fn cancel(&self) {
        if let Some(pending) = self.timer.borrow_mut().take() {
            pending.cancel();
        }
    }
}

/// Watchdog that force-logs-out an idle session.
///
/// Arms a single timer for the configured inactivity window and resets it on
/// any qualifying window event. On expiry with a session present, emits
/// `on_expire` (the app root wires this to logout + redirect). Listeners and
/// the timer are torn down in the effect cleanup; nothing fires after
/// unmount.
#[hook]
pub fn use_idle_logout(config: IdleLogoutConfig, on_expire: Callback<()>) {
    use_effect_with((config,), move |(config,)| {
        let window = window().expect("should have window");

        let timer = {
            let on_expire = on_expire.clone();
            IdleTimer::new(config.timeout_ms, move || {
                // Expiry only matters while someone is signed in
                if session::current_user().is_some() {
                    Logger::info_with_component("idle-watchdog", "inactivity window elapsed, signing out");
                    on_expire.emit(());
                }
            })
        };
        let timer = Rc::new(timer);

        let on_activity = {
            let timer = timer.clone();
            Closure::wrap(Box::new(move |_: web_sys::Event| {
                timer.reset();
            }) as Box<dyn FnMut(web_sys::Event)>)
        };

        for event in ACTIVITY_EVENTS {
            let _ = window
                .add_event_listener_with_callback(event, on_activity.as_ref().unchecked_ref());
        }

        timer.reset();

        move || {
            timer.cancel();
            for event in ACTIVITY_EVENTS {
                let _ = window
                    .remove_event_listener_with_callback(event, on_activity.as_ref().unchecked_ref());
            }
            drop(on_activity);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn config_default_is_thirty_minutes() {
        let config = IdleLogoutConfig::default();
        assert_eq!(config.timeout_ms, 30 * 60 * 1000);
    }

    #[wasm_bindgen_test]
    async fn expires_exactly_once_with_no_activity() {
        let fired = Rc::new(Cell::new(0u32));
        let timer = {
            let fired = fired.clone();
            IdleTimer::new(20, move || fired.set(fired.get() + 1))
        };
        timer.reset();

        TimeoutFuture::new(80).await;
        assert_eq!(fired.get(), 1);
    }

    #[wasm_bindgen_test]
    async fn reset_defers_the_deadline() {
        let fired = Rc::new(Cell::new(0u32));
        let timer = {
            let fired = fired.clone();
            IdleTimer::new(60, move || fired.set(fired.get() + 1))
        };
        timer.reset();

        // Activity at 30ms: the original 60ms deadline must not fire
        TimeoutFuture::new(30).await;
        timer.reset();
        TimeoutFuture::new(45).await;
        assert_eq!(fired.get(), 0, "deadline should have moved");

        TimeoutFuture::new(40).await;
        assert_eq!(fired.get(), 1);
    }

    #[wasm_bindgen_test]
    async fn cancel_prevents_firing() {
        let fired = Rc::new(Cell::new(0u32));
        let timer = {
            let fired = fired.clone();
            IdleTimer::new(20, move || fired.set(fired.get() + 1))
        };
        timer.reset();
        timer.cancel();

        TimeoutFuture::new(60).await;
        assert_eq!(fired.get(), 0);
    }
}
