//! @acp:module "Message Arbitrator"
//! @acp:summary "Decide which message may interrupt which, and expire it on time"
//! @acp:domain widget
//! @acp:layer logic
//!
//! Every message source goes through [`Arbitrator::request_show`]. The
//! guard reads the session-scoped [`DisplayState`] at call time, so callers
//! that awaited a fetch are judged against whatever is on screen when
//! they resume.

mod state;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::storage::KeyValueStore;
use crate::tips::{render_template, MessagePool, TemplateArgs};

pub use state::DisplayState;

/// Higher values pre-empt lower or equal ones
pub type Priority = u8;

pub const WELCOME_PRIORITY: Priority = 8;
/// Idle, copy, visibility, dev tools, screenshot and quote messages
pub const EVENT_PRIORITY: Priority = 9;
pub const MODEL_PRIORITY: Priority = 10;
pub const GOODBYE_PRIORITY: Priority = 11;

pub const WELCOME_TIMEOUT: Duration = Duration::from_millis(7000);
pub const EVENT_TIMEOUT: Duration = Duration::from_millis(6000);
pub const MODEL_TIMEOUT: Duration = Duration::from_millis(4000);
pub const GOODBYE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Speech bubble the arbitrator writes to
pub trait MessageSink: Send + Sync {
    fn show(&self, text: &str);

    fn hide(&self);
}

/// Session-wide message arbitration. Cheap to clone; clones share the
/// same timer and state.
#[derive(Clone)]
pub struct Arbitrator {
    shared: Arc<Shared>,
}

struct Shared {
    enabled: bool,
    session: Arc<dyn KeyValueStore>,
    sink: Arc<dyn MessageSink>,
    timer: Mutex<ExpiryTimer>,
}

/// The single armed expiry. `generation` changes on every accepted
/// request so a timer that already woke up cannot clear a newer message.
#[derive(Default)]
struct ExpiryTimer {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl ExpiryTimer {
    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation += 1;
    }
}

impl Arbitrator {
    pub fn new(
        enabled: bool,
        session: Arc<dyn KeyValueStore>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                enabled,
                session,
                sink,
                timer: Mutex::new(ExpiryTimer::default()),
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::load(self.shared.session.as_ref())
    }

    /// Show one text from `pool` unless something at least as important is
    /// already on screen. Returns whether the request was accepted; rejected
    /// requests have no side effects.
    pub fn request_show(
        &self,
        pool: &MessagePool,
        timeout: Duration,
        priority: Priority,
        args: &TemplateArgs,
    ) -> bool {
        if !self.shared.enabled || pool.is_empty() {
            return false;
        }

        let mut timer = self.shared.timer();
        let state = DisplayState::load(self.shared.session.as_ref());
        if !state.admits(priority) {
            tracing::debug!(
                "Message at priority {} suppressed by {:?}",
                priority,
                state.current_priority
            );
            return false;
        }

        let Some(text) = pool.pick(&mut rand::rng()) else {
            return false;
        };
        let text = render_template(text, args);

        timer.cancel();
        let generation = timer.generation;

        DisplayState::showing(priority).save(self.shared.session.as_ref());
        self.shared.sink.show(&text);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let shared = Arc::clone(&self.shared);
                timer.handle = Some(runtime.spawn(async move {
                    tokio::time::sleep(timeout).await;
                    shared.expire(generation);
                }));
            }
            Err(_) => tracing::warn!("No runtime to expire message; it stays until replaced"),
        }

        true
    }

    /// Drop whatever is on screen and forget its priority
    pub fn clear(&self) {
        let mut timer = self.shared.timer();
        timer.cancel();
        DisplayState::default().save(self.shared.session.as_ref());
        self.shared.sink.hide();
    }
}

impl Shared {
    fn timer(&self) -> MutexGuard<'_, ExpiryTimer> {
        self.timer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn expire(&self, generation: u64) {
        let mut timer = self.timer();
        if timer.generation != generation {
            return;
        }
        timer.handle = None;
        DisplayState::default().save(self.session.as_ref());
        self.sink.hide();
    }
}
