//! @acp:module "Trigger Sources"
//! @acp:summary "Page events that ask the arbitrator to show an event pool"
//! @acp:domain widget
//! @acp:layer service
//!
//! Sources never show anything themselves. They observe [`PageEvent`]s
//! and, when they want to speak, the [`Triggers`] registry hands their
//! pool to the [`Arbitrator`] at [`EVENT_PRIORITY`].

pub mod idle;

use std::time::Duration;

use crate::arbiter::{Arbitrator, EVENT_PRIORITY, EVENT_TIMEOUT};
use crate::tips::{EventPools, MessagePool, TemplateArgs};

pub use idle::{IdleDetector, IdleState, IdleTrigger, IDLE_TICK, IDLE_WINDOW};

/// Something that happened on the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    PointerMove,
    KeyDown,
    Copy,
    VisibilityChange { hidden: bool },
    DevToolsOpened,
    /// Periodic sample; carries the time since the previous tick
    Tick(Duration),
}

/// One message source
pub trait TriggerSource: Send {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Observe an event; true means this source wants its pool shown
    fn observe(&mut self, event: &PageEvent) -> bool;

    fn pool(&self) -> &MessagePool;
}

/// Fires its pool whenever `matches` accepts an event
#[derive(Clone)]
pub struct EventWatcher {
    name: &'static str,
    pool: MessagePool,
    matches: fn(&PageEvent) -> bool,
}

impl EventWatcher {
    pub fn copy(pool: MessagePool) -> Self {
        Self {
            name: "copy",
            pool,
            matches: |event| matches!(event, PageEvent::Copy),
        }
    }

    /// Fires when the page comes back to the foreground
    pub fn visibility(pool: MessagePool) -> Self {
        Self {
            name: "visibilitychange",
            pool,
            matches: |event| matches!(event, PageEvent::VisibilityChange { hidden: false }),
        }
    }

    pub fn devtools(pool: MessagePool) -> Self {
        Self {
            name: "devtool",
            pool,
            matches: |event| matches!(event, PageEvent::DevToolsOpened),
        }
    }
}

impl TriggerSource for EventWatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn observe(&mut self, event: &PageEvent) -> bool {
        (self.matches)(event)
    }

    fn pool(&self) -> &MessagePool {
        &self.pool
    }
}

/// Registered trigger sources, wired to one arbitrator
pub struct Triggers {
    arbiter: Arbitrator,
    sources: Vec<Box<dyn TriggerSource>>,
}

impl Triggers {
    pub fn new(arbiter: Arbitrator) -> Self {
        Self {
            arbiter,
            sources: Vec::new(),
        }
    }

    /// The standard sources: idle, copy, visibility and dev tools
    pub fn standard(arbiter: Arbitrator, pools: &EventPools) -> Self {
        let mut triggers = Self::new(arbiter);
        triggers.register(IdleTrigger::new(pools.idle.clone()));
        triggers.register(EventWatcher::copy(pools.copy.clone()));
        triggers.register(EventWatcher::visibility(pools.visibilitychange.clone()));
        triggers.register(EventWatcher::devtools(pools.devtool.clone()));
        triggers
    }

    pub fn register<T: TriggerSource + 'static>(&mut self, source: T) {
        tracing::debug!("Registered trigger source '{}'", source.name());
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Let every source observe `event`. Returns the names of sources whose
    /// message was accepted.
    pub fn dispatch(&mut self, event: PageEvent) -> Vec<&'static str> {
        let mut accepted = Vec::new();
        for source in &mut self.sources {
            if !source.observe(&event) {
                continue;
            }
            let shown = self.arbiter.request_show(
                source.pool(),
                EVENT_TIMEOUT,
                EVENT_PRIORITY,
                &TemplateArgs::new(),
            );
            if shown {
                accepted.push(source.name());
            }
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::MessageSink;
    use crate::storage::MemoryStore;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl MessageSink for Recorder {
        fn show(&self, text: &str) {
            self.0.lock().unwrap().push(text.to_string());
        }

        fn hide(&self) {}
    }

    fn pools() -> EventPools {
        EventPools {
            idle: "idle".into(),
            devtool: "devtool".into(),
            copy: "copy".into(),
            visibilitychange: "welcome back".into(),
            screenshot: "cheese".into(),
        }
    }

    fn setup() -> (Triggers, Arbitrator, Arc<Recorder>) {
        let sink = Arc::new(Recorder::default());
        let arbiter = Arbitrator::new(true, Arc::new(MemoryStore::new()), sink.clone());
        (Triggers::standard(arbiter.clone(), &pools()), arbiter, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_fires_copy_pool() {
        let (mut triggers, _, sink) = setup();
        assert_eq!(triggers.len(), 4);
        assert_eq!(triggers.dispatch(PageEvent::Copy), vec!["copy"]);
        assert_eq!(*sink.0.lock().unwrap(), vec!["copy"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visibility_only_when_shown() {
        let (mut triggers, _, _) = setup();
        assert!(triggers
            .dispatch(PageEvent::VisibilityChange { hidden: true })
            .is_empty());
        assert_eq!(
            triggers.dispatch(PageEvent::VisibilityChange { hidden: false }),
            vec!["visibilitychange"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_priority_sources_do_not_interrupt() {
        let (mut triggers, arbiter, _) = setup();
        assert_eq!(triggers.dispatch(PageEvent::DevToolsOpened), vec!["devtool"]);
        assert!(triggers.dispatch(PageEvent::Copy).is_empty());
        assert_eq!(arbiter.display_state().current_priority, Some(EVENT_PRIORITY));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_through_registry() {
        let (mut triggers, _, _) = setup();
        let fired: Vec<_> = (0..20)
            .flat_map(|_| triggers.dispatch(PageEvent::Tick(IDLE_TICK)))
            .collect();
        assert_eq!(fired, vec!["idle"]);
    }
}
