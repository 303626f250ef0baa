//! @acp:module "Idle Detector"
//! @acp:summary "Two-state machine that fires while the user is inactive"
//! @acp:domain widget
//! @acp:layer logic

use std::time::Duration;

use super::{PageEvent, TriggerSource};
use crate::tips::MessagePool;

/// Quiet time before the first idle message, and between repeats
pub const IDLE_WINDOW: Duration = Duration::from_millis(20_000);
/// How often the page samples the activity flag
pub const IDLE_TICK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleState {
    /// User is around; `quiet` is time since the last observed activity
    Active { quiet: Duration },
    /// Window elapsed; `since_fire` is time since the last idle message
    Idle { since_fire: Duration },
}

/// Idle detection independent of any timer primitive: feed it activity
/// and elapsed time, it says when to fire.
#[derive(Debug, Clone)]
pub struct IdleDetector {
    state: IdleState,
    window: Duration,
    acted: bool,
}

impl Default for IdleDetector {
    fn default() -> Self {
        Self::new(IDLE_WINDOW)
    }
}

impl IdleDetector {
    pub fn new(window: Duration) -> Self {
        Self {
            state: IdleState::Active {
                quiet: Duration::ZERO,
            },
            window,
            acted: false,
        }
    }

    pub fn state(&self) -> IdleState {
        self.state
    }

    /// Pointer moved or key pressed
    pub fn record_activity(&mut self) {
        self.acted = true;
    }

    /// Advance by `elapsed`. Returns true when an idle message is due.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if std::mem::take(&mut self.acted) {
            self.state = IdleState::Active {
                quiet: Duration::ZERO,
            };
            return false;
        }

        match self.state {
            IdleState::Active { quiet } => {
                let quiet = quiet + elapsed;
                if quiet >= self.window {
                    self.state = IdleState::Idle {
                        since_fire: Duration::ZERO,
                    };
                    true
                } else {
                    self.state = IdleState::Active { quiet };
                    false
                }
            }
            IdleState::Idle { since_fire } => {
                let since_fire = since_fire + elapsed;
                if since_fire >= self.window {
                    self.state = IdleState::Idle {
                        since_fire: since_fire - self.window,
                    };
                    true
                } else {
                    self.state = IdleState::Idle { since_fire };
                    false
                }
            }
        }
    }
}

/// Trigger source wrapping [`IdleDetector`]
#[derive(Debug, Clone)]
pub struct IdleTrigger {
    detector: IdleDetector,
    pool: MessagePool,
}

impl IdleTrigger {
    pub fn new(pool: MessagePool) -> Self {
        Self {
            detector: IdleDetector::default(),
            pool,
        }
    }

    pub fn with_window(pool: MessagePool, window: Duration) -> Self {
        Self {
            detector: IdleDetector::new(window),
            pool,
        }
    }
}

impl TriggerSource for IdleTrigger {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn observe(&mut self, event: &PageEvent) -> bool {
        match event {
            PageEvent::PointerMove | PageEvent::KeyDown => {
                self.detector.record_activity();
                false
            }
            PageEvent::Tick(elapsed) => self.detector.tick(*elapsed),
            _ => false,
        }
    }

    fn pool(&self) -> &MessagePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(detector: &mut IdleDetector, seconds: u64) -> usize {
        (0..seconds).filter(|_| detector.tick(IDLE_TICK)).count()
    }

    #[test]
    fn test_fires_after_window() {
        let mut detector = IdleDetector::default();
        assert_eq!(run(&mut detector, 19), 0);
        assert!(detector.tick(IDLE_TICK));
        assert!(matches!(detector.state(), IdleState::Idle { .. }));
    }

    #[test]
    fn test_repeats_every_window() {
        let mut detector = IdleDetector::default();
        assert_eq!(run(&mut detector, 20), 1);
        assert_eq!(run(&mut detector, 19), 0);
        assert_eq!(run(&mut detector, 1), 1);
        assert_eq!(run(&mut detector, 60), 3);
    }

    #[test]
    fn test_activity_resets() {
        let mut detector = IdleDetector::default();
        run(&mut detector, 25);
        detector.record_activity();
        assert!(!detector.tick(IDLE_TICK));
        assert_eq!(
            detector.state(),
            IdleState::Active {
                quiet: Duration::ZERO
            }
        );
        assert_eq!(run(&mut detector, 19), 0);
        assert_eq!(run(&mut detector, 1), 1);
    }

    #[test]
    fn test_activity_during_window_delays_first_fire() {
        let mut detector = IdleDetector::default();
        run(&mut detector, 15);
        detector.record_activity();
        assert_eq!(run(&mut detector, 20), 0);
        assert_eq!(run(&mut detector, 1), 1);
    }

    #[test]
    fn test_trigger_observes_events() {
        let mut trigger = IdleTrigger::with_window(MessagePool::from("zzz"), Duration::from_secs(2));
        assert!(!trigger.observe(&PageEvent::Tick(Duration::from_secs(1))));
        assert!(trigger.observe(&PageEvent::Tick(Duration::from_secs(1))));
        assert!(!trigger.observe(&PageEvent::KeyDown));
        assert!(!trigger.observe(&PageEvent::Tick(Duration::from_secs(1))));
        assert!(!trigger.observe(&PageEvent::Copy));
    }
}
