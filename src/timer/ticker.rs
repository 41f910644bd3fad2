//! Periodic tick task for the running speaker timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::clock::Clock;
use super::coordinator::{TickOutcome, TimerCoordinator};

/// Coordinator shared between the session and its tick task.
pub type SharedCoordinator = Arc<Mutex<TimerCoordinator>>;

/// Locks the coordinator; a poisoned lock still holds consistent state
/// because every transition completes before the guard is released.
pub fn lock(coordinator: &SharedCoordinator) -> MutexGuard<'_, TimerCoordinator> {
    coordinator.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cancellable task that ticks the coordinator at a fixed period.
///
/// The task stops on its own once a tick leaves no timer running.
pub struct Ticker {
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// Spawns a fresh tick task, replacing any previous one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, coordinator: &SharedCoordinator, clock: &Arc<dyn Clock>) {
        self.cancel();

        let coordinator = Arc::clone(coordinator);
        let clock = Arc::clone(clock);
        let period = self.period;

        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let still_running = {
                    let mut guard = lock(&coordinator);
                    match guard.tick(clock.now()) {
                        TickOutcome::Running {
                            participant,
                            elapsed,
                        } => trace!("{} at {}ms", participant, elapsed.as_millis()),
                        TickOutcome::Capped { participant } => {
                            debug!("{} capped, stopping ticker", participant)
                        }
                        TickOutcome::Idle => {}
                    }
                    guard.has_active()
                };

                if !still_running {
                    debug!("No timer running, ticker stopped");
                    break;
                }
            }
        }));
    }

    /// Stops the tick task. Timer values are left as last computed.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
