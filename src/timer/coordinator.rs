//! Speaker timer state machine.
//!
//! One timer per participant, at most one of them running. A timer moves
//! `Running -> {Capped, Deactivated} -> Completed`; a participant without a
//! timer is idle. Time is passed in explicitly so the machine can be driven
//! by any clock.

use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::Participant;

/// Longest a speaker's timer can run.
pub const SPEAKING_CAP: Duration = Duration::from_millis(120_000);

/// Where a participant's timer currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    /// Accumulating elapsed time
    Running,
    /// Stopped at the cap, waiting for an explicit completion
    Capped,
    /// Stopped because another participant started
    Deactivated,
    /// Turn finished explicitly
    Completed,
}

/// Timer for a single participant's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub participant: Participant,
    /// Clock reading when the turn started.
    pub started_at: Duration,
    /// Time spoken so far, never above [`SPEAKING_CAP`].
    pub elapsed: Duration,
    pub active: bool,
    pub completed: bool,
}

impl TimerState {
    fn started(participant: Participant, now: Duration) -> Self {
        Self {
            participant,
            started_at: now,
            elapsed: Duration::ZERO,
            active: true,
            completed: false,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.completed {
            TimerPhase::Completed
        } else if self.active {
            TimerPhase::Running
        } else if self.elapsed >= SPEAKING_CAP {
            TimerPhase::Capped
        } else {
            TimerPhase::Deactivated
        }
    }

    /// Time left before the cap, floored at zero.
    pub fn remaining(&self) -> Duration {
        SPEAKING_CAP.saturating_sub(self.elapsed)
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer is running.
    Idle,
    /// The running timer advanced.
    Running {
        participant: Participant,
        elapsed: Duration,
    },
    /// The running timer hit the cap and stopped.
    Capped { participant: Participant },
}

/// Owns every timer of a stand-up session.
#[derive(Debug, Default)]
pub struct TimerCoordinator {
    timers: BTreeMap<Participant, TimerState>,
    running: Option<Participant>,
}

impl TimerCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) a participant's turn.
    ///
    /// Whoever was running before is deactivated with their elapsed time
    /// frozen at the last tick.
    pub fn start(&mut self, participant: Participant, now: Duration) {
        if let Some(previous) = self.running.take() {
            if previous != participant {
                if let Some(state) = self.timers.get_mut(&previous) {
                    state.active = false;
                    debug!(
                        "Deactivated {} at {}ms",
                        previous,
                        state.elapsed.as_millis()
                    );
                }
            }
        }

        debug!("Starting timer for {}", participant);
        self.timers
            .insert(participant.clone(), TimerState::started(participant.clone(), now));
        self.running = Some(participant);
    }

    /// Advances the running timer to `now`, stopping it at the cap.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        let Some(participant) = self.running.clone() else {
            return TickOutcome::Idle;
        };

        let Some(state) = self.timers.get_mut(&participant) else {
            self.running = None;
            return TickOutcome::Idle;
        };

        let elapsed = now.saturating_sub(state.started_at);
        if elapsed >= SPEAKING_CAP {
            state.elapsed = SPEAKING_CAP;
            state.active = false;
            self.running = None;
            info!("{} reached the {}s cap", participant, SPEAKING_CAP.as_secs());
            TickOutcome::Capped { participant }
        } else {
            state.elapsed = elapsed;
            TickOutcome::Running {
                participant,
                elapsed,
            }
        }
    }

    /// Marks a participant's turn as done, whatever its timer shows.
    pub fn complete(&mut self, participant: &Participant) {
        if self.running.as_ref() == Some(participant) {
            self.running = None;
        }

        let state = self
            .timers
            .entry(participant.clone())
            .or_insert_with(|| TimerState {
                participant: participant.clone(),
                started_at: Duration::ZERO,
                elapsed: Duration::ZERO,
                active: false,
                completed: false,
            });
        state.active = false;
        state.completed = true;

        debug!("Completed {} after {}ms", participant, state.elapsed.as_millis());
    }

    #[cfg(test)]
    pub fn get(&self, participant: &Participant) -> Option<&TimerState> {
        self.timers.get(participant)
    }

    /// The participant currently speaking, if any.
    pub fn running(&self) -> Option<&Participant> {
        self.running.as_ref()
    }

    pub fn has_active(&self) -> bool {
        self.running.is_some()
    }

    /// Copy of every timer, ordered by participant name.
    pub fn snapshot(&self) -> BTreeMap<Participant, TimerState> {
        self.timers.clone()
    }
}
