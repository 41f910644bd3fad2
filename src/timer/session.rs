//! A stand-up session: speaking order plus the timers behind it.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

use super::clock::Clock;
use super::coordinator::{TimerCoordinator, TimerState};
use super::ticker::{lock, SharedCoordinator, Ticker};
use crate::models::Participant;
use crate::shuffle::shuffle;

pub struct StandupSession {
    order: Vec<Participant>,
    coordinator: SharedCoordinator,
    clock: Arc<dyn Clock>,
    ticker: Ticker,
}

impl StandupSession {
    pub fn new(order: Vec<Participant>, clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        Self {
            order,
            coordinator: Arc::new(Mutex::new(TimerCoordinator::new())),
            clock,
            ticker: Ticker::new(tick_interval),
        }
    }

    /// Current speaking order.
    pub fn order(&self) -> &[Participant] {
        &self.order
    }

    /// Draws a new speaking order. Timers are kept.
    pub fn reshuffle(&mut self) {
        self.order = shuffle(&self.order);
    }

    /// Finds a participant by 1-based position or by name (case-insensitive).
    pub fn resolve(&self, input: &str) -> Option<Participant> {
        let input = input.trim();

        if let Ok(position) = input.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|index| self.order.get(index))
                .cloned();
        }

        let wanted = input.to_lowercase();
        self.order
            .iter()
            .find(|p| p.name().to_lowercase() == wanted)
            .cloned()
    }

    /// Starts a participant's turn and (re)arms the ticker.
    pub fn start(&mut self, participant: &Participant) {
        lock(&self.coordinator).start(participant.clone(), self.clock.now());
        self.ticker.arm(&self.coordinator, &self.clock);
        info!("{} is speaking", participant);
    }

    /// Finishes a participant's turn; stops the ticker if nobody is left running.
    pub fn complete(&mut self, participant: &Participant) {
        let still_running = {
            let mut guard = lock(&self.coordinator);
            guard.complete(participant);
            guard.has_active()
        };

        if !still_running {
            self.ticker.cancel();
        }
        info!("{} is done", participant);
    }

    pub fn snapshot(&self) -> BTreeMap<Participant, TimerState> {
        lock(&self.coordinator).snapshot()
    }

    /// The participant currently speaking, if any.
    pub fn running(&self) -> Option<Participant> {
        lock(&self.coordinator).running().cloned()
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }
}
