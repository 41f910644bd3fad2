//! Plain-text rendering of the stand-up board.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::models::Participant;
use crate::timer::{TimerPhase, TimerState};

/// Remaining time as `m:ss`, or `Time's up!` once nothing is left.
///
/// Partial seconds round up, so the countdown only shows `0:00` as `Time's up!`.
pub fn format_remaining(remaining: Duration) -> String {
    let seconds = remaining.as_millis().div_ceil(1000);
    if seconds == 0 {
        return "Time's up!".to_string();
    }
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One line per participant, in speaking order.
pub fn render_board(order: &[Participant], timers: &BTreeMap<Participant, TimerState>) -> String {
    let width = order.iter().map(|p| p.name().chars().count()).max().unwrap_or(0);
    let mut board = String::new();

    for (index, participant) in order.iter().enumerate() {
        let status = match timers.get(participant) {
            None => String::new(),
            Some(state) => match state.phase() {
                TimerPhase::Completed => "✓ done".to_string(),
                TimerPhase::Running => format!("{} ▶", format_remaining(state.remaining())),
                TimerPhase::Capped | TimerPhase::Deactivated => {
                    format_remaining(state.remaining())
                }
            },
        };

        board.push_str(&format!(
            "{:>2}. {:<width$}  {}\n",
            index + 1,
            participant.name(),
            status,
            width = width
        ));
    }

    board
}
