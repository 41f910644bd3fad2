//! Speaker timers.
//!
//! The coordinator is a plain state machine; the ticker drives it from a
//! tokio interval and the session ties both to a speaking order.

pub mod clock;
pub mod coordinator;
pub mod session;
pub mod ticker;

pub use clock::MonotonicClock;
pub use coordinator::{TimerPhase, TimerState, SPEAKING_CAP};
pub use session::StandupSession;
