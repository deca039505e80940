//! Reschedule cycle: day/time selection, retry policy, and the pure
//! state transition table driving the orchestration.

pub mod cycle;
pub mod pacing;
pub mod retry;
pub mod selection;
pub mod state;

pub use cycle::run_cycle;
pub use pacing::random_delay;
pub use retry::{REFRESH_THRESHOLD, should_refresh};
pub use selection::{find_compatible_time, find_earlier_day};
pub use state::{StepOutcome, next_state};
