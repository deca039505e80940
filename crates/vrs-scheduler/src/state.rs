//! Pure transition table for the orchestration loop.
//!
//! Keeping the table side-effect free makes every transition testable
//! without a live portal session; the loop in the binary only executes
//! steps and feeds their outcomes back through `next_state`.

use vrs_core::{CycleOutcome, State};

/// What executing the action for one state produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step succeeded (login, navigation, reload).
    Done,
    /// The step failed.
    Failed,
    /// One reschedule cycle ran to its outcome.
    Cycle(CycleOutcome),
}

pub fn next_state(state: State, outcome: StepOutcome) -> State {
    match (state, outcome) {
        (State::NotLoggedIn, StepOutcome::Done) => State::NavigateToReschedule,
        (State::NavigateToReschedule, StepOutcome::Done) => State::Rescheduling,
        (State::Rescheduling, StepOutcome::Cycle(cycle)) => match cycle {
            CycleOutcome::Success => State::Complete,
            CycleOutcome::Retry => State::Rescheduling,
            CycleOutcome::Refresh => State::Refresh,
            CycleOutcome::Error => State::Error,
        },
        (State::Refresh, StepOutcome::Done) => State::Rescheduling,
        // Terminal states absorb everything.
        (state, _) if state.is_terminal() => state,
        // Step failures and outcome/state mismatches are fatal.
        _ => State::Error,
    }
}
