use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consulate location selection
///
/// The numeric values are the facility ids the portal uses in its
/// day/time endpoints and in the submission form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Calgary,
    Halifax,
    Montreal,
    Ottawa,
    Quebec,
    Toronto,
    Vancouver,
}

impl Location {
    /// Returns the portal-facing facility id for this location
    pub fn facility_id(&self) -> u32 {
        match self {
            Self::Calgary => 89,
            Self::Halifax => 90,
            Self::Montreal => 91,
            Self::Ottawa => 92,
            Self::Quebec => 93,
            Self::Toronto => 94,
            Self::Vancouver => 95,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calgary => "Calgary",
            Self::Halifax => "Halifax",
            Self::Montreal => "Montreal",
            Self::Ottawa => "Ottawa",
            Self::Quebec => "Quebec",
            Self::Toronto => "Toronto",
            Self::Vancouver => "Vancouver",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day the portal currently offers at one location.
///
/// Received fresh on every poll and never cached across polls; the
/// order of a day listing is whatever the portal returned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDay {
    pub date: NaiveDate,
    pub business_day: bool,
}

/// Time slots the portal offers for one selected day.
///
/// `business_times` is the allowed subset; a valid selection must
/// appear in both sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentTime {
    pub available_times: Vec<String>,
    pub business_times: Vec<String>,
}

/// Outcome of one reschedule cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Token missing, no compatible time, or submission failed.
    Error,
    /// No earlier day anywhere; re-run the cycle without reloading.
    Retry,
    /// Retry threshold hit; reload the page before the next cycle.
    Refresh,
    /// Booking submitted.
    Success,
}

/// Orchestration state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    NotLoggedIn,
    NavigateToReschedule,
    Rescheduling,
    Refresh,
    Complete,
    Error,
}

impl State {
    /// Terminal states stop the orchestration loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}
