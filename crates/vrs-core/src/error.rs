use chrono::NaiveDate;

use crate::types::Location;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Login did not reach the group page (landed on '{0}')")]
    AuthenticationFailed(String),

    #[error("Navigation to the reschedule page failed: {0}")]
    NavigationFailed(String),

    #[error("No csrf-token on the appointment page; session looks broken")]
    TokenUnavailable,

    #[error("Portal request failed: {0}")]
    Gateway(String),

    #[error("No compatible time for {date} at {location}")]
    NoCompatibleTime { location: Location, date: NaiveDate },

    #[error("Appointment submission rejected with status {0}")]
    SubmitRejected(u16),
}
