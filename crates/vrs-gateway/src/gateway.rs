use async_trait::async_trait;
use chrono::NaiveDate;

use vrs_core::{AppError, AppointmentDay, AppointmentTime, Location};

/// The three appointment endpoints behind one coarse failure signal.
///
/// Every error — transport, non-success status, unparseable payload —
/// collapses into `AppError::Gateway`; callers are expected to treat
/// all of them the same way, so no finer taxonomy is exposed.
#[async_trait]
pub trait AppointmentGateway: Send {
    /// Days currently offered at one location. Fresh on every call,
    /// in whatever order the portal returned them.
    async fn list_days(
        &self,
        action_id: &str,
        csrf_token: &str,
        location: Location,
    ) -> Result<Vec<AppointmentDay>, AppError>;

    /// Time slots for one day at one location.
    async fn list_times(
        &self,
        action_id: &str,
        csrf_token: &str,
        location: Location,
        date: NaiveDate,
    ) -> Result<AppointmentTime, AppError>;

    /// Submit the new booking. Returns the response status code for
    /// observability.
    async fn submit(
        &self,
        action_id: &str,
        csrf_token: &str,
        location: Location,
        date: NaiveDate,
        time: &str,
    ) -> Result<u16, AppError>;
}
