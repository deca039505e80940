//! Shared types and error taxonomy for the appointment rescheduler.

pub mod error;
pub mod types;

pub use error::AppError;
pub use types::{AppointmentDay, AppointmentTime, CycleOutcome, Location, State};
