//! One reschedule cycle: poll every configured location for an
//! earlier day, pick a time, submit.

use tracing::{error, info, warn};

use vrs_config::Config;
use vrs_core::{AppError, CycleOutcome};
use vrs_gateway::{AppointmentGateway, Portal};
use vrs_session::SessionContext;

use crate::pacing::random_delay;
use crate::retry::should_refresh;
use crate::selection::{find_compatible_time, find_earlier_day};

/// Run one cycle against the portal.
///
/// Location polling failures are absorbed: one consulate erroring out
/// must not keep the others in this cycle from being checked. Token
/// loss, a day without a compatible time, and submission failures end
/// the cycle with `Error`.
pub async fn run_cycle<P>(
    portal: &mut P,
    ctx: &mut SessionContext,
    config: &Config,
    retry_count: &mut u32,
) -> CycleOutcome
where
    P: Portal + AppointmentGateway,
{
    // Stale picks from an earlier cycle must not survive into this one.
    ctx.reset();

    let token = match portal.csrf_token().await {
        Ok(token) => token,
        Err(err) => {
            error!(error = %err, "Unable to refresh X-CSRF-Token");
            return CycleOutcome::Error;
        }
    };
    ctx.set_csrf_token(Some(token.clone()));

    let Some(action_id) = ctx.action_id().map(str::to_string) else {
        error!("No action id in session; navigation never completed");
        return CycleOutcome::Error;
    };

    for &location in &config.locations {
        info!(location = %location, "Getting available appointment days");

        match portal.list_days(&action_id, &token, location).await {
            Ok(days) => {
                if let Some(day) =
                    find_earlier_day(&days, config.current_appointment_date).cloned()
                {
                    ctx.select_day(location, day);
                    break;
                }
                info!(location = %location, "Found no earlier appointment day");
            }
            Err(err) => {
                warn!(location = %location, error = %err, "Day listing failed; skipping location");
            }
        }

        // Courtesy gap before hitting the next consulate.
        random_delay(&config.delays).await;
    }

    let Some(selection) = ctx.selection().cloned() else {
        *retry_count += 1;
        info!(retry_count = *retry_count, "No earlier day at any location");
        return if should_refresh(*retry_count) {
            CycleOutcome::Refresh
        } else {
            CycleOutcome::Retry
        };
    };

    info!(
        date = %selection.day.date,
        location = %selection.location,
        "Found an earlier appointment day"
    );

    let times = match portal
        .list_times(&action_id, &token, selection.location, selection.day.date)
        .await
    {
        Ok(times) => times,
        Err(err) => {
            error!(
                date = %selection.day.date,
                location = %selection.location,
                error = %err,
                "Time listing failed"
            );
            return CycleOutcome::Error;
        }
    };

    let Some(time) = find_compatible_time(&times.available_times, &times.business_times)
        .map(str::to_string)
    else {
        // No fallback to the next location here: an incompatible day
        // ends the whole cycle.
        let err = AppError::NoCompatibleTime {
            location: selection.location,
            date: selection.day.date,
        };
        error!(error = %err, "Giving up on this cycle");
        return CycleOutcome::Error;
    };
    ctx.select_time(time.clone());

    info!(
        time = %time,
        date = %selection.day.date,
        location = %selection.location,
        "Found a compatible time"
    );

    match portal
        .submit(&action_id, &token, selection.location, selection.day.date, &time)
        .await
    {
        Ok(status) => {
            info!(status, "Appointment submitted");
            CycleOutcome::Success
        }
        Err(err) => {
            error!(error = %err, "There was an error submitting this appointment");
            CycleOutcome::Error
        }
    }
}

#[cfg(test)]
#[path = "cycle_tests.rs"]
mod tests;
