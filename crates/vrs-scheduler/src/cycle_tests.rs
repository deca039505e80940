use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use vrs_config::{Config, Credentials, DelayConfig};
use vrs_core::{AppError, AppointmentDay, AppointmentTime, CycleOutcome, Location};
use vrs_gateway::{AppointmentGateway, Portal};
use vrs_session::SessionContext;

use super::run_cycle;

enum DayListing {
    Days(Vec<AppointmentDay>),
    Fail,
}

struct MockPortal {
    csrf: Option<String>,
    days: HashMap<Location, DayListing>,
    times: AppointmentTime,
    times_fail: bool,
    submit_fail: bool,
    queried: Mutex<Vec<Location>>,
}

impl MockPortal {
    fn new() -> Self {
        Self {
            csrf: Some("token".into()),
            days: HashMap::new(),
            times: AppointmentTime {
                available_times: vec!["09:00".into(), "10:00".into()],
                business_times: vec!["09:00".into()],
            },
            times_fail: false,
            submit_fail: false,
            queried: Mutex::new(Vec::new()),
        }
    }

    fn with_days(mut self, location: Location, days: Vec<AppointmentDay>) -> Self {
        self.days.insert(location, DayListing::Days(days));
        self
    }

    fn with_failing_days(mut self, location: Location) -> Self {
        self.days.insert(location, DayListing::Fail);
        self
    }

    fn queried(&self) -> Vec<Location> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl Portal for MockPortal {
    async fn login(&mut self, _credentials: &Credentials) -> Result<(), AppError> {
        Ok(())
    }

    async fn goto_reschedule(&mut self) -> Result<String, AppError> {
        Ok("41400".into())
    }

    async fn csrf_token(&mut self) -> Result<String, AppError> {
        self.csrf.clone().ok_or(AppError::TokenUnavailable)
    }

    async fn reload(&mut self) -> Result<(), AppError> {
        Ok(())
    }

    fn current_url(&self) -> &str {
        "https://portal.test/schedule/41400/appointment"
    }
}

#[async_trait]
impl AppointmentGateway for MockPortal {
    async fn list_days(
        &self,
        _action_id: &str,
        _csrf_token: &str,
        location: Location,
    ) -> Result<Vec<AppointmentDay>, AppError> {
        self.queried.lock().unwrap().push(location);
        match self.days.get(&location) {
            Some(DayListing::Days(days)) => Ok(days.clone()),
            Some(DayListing::Fail) => Err(AppError::Gateway("boom".into())),
            None => Ok(Vec::new()),
        }
    }

    async fn list_times(
        &self,
        _action_id: &str,
        _csrf_token: &str,
        _location: Location,
        _date: NaiveDate,
    ) -> Result<AppointmentTime, AppError> {
        if self.times_fail {
            return Err(AppError::Gateway("boom".into()));
        }
        Ok(self.times.clone())
    }

    async fn submit(
        &self,
        _action_id: &str,
        _csrf_token: &str,
        _location: Location,
        _date: NaiveDate,
        _time: &str,
    ) -> Result<u16, AppError> {
        if self.submit_fail {
            return Err(AppError::SubmitRejected(500));
        }
        Ok(200)
    }
}

fn config(locations: Vec<Location>) -> Config {
    Config {
        base_url: "https://portal.test/".into(),
        locations,
        current_appointment_date: "2025-02-28".parse().unwrap(),
        delays: DelayConfig { min_ms: 0, max_ms: 0 },
    }
}

fn context() -> SessionContext {
    let mut ctx = SessionContext::new();
    ctx.set_action_id("41400".into());
    ctx
}

fn day(date: &str) -> AppointmentDay {
    AppointmentDay {
        date: date.parse().unwrap(),
        business_day: true,
    }
}

#[tokio::test]
async fn test_first_location_with_earlier_day_wins() {
    let mut portal = MockPortal::new()
        .with_days(Location::Vancouver, vec![day("2025-03-15")])
        .with_days(Location::Calgary, vec![])
        .with_days(Location::Toronto, vec![day("2025-02-10")])
        .with_days(Location::Ottawa, vec![day("2025-01-02")]);
    let config = config(vec![
        Location::Vancouver,
        Location::Calgary,
        Location::Toronto,
        Location::Ottawa,
    ]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Success);
    let selection = ctx.selection().unwrap();
    assert_eq!(selection.location, Location::Toronto);
    // Ottawa offers an even earlier day but must never be queried.
    assert_eq!(
        portal.queried(),
        vec![Location::Vancouver, Location::Calgary, Location::Toronto]
    );
}

#[tokio::test]
async fn test_one_location_failing_does_not_block_the_rest() {
    let mut portal = MockPortal::new()
        .with_failing_days(Location::Vancouver)
        .with_days(Location::Calgary, vec![day("2025-02-10")]);
    let config = config(vec![Location::Vancouver, Location::Calgary]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Success);
    assert_eq!(ctx.selection().unwrap().location, Location::Calgary);
}

#[tokio::test]
async fn test_day_without_compatible_time_fails_the_cycle() {
    let mut portal = MockPortal::new()
        .with_days(Location::Vancouver, vec![day("2025-02-10")])
        .with_days(Location::Calgary, vec![day("2025-02-11")]);
    portal.times = AppointmentTime {
        available_times: vec![],
        business_times: vec!["09:00".into()],
    };
    let config = config(vec![Location::Vancouver, Location::Calgary]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    // No fallback to Calgary: an empty slot listing ends the cycle.
    assert_eq!(outcome, CycleOutcome::Error);
    assert_eq!(portal.queried(), vec![Location::Vancouver]);
}

#[tokio::test]
async fn test_missing_token_fails_before_any_polling() {
    let mut portal = MockPortal::new().with_days(Location::Vancouver, vec![day("2025-02-10")]);
    portal.csrf = None;
    let config = config(vec![Location::Vancouver]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Error);
    assert!(portal.queried().is_empty());
}

#[tokio::test]
async fn test_empty_poll_increments_retry_count() {
    let mut portal = MockPortal::new().with_days(Location::Vancouver, vec![day("2025-03-15")]);
    let config = config(vec![Location::Vancouver]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Retry);
    assert_eq!(retries, 1);
    assert!(ctx.selection().is_none());
}

#[tokio::test]
async fn test_refresh_at_retry_threshold() {
    let mut portal = MockPortal::new();
    let config = config(vec![Location::Vancouver]);
    let mut ctx = context();
    let mut retries = 9;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Refresh);
    assert_eq!(retries, 10);
}

#[tokio::test]
async fn test_time_listing_failure_is_cycle_error() {
    let mut portal = MockPortal::new().with_days(Location::Ottawa, vec![day("2025-02-10")]);
    portal.times_fail = true;
    let config = config(vec![Location::Ottawa]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;
    assert_eq!(outcome, CycleOutcome::Error);
}

#[tokio::test]
async fn test_submit_failure_is_cycle_error() {
    let mut portal = MockPortal::new().with_days(Location::Ottawa, vec![day("2025-02-10")]);
    portal.submit_fail = true;
    let config = config(vec![Location::Ottawa]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;
    assert_eq!(outcome, CycleOutcome::Error);
}

#[tokio::test]
async fn test_successful_cycle_records_full_selection() {
    let mut portal = MockPortal::new().with_days(Location::Montreal, vec![day("2025-02-10")]);
    let config = config(vec![Location::Montreal]);
    let mut ctx = context();
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Success);
    let selection = ctx.selection().unwrap();
    assert_eq!(selection.location, Location::Montreal);
    assert_eq!(selection.day.date, "2025-02-10".parse::<NaiveDate>().unwrap());
    assert_eq!(selection.time.as_deref(), Some("09:00"));
}

#[tokio::test]
async fn test_stale_selection_cleared_at_cycle_start() {
    let mut portal = MockPortal::new();
    let config = config(vec![Location::Vancouver]);
    let mut ctx = context();
    ctx.select_day(Location::Halifax, day("2025-02-01"));
    let mut retries = 0;

    let outcome = run_cycle(&mut portal, &mut ctx, &config, &mut retries).await;

    assert_eq!(outcome, CycleOutcome::Retry);
    assert!(ctx.selection().is_none());
}
