//! Pure day and time selection over freshly polled listings.

use chrono::NaiveDate;

use vrs_core::AppointmentDay;

/// First day, in received order, that is a business day strictly
/// earlier than `threshold`.
///
/// The input is scanned exactly as the portal returned it; no sort is
/// applied, so the result depends on remote ordering. That is a
/// property of the portal's listing, not something corrected here.
pub fn find_earlier_day(days: &[AppointmentDay], threshold: NaiveDate) -> Option<&AppointmentDay> {
    days.iter()
        .find(|day| day.business_day && day.date < threshold)
}

/// First element of `available` that also occurs in `preferred`.
///
/// The tie-break is purely positional in `available`; the order of
/// `preferred` never matters.
pub fn find_compatible_time<'a>(available: &'a [String], preferred: &[String]) -> Option<&'a str> {
    available
        .iter()
        .find(|time| preferred.contains(time))
        .map(String::as_str)
}
