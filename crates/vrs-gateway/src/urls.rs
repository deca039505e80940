//! Portal URL construction and post-navigation URL checks.

use std::sync::OnceLock;

use regex::Regex;

/// Form keys for the appointment submission POST.
pub mod form_keys {
    pub const AUTHENTICITY_TOKEN: &str = "authenticity_token";
    pub const CONFIRMED_LIMIT_MESSAGE: &str = "confirmed_limit_message";
    pub const USE_CONSULATE_CAPACITY: &str = "use_consulate_appointment_capacity";
    pub const FACILITY_ID: &str = "appointments[consulate_appointment][facility_id]";
    pub const DATE: &str = "appointments[consulate_appointment][date]";
    pub const TIME: &str = "appointments[consulate_appointment][time]";
}

pub fn sign_in_url(base: &str) -> String {
    format!("{base}users/sign_in")
}

pub fn appointment_url(base: &str, action_id: &str) -> String {
    format!("{base}schedule/{action_id}/appointment")
}

pub fn days_url(base: &str, action_id: &str, facility_id: u32) -> String {
    format!(
        "{base}schedule/{action_id}/appointment/days/{facility_id}.json?appointments[expedite]=false"
    )
}

pub fn times_url(base: &str, action_id: &str, facility_id: u32, date: &str) -> String {
    format!(
        "{base}schedule/{action_id}/appointment/times/{facility_id}.json?date={date}&appointments[expedite]=false"
    )
}

fn groups_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/groups/\d+$").expect("groups regex is valid"))
}

fn appointment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/schedule/\d+/appointment$").expect("appointment regex is valid"))
}

fn action_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/schedule/(\d+)/continue_actions$").expect("action id regex is valid")
    })
}

/// Post-login landing check: the group (home) page.
pub fn is_groups_url(url: &str) -> bool {
    groups_regex().is_match(url)
}

/// Check that navigation arrived at the reschedule appointment page.
pub fn is_appointment_url(url: &str) -> bool {
    appointment_regex().is_match(url)
}

/// Pulls the active schedule's action id out of a
/// `/schedule/XXX/continue_actions` URL.
pub fn extract_action_id(url: &str) -> Option<String> {
    action_id_regex()
        .captures(url)
        .map(|caps| caps[1].to_string())
}
