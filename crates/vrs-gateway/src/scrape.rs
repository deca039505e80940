//! HTML extraction for the handful of server-rendered values the
//! rescheduler needs: the csrf meta tag, the sign-in form's hidden
//! authenticity token, and the group page's continue link.

use std::sync::OnceLock;

use regex::Regex;

fn csrf_meta_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"<meta[^>]*name="csrf-token"[^>]*content="([^"]+)"|<meta[^>]*content="([^"]+)"[^>]*name="csrf-token""#,
        )
        .expect("csrf meta regex is valid")
    })
}

fn authenticity_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"name="authenticity_token"[^>]*value="([^"]+)""#)
            .expect("authenticity token regex is valid")
    })
}

fn continue_href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"href="([^"]*/schedule/\d+/continue_actions)""#)
            .expect("continue href regex is valid")
    })
}

/// The rotating `<meta name="csrf-token">` value, required as the
/// `X-CSRF-Token` header on every appointment endpoint call.
pub fn csrf_token(html: &str) -> Option<String> {
    csrf_meta_regex().captures(html).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    })
}

/// The hidden `authenticity_token` field of the sign-in form.
pub fn authenticity_token(html: &str) -> Option<String> {
    authenticity_token_regex()
        .captures(html)
        .map(|caps| caps[1].to_string())
}

/// The group page's continue link, which leads to
/// `/schedule/XXX/continue_actions` and so carries the action id.
pub fn continue_href(html: &str) -> Option<String> {
    continue_href_regex()
        .captures(html)
        .map(|caps| caps[1].to_string())
}
