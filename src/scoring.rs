//! Recency-decayed popularity scoring.
//!
//! The search provider reports popularity and age as display text
//! ("1.2M views", "3 days ago"), so scoring starts from two lossy parsers.
//! Unparsable input degrades to a neutral value instead of failing: a video
//! with unreadable metadata scores 0 rather than sinking the whole result
//! list.

use regex::Regex;

/// Parse a human-readable view count ("1.2M views", "500K views",
/// "1,234,567 views", "10 views") into an integer. Unparsable input is 0.
pub fn parse_view_count(text: &str) -> u64 {
    let mut t = text.trim().to_ascii_lowercase();
    if let Some(stripped) = t.strip_suffix(" views") {
        t = stripped.to_string();
    } else if let Some(stripped) = t.strip_suffix(" view") {
        t = stripped.to_string();
    }
    t = t.replace(',', "");

    let mut multiplier = 1.0f64;
    if let Some(stripped) = t.strip_suffix('b') {
        multiplier = 1e9;
        t = stripped.to_string();
    } else if let Some(stripped) = t.strip_suffix('m') {
        multiplier = 1e6;
        t = stripped.to_string();
    } else if let Some(stripped) = t.strip_suffix('k') {
        multiplier = 1e3;
        t = stripped.to_string();
    }

    match t.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => (n * multiplier).round() as u64,
        _ => 0,
    }
}

/// Parse a relative publish time ("3 days ago", "2 weeks ago") into an age
/// in days.
///
/// Sub-day phrases map to 0. A recognized unit with an unreadable count
/// falls back to one unit's worth of days; a phrase with no recognized unit
/// at all is treated as a year old.
pub fn parse_age_days(text: &str) -> f64 {
    let t = text.trim().to_ascii_lowercase();
    let count = Regex::new(r"\d+")
        .unwrap()
        .find(&t)
        .and_then(|m| m.as_str().parse::<f64>().ok());

    if t.contains("second") || t.contains("minute") || t.contains("hour") {
        0.0
    } else if t.contains("day") {
        count.unwrap_or(1.0)
    } else if t.contains("week") {
        count.map(|n| n * 7.0).unwrap_or(7.0)
    } else if t.contains("month") {
        count.map(|n| n * 30.0).unwrap_or(30.0)
    } else if t.contains("year") {
        count.map(|n| n * 365.0).unwrap_or(365.0)
    } else {
        365.0
    }
}

/// Views divided by (age + 1), with zero-age clamped to half a day so very
/// fresh uploads get boosted instead of dividing by ~1.
pub fn popularity_score(views: u64, age_days: f64) -> f64 {
    let age = if age_days == 0.0 { 0.5 } else { age_days };
    views as f64 / (age + 1.0)
}
