use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

static CLOSING_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)").unwrap());
static DISTANCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\d.]+)\s*mi").unwrap());
static LEADING_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)").unwrap());

/// Lowercased, trimmed, de-duplicated vibe tags in authored order.
pub type VibeSet = IndexSet<String>;

/// Split raw tags on commas into a lowercase set. Empty input → empty set.
pub fn vibe_set_of(raw_tags: &str) -> VibeSet {
    raw_tags
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Split raw tags on commas keeping their authored case.
pub fn split_tags(raw_tags: &str) -> Vec<String> {
    raw_tags
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse free-text closing times such as "2:00 AM" or "11pm" into minutes
/// since midnight. 12 AM is 0, 12 PM is 720. `None` when nothing matches.
pub fn parse_closing_minutes(text: &str) -> Option<u32> {
    let text = text.trim().to_lowercase();
    let caps = CLOSING_TIME.captures(&text)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    match &caps[3] {
        "pm" if hour != 12 => hour += 12,
        "am" if hour == 12 => hour = 0,
        _ => {}
    }
    Some(hour * 60 + minute)
}

/// Extract the first number followed by "mi" ("2.1 mi", "3.7 miles").
pub fn parse_distance_miles(text: &str) -> Option<f64> {
    let text = text.trim().to_lowercase();
    let caps = DISTANCE.captures(&text)?;
    let number = LEADING_FLOAT.find(&caps[1])?;
    number.as_str().parse().ok()
}
