//! Clock-of-day helpers for a night that runs past midnight.
//!
//! All times of day are minutes since midnight. A night is modelled as a
//! single stretch of minutes: anything early enough in the morning is
//! shifted by a day so that 2 AM sorts after 11 PM.

use serde::{Deserialize, Serialize};

use crate::constants::DAY_MINUTES;

/// Nightlife operating-hours assumptions.
///
/// These are product heuristics, so they live in config rather than code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightWindow {
    /// A closing time at or before this minute belongs to the previous night.
    pub after_midnight_cutoff: u32,
    /// Venues are assumed open from this minute.
    pub opens_at: u32,
    /// A wall-clock "now" before this minute still belongs to last night.
    pub day_rollover: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            after_midnight_cutoff: 6 * 60,
            opens_at: 17 * 60,
            day_rollover: 9 * 60,
        }
    }
}

impl NightWindow {
    /// Closing minute on the night timeline (2 AM → 1560).
    pub fn closing_on_night(&self, closing: u32) -> u32 {
        if closing <= self.after_midnight_cutoff {
            closing + DAY_MINUTES
        } else {
            closing
        }
    }

    /// Wall-clock minute on the night timeline (1 AM → 1500, 8 PM → 1200).
    pub fn now_on_night(&self, now: u32) -> u32 {
        if now < self.day_rollover {
            now + DAY_MINUTES
        } else {
            now
        }
    }

    /// Whether a venue closing at `closing` is open at `now`.
    /// `None` when the closing time is unknown.
    pub fn is_open(&self, closing: Option<u32>, now: u32) -> Option<bool> {
        let closing = self.closing_on_night(closing?);
        let now = self.now_on_night(now);
        Some(now >= self.opens_at && now < closing)
    }
}

/// Parse a 24-hour `HH:MM` string into minutes since midnight.
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let (h, m) = text.trim().split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if h >= 24 || m >= 60 {
        return None;
    }
    Some(h * 60 + m)
}

/// Render minutes as a 12-hour label, wrapping into a single day.
pub fn minutes_to_label(mins: i64) -> String {
    let mins = mins.rem_euclid(DAY_MINUTES as i64);
    let h = mins / 60;
    let m = mins % 60;
    let meridiem = if h >= 12 { "PM" } else { "AM" };
    let h = match h {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{h}:{m:02} {meridiem}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("21:00"), Some(1260));
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("02:30"), Some(150));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
    }

    #[test]
    fn test_parse_hhmm_rejects_garbage() {
        assert_eq!(parse_hhmm(""), None);
        assert_eq!(parse_hhmm("9pm"), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
    }

    #[test]
    fn test_minutes_to_label() {
        assert_eq!(minutes_to_label(0), "12:00 AM");
        assert_eq!(minutes_to_label(720), "12:00 PM");
        assert_eq!(minutes_to_label(1260), "9:00 PM");
        assert_eq!(minutes_to_label(60), "1:00 AM");
        assert_eq!(minutes_to_label(1410), "11:30 PM");
    }

    #[test]
    fn test_minutes_to_label_wraps() {
        assert_eq!(minutes_to_label(1440 + 90), "1:30 AM");
        assert_eq!(minutes_to_label(-60), "11:00 PM");
    }

    #[test]
    fn test_closing_on_night() {
        let w = NightWindow::default();
        assert_eq!(w.closing_on_night(120), 1560);
        assert_eq!(w.closing_on_night(360), 1800);
        assert_eq!(w.closing_on_night(361), 361);
        assert_eq!(w.closing_on_night(1380), 1380);
    }

    #[test]
    fn test_is_open() {
        let w = NightWindow::default();
        // 2 AM close, 11 PM now
        assert_eq!(w.is_open(Some(120), 23 * 60), Some(true));
        // 2 AM close, 1 AM now
        assert_eq!(w.is_open(Some(120), 60), Some(true));
        // 2 AM close, 3 AM now
        assert_eq!(w.is_open(Some(120), 180), Some(false));
        // before the 5 PM baseline
        assert_eq!(w.is_open(Some(120), 15 * 60), Some(false));
        assert_eq!(w.is_open(None, 23 * 60), None);
    }

    #[test]
    fn test_custom_cutoff() {
        let w = NightWindow {
            after_midnight_cutoff: 120,
            ..NightWindow::default()
        };
        assert_eq!(w.closing_on_night(120), 1560);
        assert_eq!(w.closing_on_night(180), 180);
    }
}
