//! Live viability hints and travel-time heuristics.

use serde::Serialize;

use crate::constants::{
    BUSY_FROM, BUSY_UNTIL, CROSS_AREA_TRAVEL, KITCHEN_LAST_CALL, KITCHEN_OPENS_AT,
    LINE_RISK_FROM, SAME_AREA_TRAVEL, UNKNOWN_DISTANCE_TRAVEL,
};
use crate::time::NightWindow;
use crate::venue::Venue;

/// Month the bundled dataset was last checked.
pub const DATASET_VERIFIED: &str = "Feb 2026";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Badge {
    CoverLikely,
    KitchenOpen,
    LikelyBusy,
    LineRisk,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::CoverLikely => "Cover likely",
            Badge::KitchenOpen => "Kitchen open",
            Badge::LikelyBusy => "Likely busy",
            Badge::LineRisk => "Line risk",
        }
    }
}

pub fn trust_label() -> String {
    format!("Verified {DATASET_VERIFIED}")
}

/// Badges for `venue` at wall-clock `now_minute`.
pub fn viability_badges(venue: &Venue, now_minute: u32, window: &NightWindow) -> Vec<Badge> {
    let category = venue.category.to_lowercase();
    let tags = venue.vibe_set();
    let now = window.now_on_night(now_minute);
    let nightclub = category.contains("nightclub");

    let mut badges = Vec::new();
    if category.contains("club") {
        badges.push(Badge::CoverLikely);
    }
    if (tags.contains("late-eats") || tags.contains("food-focused"))
        && let Some(closing) = venue.closing_minutes
    {
        let close = window.closing_on_night(closing);
        if now >= KITCHEN_OPENS_AT && now + KITCHEN_LAST_CALL < close {
            badges.push(Badge::KitchenOpen);
        }
    }
    if (nightclub || (tags.contains("dancey") && tags.contains("high-energy")))
        && (BUSY_FROM..=BUSY_UNTIL).contains(&now)
    {
        badges.push(Badge::LikelyBusy);
    }
    if nightclub && now >= LINE_RISK_FROM {
        badges.push(Badge::LineRisk);
    }
    badges
}

/// Flat neighborhood heuristic.
pub fn estimate_travel_minutes(a: &Venue, b: &Venue) -> u32 {
    if a.area == b.area {
        SAME_AREA_TRAVEL
    } else {
        CROSS_AREA_TRAVEL
    }
}

/// Heuristic from two driving distances out of the city center.
pub fn estimate_travel_from_distance(a: Option<f64>, b: Option<f64>) -> u32 {
    match (a, b) {
        (Some(a), Some(b)) => (5.0 + (a - b).abs() * 4.0).ceil() as u32,
        _ => UNKNOWN_DISTANCE_TRAVEL,
    }
}
