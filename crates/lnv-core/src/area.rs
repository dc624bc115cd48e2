//! Neighborhood profiles for side-by-side comparison.

use indexmap::IndexMap;
use serde::Serialize;

use crate::time::{NightWindow, minutes_to_label};
use crate::venue::Venue;

const TOP_CATEGORIES: usize = 5;
const TOP_VIBES: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaProfile {
    pub name: String,
    pub total: usize,
    /// (category, count), most common first.
    pub top_categories: Vec<(String, usize)>,
    /// (tag, count), most common first. Tags keep their authored case.
    pub top_vibes: Vec<(String, usize)>,
    pub latest_close: String,
    pub earliest_close: String,
    pub avg_distance: String,
    pub category_count: usize,
}

/// Summarize the venues whose area equals `area` exactly.
/// `None` when the area has no venues.
pub fn analyze_area(venues: &[Venue], area: &str, window: &NightWindow) -> Option<AreaProfile> {
    let in_area: Vec<&Venue> = venues.iter().filter(|v| v.area == area).collect();
    if in_area.is_empty() {
        return None;
    }

    let categories = count(
        in_area
            .iter()
            .map(|v| v.category.as_str())
            .filter(|c| !c.is_empty()),
    );
    let vibes = count(in_area.iter().flat_map(|v| v.vibe_tags.iter().map(String::as_str)));

    let closings: Vec<u32> = in_area
        .iter()
        .filter_map(|v| v.closing_minutes)
        .map(|m| window.closing_on_night(m))
        .collect();
    let close_label = |m: Option<&u32>| {
        m.map(|&m| minutes_to_label(m as i64))
            .unwrap_or_else(|| "Unknown".to_string())
    };

    let distances: Vec<f64> = in_area.iter().filter_map(|v| v.distance_miles).collect();
    let avg_distance = if distances.is_empty() {
        "N/A".to_string()
    } else {
        let avg = distances.iter().sum::<f64>() / distances.len() as f64;
        format!("{avg:.1} mi")
    };

    Some(AreaProfile {
        name: area.to_string(),
        total: in_area.len(),
        category_count: categories.len(),
        top_categories: top(&categories, TOP_CATEGORIES),
        top_vibes: top(&vibes, TOP_VIBES),
        latest_close: close_label(closings.iter().max()),
        earliest_close: close_label(closings.iter().min()),
        avg_distance,
    })
}

fn count<'a>(items: impl Iterator<Item = &'a str>) -> IndexMap<&'a str, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Highest counts first; ties keep first-seen order.
fn top(counts: &IndexMap<&str, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts
        .iter()
        .map(|(k, &c)| (k.to_string(), c))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}
