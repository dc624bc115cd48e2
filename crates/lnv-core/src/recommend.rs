//! Venue similarity: rank every venue against a base venue.
//!
//! Composite score = 0.5·vibe + 0.2·category + 0.2·area + 0.1·distance,
//! where vibe is the Jaccard index of the two tag sets and distance is
//! closeness of driving distances relative to the caller's cap.

use serde::Serialize;

use crate::constants::{
    AREA_WEIGHT, CATEGORY_WEIGHT, DISTANCE_PRIOR, DISTANCE_WEIGHT, VIBE_WEIGHT,
};
use crate::parse::VibeSet;
use crate::venue::Venue;

/// Sub-scores and total as integer percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub vibe: u8,
    pub category: u8,
    pub area: u8,
    pub distance: u8,
    pub total: u8,
}

/// One ranked candidate. Lives for a single scoring call.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredCandidate<'a> {
    pub venue: &'a Venue,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub reason: String,
}

/// Rank `venues` by similarity to `base`, best first, at most `max_results`.
///
/// The base itself (by name) and unnamed venues are skipped. When both the
/// candidate and the base have a known distance and `max_distance` is set,
/// candidates beyond it are dropped before scoring.
pub fn compute_recommendations<'a>(
    venues: &'a [Venue],
    base: &Venue,
    max_distance: Option<f64>,
    max_results: usize,
) -> Vec<ScoredCandidate<'a>> {
    if max_results == 0 {
        return Vec::new();
    }

    let base_vibes = base.vibe_set();

    let mut scored: Vec<ScoredCandidate<'a>> = venues
        .iter()
        .filter(|v| v.has_name() && v.name != base.name)
        .filter(|v| !beyond_cap(v, base, max_distance))
        .map(|v| score_candidate(v, base, &base_vibes, max_distance))
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(max_results);
    scored
}

fn beyond_cap(candidate: &Venue, base: &Venue, max_distance: Option<f64>) -> bool {
    match (candidate.distance_miles, base.distance_miles, max_distance) {
        (Some(dist), Some(_), Some(cap)) => dist > cap,
        _ => false,
    }
}

fn score_candidate<'a>(
    candidate: &'a Venue,
    base: &Venue,
    base_vibes: &VibeSet,
    max_distance: Option<f64>,
) -> ScoredCandidate<'a> {
    let candidate_vibes = candidate.vibe_set();
    let shared: Vec<&str> = candidate_vibes
        .iter()
        .filter(|t| base_vibes.contains(*t))
        .map(String::as_str)
        .collect();

    let vibe = jaccard(&candidate_vibes, base_vibes);
    let category = same_text(&candidate.category, &base.category);
    let area = same_text(&candidate.area, &base.area);
    let distance = distance_score(candidate.distance_miles, base.distance_miles, max_distance);

    let score = vibe * VIBE_WEIGHT
        + category * CATEGORY_WEIGHT
        + area * AREA_WEIGHT
        + distance * DISTANCE_WEIGHT;

    let breakdown = ScoreBreakdown {
        vibe: percent(vibe),
        category: percent(category),
        area: percent(area),
        distance: percent(distance),
        total: percent(score),
    };

    ScoredCandidate {
        venue: candidate,
        score,
        breakdown,
        reason: reason(&shared, category > 0.0, area > 0.0, &candidate.area),
    }
}

/// Intersection over union; 0 when both sets are empty.
pub fn jaccard(a: &VibeSet, b: &VibeSet) -> f64 {
    let intersection = a.iter().filter(|t| b.contains(*t)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn same_text(a: &str, b: &str) -> f64 {
    if a.trim().to_lowercase() == b.trim().to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Closeness of two driving distances relative to the cap. Falls back to
/// the neutral prior when any input is unknown or the cap is zero.
pub fn distance_score(candidate: Option<f64>, base: Option<f64>, max_distance: Option<f64>) -> f64 {
    match (candidate, base, max_distance) {
        (Some(c), Some(b), Some(cap)) if cap != 0.0 && !cap.is_nan() => {
            1.0 - ((c - b).abs() / cap).min(1.0)
        }
        _ => DISTANCE_PRIOR,
    }
}

fn percent(x: f64) -> u8 {
    (x * 100.0).round().clamp(0.0, 100.0) as u8
}

fn reason(shared: &[&str], same_category: bool, same_area: bool, candidate_area: &str) -> String {
    let vibes = match shared.len() {
        0 => "Different vibe mix".to_string(),
        1 => format!("1 shared vibe: {}", shared[0]),
        n => format!("{n} shared vibes: {}", shared.join(", ")),
    };
    let category = if same_category {
        "Same category"
    } else {
        "Different category"
    };
    // When areas differ, say where the candidate actually is.
    let area = if same_area {
        "Same neighborhood"
    } else {
        candidate_area.trim()
    };
    format!("{vibes} · {category} · {area}")
}
