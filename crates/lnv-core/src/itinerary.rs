//! Night itinerary generation: slot-based greedy selection over a randomized
//! top-K pool, with lock / shuffle / swap session semantics.
//!
//! A plan is a fixed row of time slots. Each slot is bound to one phase of
//! the chosen [`VibeArc`] and holds at most one venue. Slots that found no
//! candidate stay empty so the windows of later slots never shift.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arc::{Phase, VibeArc, phase_index};
use crate::constants::{
    CLOSING_PENALTY, DAY_MINUTES, DIVERSITY_CAP, DIVERSITY_DIVISOR, MAX_STOPS, PICK_POOL,
    PROXIMITY_BONUS,
};
use crate::time::{NightWindow, minutes_to_label, parse_hhmm};
use crate::venue::Venue;

/// Inputs for a full build.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItineraryParams {
    /// Start of the night, minutes since midnight.
    pub start: u32,
    /// End of the night. At or before `start` means the next day.
    pub end: u32,
    pub stop_count: usize,
    pub arc: VibeArc,
    /// Restrict candidates to one neighborhood (exact match).
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub window: NightWindow,
}

impl ItineraryParams {
    /// Build params from `HH:MM` clock strings.
    /// Returns `None` if either time fails to parse.
    pub fn from_clock(
        start: &str,
        end: &str,
        stop_count: usize,
        arc: VibeArc,
        area: Option<&str>,
    ) -> Option<Self> {
        Some(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
            stop_count,
            arc,
            area: area
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            window: NightWindow::default(),
        })
    }

    /// End minute on the same timeline as `start`.
    pub fn end_on_night(&self) -> u32 {
        if self.end <= self.start {
            self.end + DAY_MINUTES
        } else {
            self.end
        }
    }

    /// Slots a plan actually allocates, clamped to [`MAX_STOPS`].
    pub fn slot_count(&self) -> usize {
        self.stop_count.min(MAX_STOPS)
    }

    pub fn slot_duration(&self) -> u32 {
        match u32::try_from(self.slot_count()) {
            Ok(0) | Err(_) => 0,
            Ok(n) => self.end_on_night().saturating_sub(self.start) / n,
        }
    }
}

/// One time slot of a plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub phase_index: usize,
    pub venue: Option<Venue>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItineraryPlan {
    pub arc: VibeArc,
    pub start: u32,
    pub slot_duration: u32,
    pub slots: Vec<Slot>,
}

/// A filled slot, resolved against its phase and time window.
#[derive(Clone, Copy, Debug)]
pub struct Stop<'a> {
    /// Slot index within the plan.
    pub index: usize,
    pub venue: &'a Venue,
    pub phase: &'static Phase,
    pub start: u32,
    pub end: u32,
}

impl Stop<'_> {
    /// Phase vibes this venue actually carries.
    pub fn matched_vibes(&self) -> Vec<&'static str> {
        let tags = self.venue.vibe_set();
        self.phase
            .vibes
            .iter()
            .copied()
            .filter(|t| tags.contains(*t))
            .collect()
    }

    /// Short "why here" line for the stop card.
    pub fn reason(&self) -> String {
        let matched = self.matched_vibes();
        if matched.is_empty() {
            "Good variety pick".to_string()
        } else {
            matched.join(", ")
        }
    }

    pub fn time_label(&self) -> String {
        format!(
            "{}–{}",
            minutes_to_label(self.start as i64),
            minutes_to_label(self.end as i64)
        )
    }
}

impl ItineraryPlan {
    pub fn phase(&self, slot: usize) -> &'static Phase {
        self.arc.phase(self.slots.get(slot).map_or(0, |s| s.phase_index))
    }

    /// `(start, end)` minutes of a slot on the night timeline.
    pub fn slot_window(&self, slot: usize) -> (u32, u32) {
        let start = self.start + slot as u32 * self.slot_duration;
        (start, start + self.slot_duration)
    }

    pub fn venue_at(&self, slot: usize) -> Option<&Venue> {
        self.slots.get(slot).and_then(|s| s.venue.as_ref())
    }

    /// Filled slots in order.
    pub fn stops(&self) -> impl Iterator<Item = Stop<'_>> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let venue = slot.venue.as_ref()?;
            let (start, end) = self.slot_window(index);
            Some(Stop {
                index,
                venue,
                phase: self.arc.phase(slot.phase_index),
                start,
                end,
            })
        })
    }

    pub fn venues(&self) -> Vec<&Venue> {
        self.stops().map(|s| s.venue).collect()
    }

    pub fn stop_count(&self) -> usize {
        self.slots.iter().filter(|s| s.venue.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_count() == 0
    }

    /// Plain-text plan for pasting into a group chat.
    pub fn share_text(&self) -> String {
        let mut text = String::from("My Late Night Vibes plan:");
        for (n, stop) in self.stops().enumerate() {
            text.push('\n');
            text.push_str(&format!(
                "{}. {} ({}) — {}, {}",
                n + 1,
                stop.venue.name,
                stop.time_label(),
                stop.venue.area,
                stop.venue.category
            ));
        }
        text
    }
}

/// Travel note between consecutive stops.
pub fn connector(from: &Venue, to: &Venue) -> String {
    if from.area == to.area {
        "Same neighborhood".to_string()
    } else {
        format!("{} → {}", from.area, to.area)
    }
}

/// Generate a fresh plan with nothing locked.
pub fn generate_itinerary(
    venues: &[Venue],
    params: &ItineraryParams,
    rng: &mut impl Rng,
) -> ItineraryPlan {
    generate_with_locks(venues, params, None, &BTreeSet::new(), rng)
}

fn generate_with_locks(
    venues: &[Venue],
    params: &ItineraryParams,
    previous: Option<&ItineraryPlan>,
    locked: &BTreeSet<usize>,
    rng: &mut impl Rng,
) -> ItineraryPlan {
    let slot_duration = params.slot_duration();
    let area = params.area.as_deref().map(str::trim).filter(|a| !a.is_empty());

    let candidates: Vec<&Venue> = venues
        .iter()
        .filter(|v| v.has_name())
        .filter(|v| area.is_none_or(|a| v.area == a))
        .collect();

    let slot_count = params.slot_count();
    let mut slots: Vec<Slot> = (0..slot_count)
        .map(|i| Slot {
            phase_index: phase_index(i, slot_count),
            venue: None,
        })
        .collect();

    // Locked slots first so their names are reserved before any pick.
    let mut used: HashSet<String> = HashSet::new();
    for &i in locked {
        if let Some(prev) = previous
            && let Some(venue) = prev.venue_at(i)
            && let Some(slot) = slots.get_mut(i)
        {
            used.insert(venue.name.clone());
            slot.venue = Some(venue.clone());
        }
    }

    for idx in 0..slots.len() {
        if slots[idx].venue.is_some() {
            continue;
        }
        let phase = params.arc.phase(slots[idx].phase_index);
        let slot_end = params.start + (idx as u32 + 1) * slot_duration;
        let prev_area = idx
            .checked_sub(1)
            .and_then(|p| slots[p].venue.as_ref())
            .map(|v| v.area.as_str());

        let mut scored: Vec<(f64, &Venue)> = candidates
            .iter()
            .filter(|v| !used.contains(&v.name))
            .map(|v| (slot_score(v, phase, prev_area, slot_end, &params.window), *v))
            .collect();
        if scored.is_empty() {
            continue;
        }
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let pool = scored.len().min(PICK_POOL);
        let (_, pick) = scored[rng.random_range(0..pool)];
        used.insert(pick.name.clone());
        slots[idx].venue = Some(pick.clone());
    }

    ItineraryPlan {
        arc: params.arc,
        start: params.start,
        slot_duration,
        slots,
    }
}

/// Fitness of `venue` for one slot. Higher is better; a venue that closes
/// before the slot ends is pushed down hard but never excluded.
pub fn slot_score(
    venue: &Venue,
    phase: &Phase,
    prev_area: Option<&str>,
    slot_end: u32,
    window: &NightWindow,
) -> f64 {
    let tags = venue.vibe_set();
    let matched = phase.vibes.iter().filter(|t| tags.contains(**t)).count();
    let vibe_match = matched as f64 / phase.vibes.len() as f64;
    let diversity = (tags.len() as f64 / DIVERSITY_DIVISOR).min(DIVERSITY_CAP);
    let proximity = match prev_area {
        Some(area) if area == venue.area => PROXIMITY_BONUS,
        _ => 0.0,
    };
    let closing = match venue.closing_minutes {
        Some(c) if window.closing_on_night(c) < slot_end => CLOSING_PENALTY,
        _ => 0.0,
    };
    vibe_match + diversity + proximity + closing
}

/// Caller-owned planner state: the last plan, its params, and locked slots.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySession {
    #[serde(default)]
    params: Option<ItineraryParams>,
    #[serde(default)]
    plan: Option<ItineraryPlan>,
    #[serde(default)]
    locked: BTreeSet<usize>,
}

impl ItinerarySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&ItineraryPlan> {
        self.plan.as_ref()
    }

    pub fn params(&self) -> Option<&ItineraryParams> {
        self.params.as_ref()
    }

    pub fn locked(&self) -> &BTreeSet<usize> {
        &self.locked
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.locked.contains(&slot)
    }

    /// Full regeneration. Clears every lock.
    pub fn build(
        &mut self,
        venues: &[Venue],
        params: ItineraryParams,
        rng: &mut impl Rng,
    ) -> &ItineraryPlan {
        self.locked.clear();
        let plan = generate_itinerary(venues, &params, rng);
        self.params = Some(params);
        self.plan.insert(plan)
    }

    /// Regenerate with the last params, keeping locked slots.
    /// `None` if nothing has been built yet.
    pub fn shuffle(&mut self, venues: &[Venue], rng: &mut impl Rng) -> Option<&ItineraryPlan> {
        let params = self.params.as_ref()?;
        let plan = generate_with_locks(venues, params, self.plan.as_ref(), &self.locked, rng);
        Some(self.plan.insert(plan))
    }

    /// Flip the lock flag on a slot; returns the new state.
    pub fn toggle_lock(&mut self, slot: usize) -> bool {
        if self.locked.remove(&slot) {
            false
        } else {
            self.locked.insert(slot);
            true
        }
    }

    pub fn lock(&mut self, slot: usize) {
        self.locked.insert(slot);
    }

    pub fn unlock(&mut self, slot: usize) {
        self.locked.remove(&slot);
    }

    /// Exchange the venues of two slots. Phases, windows, and locks stay put.
    /// Returns `false` (and changes nothing) if either slot is empty.
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        let Some(plan) = self.plan.as_mut() else {
            return false;
        };
        if plan.venue_at(i).is_none() || plan.venue_at(j).is_none() {
            return false;
        }
        if i != j {
            let a = plan.slots[i].venue.take();
            plan.slots[i].venue = plan.slots[j].venue.take();
            plan.slots[j].venue = a;
        }
        true
    }

    /// Replace the current plan, e.g. one opened from a share token.
    /// Locks are cleared; shuffle stays unavailable until the next build.
    pub fn adopt(&mut self, plan: ItineraryPlan) {
        self.locked.clear();
        self.params = None;
        self.plan = Some(plan);
    }
}
