//! Terminal formatting for command output.

use std::collections::BTreeSet;
use std::fmt::Write;

use lnv_core::badges::trust_label;
use lnv_core::{
    AreaProfile, BrowseContext, CrawlHistory, ItineraryPlan, OpenStatus, Rating, ScoredCandidate,
    Venue, areas, categories, collect_vibes, connector, estimate_travel_minutes, viability_badges,
};

pub fn rating_label(rating: Rating) -> &'static str {
    match rating {
        Rating::Up => "liked",
        Rating::Down => "disliked",
        Rating::Neutral => "unrated",
    }
}

fn venue_line(venue: &Venue) -> String {
    format!(
        "{} · {} · {} · closes {}",
        venue.area,
        venue.category,
        venue.distance_label(),
        venue.closing_label()
    )
}

pub fn recommendations(base: &Venue, recs: &[ScoredCandidate<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Because you like {} ({}):", base.name, venue_line(base));
    if recs.is_empty() {
        let _ = writeln!(out, "  no similar venues found");
        return out;
    }
    for (n, rec) in recs.iter().enumerate() {
        let b = rec.breakdown;
        let _ = writeln!(out, "{:>2}. {}  [{}%]", n + 1, rec.venue.name, rec.score);
        let _ = writeln!(out, "    {}", venue_line(rec.venue));
        let _ = writeln!(out, "    {}", rec.reason);
        let _ = writeln!(
            out,
            "    vibe {} · category {} · area {} · distance {}",
            b.vibe, b.category, b.area, b.distance
        );
    }
    out
}

pub fn plan(plan: &ItineraryPlan, locked: &BTreeSet<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} · {} of {} stops · {} min each",
        plan.arc,
        plan.stop_count(),
        plan.slots.len(),
        plan.slot_duration
    );

    let mut previous: Option<&Venue> = None;
    for (index, slot) in plan.slots.iter().enumerate() {
        let phase = plan.phase(index);
        let lock = if locked.contains(&index) { "  [locked]" } else { "" };
        let _ = writeln!(out);
        let _ = writeln!(out, "Stop {} · {}{lock}", index + 1, phase.label);

        let Some(venue) = slot.venue.as_ref() else {
            let _ = writeln!(out, "  (no venue fits this slot)");
            continue;
        };
        if let Some(prev) = previous {
            let _ = writeln!(
                out,
                "  from {}: {} · ~{} min",
                prev.name,
                connector(prev, venue),
                estimate_travel_minutes(prev, venue)
            );
        }
        let stop = plan.stops().find(|s| s.index == index);
        let times = stop.map(|s| s.time_label()).unwrap_or_default();
        let _ = writeln!(out, "  {}  {times}", venue.name);
        let _ = writeln!(out, "  {}", venue_line(venue));
        if let Some(stop) = stop {
            let _ = writeln!(out, "  why: {}", stop.reason());
        }
        if !venue.maps_link.is_empty() {
            let _ = writeln!(out, "  directions: {}", venue.maps_link);
        }
        previous = Some(venue);
    }
    out
}

pub fn browse(hits: &[&Venue], ctx: &BrowseContext<'_>) -> String {
    let mut out = String::new();
    for venue in hits {
        let mut marks = vec![OpenStatus::of(venue, ctx.now_minute, &ctx.window)
            .label()
            .to_string()];
        marks.extend(
            viability_badges(venue, ctx.now_minute, &ctx.window)
                .into_iter()
                .map(|b| b.label().to_string()),
        );
        if ctx.favorites.contains(&venue.name) {
            marks.push("saved".to_string());
        }
        if ctx.history.is_visited(&venue.name) {
            marks.push(format!(
                "been there, {}",
                rating_label(ctx.history.rating(&venue.name))
            ));
        }
        let _ = writeln!(out, "{}  [{}]", venue.name, marks.join("] ["));
        let _ = writeln!(out, "  {} · {}", venue_line(venue), venue.raw_tags());
    }
    out
}

pub fn history(history: &CrawlHistory) -> String {
    let stats = history.stats();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} visited · {} liked · {} disliked · {} unrated",
        stats.total, stats.liked, stats.disliked, stats.unrated
    );
    for (name, visit) in history.iter() {
        let _ = writeln!(
            out,
            "  {name}  {}  {}",
            rating_label(visit.rating),
            visit.visited_at
        );
    }
    out
}

fn counted(items: &[(String, usize)]) -> String {
    items
        .iter()
        .map(|(name, n)| format!("{name} ({n})"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn area_profile(profile: &AreaProfile, open_now: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} venues, {} open now",
        profile.name, profile.total, open_now
    );
    let _ = writeln!(
        out,
        "  {} categories: {}",
        profile.category_count,
        counted(&profile.top_categories)
    );
    let _ = writeln!(out, "  vibes: {}", counted(&profile.top_vibes));
    let _ = writeln!(
        out,
        "  closing: earliest {} · latest {}",
        profile.earliest_close, profile.latest_close
    );
    let _ = writeln!(out, "  average distance: {}", profile.avg_distance);
    let _ = writeln!(out);
    out
}

pub fn info(venues: &[Venue]) -> String {
    let areas = areas(venues);
    let categories = categories(venues);
    let vibes = collect_vibes(venues);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} venues · {} areas · {} categories · {} vibes · {}",
        venues.len(),
        areas.len(),
        categories.len(),
        vibes.len(),
        trust_label()
    );
    let _ = writeln!(out, "areas: {}", areas.join(", "));
    let _ = writeln!(out, "categories: {}", categories.join(", "));
    let _ = writeln!(
        out,
        "vibes: {}",
        vibes.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnv_core::{Favorites, NightWindow, Slot, VibeArc};

    fn venues() -> Vec<Venue> {
        vec![
            Venue::new("Lantern", "Capitol Hill", "Cocktail Bar", "chill, date-friendly")
                .with_closing_time("1:00 AM")
                .with_distance("1.0 mi"),
            Venue::new("Pulse", "Belltown", "Nightclub", "dancey, high-energy")
                .with_closing_time("2:00 AM"),
            Venue::new("Night Owl Diner", "Belltown", "Diner", "late-eats")
                .with_closing_time("3:00 AM"),
        ]
    }

    #[test]
    fn test_plan_marks_locks_and_travel() {
        let slots = venues()
            .into_iter()
            .enumerate()
            .map(|(i, v)| Slot {
                phase_index: i,
                venue: Some(v),
            })
            .chain([Slot {
                phase_index: 2,
                venue: None,
            }])
            .collect();
        let p = ItineraryPlan {
            arc: VibeArc::ChillToWild,
            start: 21 * 60,
            slot_duration: 60,
            slots,
        };

        let text = plan(&p, &BTreeSet::from([0]));
        assert!(text.starts_with("chill-to-wild · 3 of 4 stops · 60 min each"));
        assert!(text.contains("Stop 1 · Warm up  [locked]"));
        assert!(text.contains("Lantern  9:00 PM–10:00 PM"));
        assert!(text.contains("why: chill, date-friendly"));
        assert!(text.contains("from Lantern: Capitol Hill → Belltown · ~15 min"));
        assert!(text.contains("from Pulse: Same neighborhood · ~5 min"));
        assert!(text.contains("Night Owl Diner  11:00 PM–12:00 AM"));
        assert!(text.contains("Stop 4 · Late eats\n  (no venue fits this slot)"));
    }

    #[test]
    fn test_browse_marks() {
        let vs = venues();
        let mut favorites = Favorites::new();
        favorites.insert("Pulse");
        let mut history = CrawlHistory::new();
        history.mark_visited("Lantern", Rating::Up, "2026-02-21T04:00:00Z");
        let ctx = BrowseContext {
            favorites: &favorites,
            history: &history,
            now_minute: 23 * 60,
            window: NightWindow::default(),
        };
        let hits: Vec<&Venue> = vs.iter().collect();
        let text = browse(&hits, &ctx);
        assert!(text.contains("Lantern  [Open now] [been there, liked]"));
        assert!(
            text.contains("Pulse  [Open now] [Cover likely] [Likely busy] [Line risk] [saved]")
        );
        assert!(text.contains("Capitol Hill · Cocktail Bar · 1.0 mi · closes 1:00 AM"));
    }

    #[test]
    fn test_history_summary() {
        let mut h = CrawlHistory::new();
        h.mark_visited("Lantern", Rating::Up, "2026-02-21T04:00:00Z");
        h.mark_visited("Pulse", Rating::Neutral, "2026-02-22T04:00:00Z");
        let text = history(&h);
        assert!(text.starts_with("2 visited · 1 liked · 0 disliked · 1 unrated"));
        assert!(text.contains("Pulse  unrated  2026-02-22T04:00:00Z"));
    }

    #[test]
    fn test_info_counts() {
        let text = info(&venues());
        assert!(
            text.starts_with("3 venues · 2 areas · 3 categories · 5 vibes · Verified Feb 2026")
        );
        assert!(text.contains("areas: Belltown, Capitol Hill"));
    }
}
