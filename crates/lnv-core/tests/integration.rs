//! Integration tests across the core pipeline:
//! CSV → venues → recommendations / itinerary → share token → plan.

use lnv_core::{
    BrowseContext, BrowseFilter, CrawlHistory, Favorites, ItineraryParams, ItinerarySession,
    NightWindow, Rating, SortKey, VibeArc, analyze_area, compute_recommendations,
    decode_share_plan, encode_plan, load_venues, sort_venues,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

const DATASET: &str = "\
Name,Area,Category,Vibe Tags,Driving Distance,Typical Closing Time,Google Maps Driving Link,Address
Lantern Lounge,Capitol Hill,Cocktail Bar,\"chill, date-friendly, upscale\",1.0 mi,1:00 AM,https://maps.example/lantern,101 Pine St
Velvet Hour,Capitol Hill,Cocktail Bar,\"chill, date-friendly, upscale\",1.4 mi,2:00 AM,https://maps.example/velvet,12 Pike St
Pulse,Capitol Hill,Nightclub,\"dancey, high-energy, loud, rowdy\",1.1 mi,2:00 AM,,
Night Owl Diner,Capitol Hill,Diner,\"late-eats, food-focused, chill\",1.3 mi,3:00 AM,,
Skyline,Belltown,Rooftop Bar,\"upscale, views, rooftop\",0.6 mi,12:00 AM,,
Dockside,Ballard,Dive Bar,\"divey, casual, late-night\",5.2 mi,2:00 AM,,
Karaoke Kat,Ballard,Karaoke Bar,\"karaoke, playful, games\",5.0 mi,2:00 AM,,
,,,,,,,
Sugar Rush,Fremont,Dessert Bar,\"sweet, chill\",Distance TBD,Late,,
";

#[test]
fn csv_to_recommendations() {
    let venues = load_venues(DATASET).unwrap();
    assert_eq!(venues.len(), 8, "blank row dropped");

    let base = &venues[0];
    let recs = compute_recommendations(&venues, base, Some(3.0), 5);

    assert_eq!(recs[0].venue.name, "Velvet Hour");
    assert_eq!(recs[0].breakdown.vibe, 100);
    assert!(recs.iter().all(|r| r.venue.name != base.name));
    // Ballard is beyond the cap; Sugar Rush has no distance and survives
    assert!(recs.iter().all(|r| r.venue.area != "Ballard"));
    assert!(recs.iter().any(|r| r.venue.name == "Sugar Rush"));
}

#[test]
fn plan_share_and_reopen() {
    let venues = load_venues(DATASET).unwrap();
    let params =
        ItineraryParams::from_clock("21:00", "01:00", 3, VibeArc::ChillToWild, None).unwrap();

    let mut session = ItinerarySession::new();
    let plan = session.build(&venues, params, &mut rng()).clone();
    assert_eq!(plan.stop_count(), 3);

    let token = encode_plan(&plan);
    let shared = decode_share_plan(&token).unwrap();
    assert_eq!(shared.start, 1260);
    assert_eq!(shared.duration, 80);
    let names: Vec<&str> = shared.stops.iter().map(|s| s.name.as_str()).collect();
    let original: Vec<&str> = plan.venues().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, original);

    let reopened = shared.to_plan();
    assert_eq!(reopened.share_text(), plan.share_text());
}

#[test]
fn lock_shuffle_swap_session() {
    let venues = load_venues(DATASET).unwrap();
    let params = ItineraryParams::from_clock("22:00", "02:00", 4, VibeArc::Party, None).unwrap();

    let mut session = ItinerarySession::new();
    session.build(&venues, params, &mut rng());
    let locked = session.plan().unwrap().venue_at(2).cloned().unwrap();
    session.toggle_lock(2);

    for seed in 1..8 {
        session.shuffle(&venues, &mut SmallRng::seed_from_u64(seed));
        assert_eq!(session.plan().unwrap().venue_at(2), Some(&locked));
    }

    let before = session.plan().unwrap().clone();
    assert!(session.swap(0, 3));
    let after = session.plan().unwrap();
    assert_eq!(after.venue_at(0), before.venue_at(3));
    assert_eq!(after.venue_at(3), before.venue_at(0));
    assert_eq!(after.venue_at(1), before.venue_at(1));
    assert!(session.is_locked(2));
}

#[test]
fn session_survives_json() {
    let venues = load_venues(DATASET).unwrap();
    let area = Some("Capitol Hill");
    let params =
        ItineraryParams::from_clock("21:00", "00:00", 2, VibeArc::DateNight, area).unwrap();
    let mut session = ItinerarySession::new();
    session.build(&venues, params, &mut rng());
    session.lock(0);

    let json = serde_json::to_string(&session).unwrap();
    let mut restored: ItinerarySession = serde_json::from_str(&json).unwrap();
    let kept = restored.plan().unwrap().venue_at(0).cloned();
    restored.shuffle(&venues, &mut SmallRng::seed_from_u64(7));
    assert_eq!(restored.plan().unwrap().venue_at(0).cloned(), kept);
    assert!(restored.plan().unwrap().venues().iter().all(|v| v.area == "Capitol Hill"));
}

#[test]
fn browse_with_user_state() {
    let venues = load_venues(DATASET).unwrap();
    let mut favorites = Favorites::new();
    favorites.toggle("Pulse");
    favorites.toggle("Dockside");
    let mut history = CrawlHistory::new();
    history.mark_visited("Dockside", Rating::Up, "2026-02-21T06:00:00Z");

    let ctx = BrowseContext {
        favorites: &favorites,
        history: &history,
        now_minute: 23 * 60,
        window: NightWindow::default(),
    };
    let filter = BrowseFilter {
        saved_only: true,
        visited: lnv_core::VisitedFilter::New,
        ..Default::default()
    };
    let hits = filter.apply(&venues, &ctx);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Pulse");

    let mut all = BrowseFilter::default().apply(&venues, &ctx);
    sort_venues(&mut all, SortKey::Distance);
    assert_eq!(all[0].name, "Skyline");
    assert_eq!(all.last().unwrap().name, "Sugar Rush");
}

#[test]
fn compare_neighborhoods() {
    let venues = load_venues(DATASET).unwrap();
    let hill = analyze_area(&venues, "Capitol Hill", &NightWindow::default()).unwrap();
    assert_eq!(hill.total, 4);
    assert_eq!(hill.top_vibes[0].0, "chill");
    assert_eq!(hill.latest_close, "3:00 AM");
    assert_eq!(hill.earliest_close, "1:00 AM");
    assert_eq!(hill.avg_distance, "1.2 mi");
}
