//! Late Night Vibes core: a nightlife venue browser engine.
//!
//! Typed venue records parsed once from CSV, a weighted similarity scorer,
//! a phase-driven itinerary generator with lock/shuffle/swap, and a compact
//! share-plan codec, plus the browse, history, and neighborhood helpers
//! around them.
//!
//! Zero I/O: text in, values out. Randomness comes from the caller's `Rng`.

pub mod arc;
pub mod area;
pub mod badges;
pub mod browse;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod history;
pub mod itinerary;
pub mod parse;
pub mod recommend;
pub mod share;
pub mod time;
pub mod venue;

pub use arc::{Phase, VibeArc};
pub use area::{AreaProfile, analyze_area};
pub use badges::{Badge, estimate_travel_from_distance, estimate_travel_minutes, viability_badges};
pub use browse::{BrowseContext, BrowseFilter, OpenStatus, SortKey, VisitedFilter, sort_venues};
pub use constants::{DISTANCE_PRIOR, MAX_RESULT_COUNT, MAX_STOPS};
pub use dataset::{areas, categories, collect_vibes, load_venues};
pub use error::{DatasetError, ShareError};
pub use history::{CrawlHistory, CrawlStats, Favorites, Rating, Visit};
pub use itinerary::{
    ItineraryParams, ItineraryPlan, ItinerarySession, Slot, Stop, connector, generate_itinerary,
};
pub use parse::{VibeSet, parse_closing_minutes, parse_distance_miles, vibe_set_of};
pub use recommend::{ScoreBreakdown, ScoredCandidate, compute_recommendations};
pub use share::{SharePlan, SharedStop, decode_share_plan, encode_plan, encode_share_plan};
pub use time::{NightWindow, minutes_to_label, parse_hhmm};
pub use venue::{Venue, VenueKey};
