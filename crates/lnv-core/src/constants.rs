/// Weight of the Jaccard vibe overlap in the composite recommendation score.
pub const VIBE_WEIGHT: f64 = 0.5;

/// Weight of a case-insensitive category match.
pub const CATEGORY_WEIGHT: f64 = 0.2;

/// Weight of a case-insensitive neighborhood match.
pub const AREA_WEIGHT: f64 = 0.2;

/// Weight of distance closeness.
pub const DISTANCE_WEIGHT: f64 = 0.1;

/// Distance sub-score used when either distance or the max-distance cap is unknown.
/// Missing data is a neutral prior, not a penalty.
pub const DISTANCE_PRIOR: f64 = 0.4;

/// Hard cap on recommendation result count accepted from callers.
pub const MAX_RESULT_COUNT: usize = 20;

/// Minutes in a day.
pub const DAY_MINUTES: u32 = 1440;

/// Planner: most slots a single plan will allocate; larger requests are clamped.
pub const MAX_STOPS: usize = 12;

/// Planner: random pick pool size among the best-scoring candidates.
pub const PICK_POOL: usize = 5;

/// Planner: divisor for the tag-richness bonus.
pub const DIVERSITY_DIVISOR: f64 = 5.0;

/// Planner: ceiling of the tag-richness bonus.
pub const DIVERSITY_CAP: f64 = 0.3;

/// Planner: bonus for staying in the previous stop's neighborhood.
pub const PROXIMITY_BONUS: f64 = 0.3;

/// Planner: penalty for a venue that closes before its slot ends.
pub const CLOSING_PENALTY: f64 = -2.0;

/// Browse: kitchens are assumed to open for late eats at 9 PM.
pub const KITCHEN_OPENS_AT: u32 = 21 * 60;

/// Browse: kitchens stop serving this many minutes before close.
pub const KITCHEN_LAST_CALL: u32 = 30;

/// Browse: the "likely busy" window, in night minutes (10 PM to 2 AM).
pub const BUSY_FROM: u32 = 22 * 60;
pub const BUSY_UNTIL: u32 = 2 * 60 + DAY_MINUTES;

/// Browse: nightclub lines build from 11 PM.
pub const LINE_RISK_FROM: u32 = 23 * 60;

/// Travel heuristic (minutes) within one neighborhood and across neighborhoods.
pub const SAME_AREA_TRAVEL: u32 = 5;
pub const CROSS_AREA_TRAVEL: u32 = 15;

/// Travel heuristic when driving distances are unknown.
pub const UNKNOWN_DISTANCE_TRAVEL: u32 = 12;

/// Map jitter half-width in degrees around a neighborhood centroid.
pub const COORD_JITTER: f64 = 0.003;
