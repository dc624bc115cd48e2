use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::COORD_JITTER;
use crate::parse::{VibeSet, parse_closing_minutes, parse_distance_miles, split_tags, vibe_set_of};

/// Column headers of the venue dataset.
pub mod headers {
    pub const NAME: &str = "Name";
    pub const AREA: &str = "Area";
    pub const CATEGORY: &str = "Category";
    pub const VIBE_TAGS: &str = "Vibe Tags";
    pub const DRIVING_DISTANCE: &str = "Driving Distance";
    pub const CLOSING_TIME: &str = "Typical Closing Time";
    pub const MAPS_LINK: &str = "Google Maps Driving Link";
    pub const ADDRESS: &str = "Address";
    pub const PHONE: &str = "Phone";
    pub const WEBSITE: &str = "Website";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
}

/// Static neighborhood centroids (lat, lng) used when a venue has no coordinates.
const NEIGHBORHOOD_COORDS: &[(&str, f64, f64)] = &[
    ("Capitol Hill", 47.6253, -122.3222),
    ("Ballard", 47.6677, -122.3846),
    ("Fremont", 47.6508, -122.3502),
    ("Downtown", 47.6062, -122.3321),
    ("Belltown", 47.6145, -122.3450),
    ("SLU", 47.6237, -122.3368),
    ("South Lake Union", 47.6237, -122.3368),
    ("Queen Anne", 47.6372, -122.3571),
    ("Lower Queen Anne", 47.6255, -122.3565),
    ("Chinatown-International District", 47.5982, -122.3252),
    ("International District", 47.5982, -122.3252),
    ("University District", 47.6588, -122.3130),
    ("Wallingford", 47.6615, -122.3352),
    ("West Seattle", 47.5607, -122.3870),
    ("Georgetown", 47.5436, -122.3157),
    ("SoDo", 47.5680, -122.3340),
    ("Greenwood", 47.6906, -122.3556),
    ("Green Lake", 47.6803, -122.3290),
    ("Magnolia", 47.6395, -122.3990),
    ("Interbay", 47.6476, -122.3760),
    ("White Center", 47.5169, -122.3530),
    ("Columbia City", 47.5594, -122.2870),
    ("Beacon Hill", 47.5630, -122.3120),
    ("Central District", 47.6082, -122.2987),
    ("First Hill", 47.6088, -122.3262),
    ("Rainier Valley", 47.5430, -122.2870),
    ("Skyway", 47.4910, -122.2870),
    ("Shoreline", 47.7557, -122.3420),
    ("Lake City", 47.7110, -122.2900),
    ("Northgate", 47.7069, -122.3278),
    ("Burien", 47.4710, -122.3470),
    ("Renton", 47.4829, -122.2170),
    ("Tukwila", 47.4740, -122.2850),
    ("Kent", 47.3809, -122.2348),
    ("Auburn", 47.3073, -122.2285),
    ("Everett", 47.9790, -122.2021),
    ("Bellevue", 47.6101, -122.2015),
    ("Kirkland", 47.6769, -122.2060),
    ("Redmond", 47.6740, -122.1215),
    ("Issaquah", 47.5301, -122.0326),
    ("Eastside", 47.6200, -122.1800),
    ("Pioneer Square", 47.6015, -122.3340),
    ("Ravenna", 47.6774, -122.3020),
    ("Phinney Ridge", 47.6740, -122.3540),
    ("Roosevelt", 47.6780, -122.3180),
    ("Maple Leaf", 47.6930, -122.3160),
    ("Wedgwood", 47.6910, -122.2890),
    ("Leschi", 47.6010, -122.2880),
    ("Madison Park", 47.6340, -122.2750),
    ("Montlake", 47.6380, -122.3010),
];

/// Identity used to keep list and map views in sync.
/// The dataset may contain duplicates; nothing relies on this being unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VenueKey {
    pub name: String,
    pub area: String,
}

/// One venue from the dataset. Free-text fields are parsed once here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub area: String,
    pub category: String,
    /// Authored tags, original case.
    pub vibe_tags: Vec<String>,
    /// Raw distance text, e.g. "2.1 mi".
    pub driving_distance: String,
    pub distance_miles: Option<f64>,
    /// Raw closing text, e.g. "2:00 AM".
    pub closing_time: String,
    pub closing_minutes: Option<u32>,
    pub maps_link: String,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Columns this crate does not interpret.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Venue {
    /// Build a venue from header/value pairs. Values are trimmed; unknown
    /// headers land in `extra`.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut venue = Self::default();
        for (header, value) in fields {
            let value = value.trim();
            match header.trim() {
                headers::NAME => venue.name = value.to_string(),
                headers::AREA => venue.area = value.to_string(),
                headers::CATEGORY => venue.category = value.to_string(),
                headers::VIBE_TAGS => venue.vibe_tags = split_tags(value),
                headers::DRIVING_DISTANCE => {
                    venue.driving_distance = value.to_string();
                    venue.distance_miles = parse_distance_miles(value);
                }
                headers::CLOSING_TIME => {
                    venue.closing_time = value.to_string();
                    venue.closing_minutes = parse_closing_minutes(value);
                }
                headers::MAPS_LINK => venue.maps_link = value.to_string(),
                headers::ADDRESS => venue.address = value.to_string(),
                headers::PHONE => venue.phone = value.to_string(),
                headers::WEBSITE => venue.website = value.to_string(),
                headers::LATITUDE => venue.latitude = value.parse().ok(),
                headers::LONGITUDE => venue.longitude = value.parse().ok(),
                other => {
                    venue.extra.insert(other.to_string(), value.to_string());
                }
            }
        }
        venue
    }

    /// Minimal venue for the core fields; handy for callers that are not CSV-backed.
    pub fn new(name: &str, area: &str, category: &str, tags: &str) -> Self {
        Self::from_fields([
            (headers::NAME, name),
            (headers::AREA, area),
            (headers::CATEGORY, category),
            (headers::VIBE_TAGS, tags),
        ])
    }

    pub fn with_distance(mut self, text: &str) -> Self {
        self.driving_distance = text.trim().to_string();
        self.distance_miles = parse_distance_miles(text);
        self
    }

    pub fn with_closing_time(mut self, text: &str) -> Self {
        self.closing_time = text.trim().to_string();
        self.closing_minutes = parse_closing_minutes(text);
        self
    }

    pub fn with_maps_link(mut self, link: &str) -> Self {
        self.maps_link = link.trim().to_string();
        self
    }

    pub fn key(&self) -> VenueKey {
        VenueKey {
            name: self.name.clone(),
            area: self.area.clone(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn vibe_set(&self) -> VibeSet {
        vibe_set_of(&self.vibe_tags.join(","))
    }

    /// Raw tags joined for display and text search.
    pub fn raw_tags(&self) -> String {
        self.vibe_tags.join(", ")
    }

    /// First tag, lowercased, or "general" for untagged venues.
    pub fn primary_tag(&self) -> String {
        self.vibe_set()
            .into_iter()
            .next()
            .unwrap_or_else(|| "general".to_string())
    }

    pub fn closing_label(&self) -> &str {
        if self.closing_time.is_empty() {
            "Late"
        } else {
            &self.closing_time
        }
    }

    pub fn distance_label(&self) -> &str {
        if self.driving_distance.is_empty() {
            "Distance TBD"
        } else {
            &self.driving_distance
        }
    }

    /// Map position: explicit coordinates if present, otherwise a jittered
    /// neighborhood centroid. `None` when the area is not in the lookup table.
    pub fn coordinates(&self, rng: &mut impl Rng) -> Option<(f64, f64)> {
        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            return Some((lat, lng));
        }
        let (lat, lng) = neighborhood_centroid(&self.area)?;
        let lat = lat + rng.random_range(-COORD_JITTER..COORD_JITTER);
        let lng = lng + rng.random_range(-COORD_JITTER..COORD_JITTER);
        Some((lat, lng))
    }
}

/// Look up a neighborhood centroid by case-insensitive containment in either direction.
pub fn neighborhood_centroid(area: &str) -> Option<(f64, f64)> {
    let area = area.trim().to_lowercase();
    if area.is_empty() {
        return None;
    }
    NEIGHBORHOOD_COORDS
        .iter()
        .find(|(name, _, _)| {
            let name = name.to_lowercase();
            area.contains(&name) || name.contains(&area)
        })
        .map(|&(_, lat, lng)| (lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn test_from_fields_parses_once() {
        let v = Venue::from_fields([
            ("Name", " Neon Room "),
            ("Area", "Capitol Hill"),
            ("Vibe Tags", "Chill, dancey"),
            ("Driving Distance", "2.1 mi"),
            ("Typical Closing Time", "2:00 AM"),
            ("Happy Hour", "4-6"),
        ]);
        assert_eq!(v.name, "Neon Room");
        assert_eq!(v.vibe_tags, vec!["Chill", "dancey"]);
        assert_relative_eq!(v.distance_miles.unwrap(), 2.1);
        assert_eq!(v.closing_minutes, Some(120));
        assert_eq!(v.extra.get("Happy Hour").map(String::as_str), Some("4-6"));
    }

    #[test]
    fn test_unparseable_fields_are_none() {
        let v = Venue::new("A", "X", "Bar", "")
            .with_distance("Distance TBD")
            .with_closing_time("Late");
        assert_eq!(v.distance_miles, None);
        assert_eq!(v.closing_minutes, None);
        assert!(v.vibe_set().is_empty());
    }

    #[test]
    fn test_labels_fall_back() {
        let v = Venue::new("A", "X", "Bar", "");
        assert_eq!(v.closing_label(), "Late");
        assert_eq!(v.distance_label(), "Distance TBD");
        assert_eq!(v.primary_tag(), "general");
    }

    #[test]
    fn test_key_identity() {
        let a = Venue::new("Twin", "Ballard", "Bar", "");
        let b = Venue::new("Twin", "Fremont", "Bar", "");
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), a.clone().key());
    }

    #[test]
    fn test_coordinates_explicit() {
        let v = Venue::from_fields([("Name", "A"), ("Latitude", "47.1"), ("Longitude", "-122.2")]);
        assert_eq!(v.coordinates(&mut rng()), Some((47.1, -122.2)));
    }

    #[test]
    fn test_coordinates_from_neighborhood_with_jitter() {
        let v = Venue::new("A", "capitol hill", "Bar", "");
        let (lat, lng) = v.coordinates(&mut rng()).unwrap();
        assert!((lat - 47.6253).abs() <= COORD_JITTER);
        assert!((lng + 122.3222).abs() <= COORD_JITTER);
    }

    #[test]
    fn test_coordinates_unknown_area() {
        let v = Venue::new("A", "Atlantis", "Bar", "");
        assert_eq!(v.coordinates(&mut rng()), None);
        let blank = Venue::new("A", "", "Bar", "");
        assert_eq!(blank.coordinates(&mut rng()), None);
    }
}
