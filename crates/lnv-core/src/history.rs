//! "Been there" crawl history and saved favorites.
//!
//! Both are plain data; persistence belongs to the store. The JSON shape of
//! [`CrawlHistory`] is `{"Venue": {"rating": 1, "visitedAt": "..."}}`.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Thumbs rating on a visit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Rating {
    Down,
    #[default]
    Neutral,
    Up,
}

impl From<Rating> for i8 {
    fn from(r: Rating) -> Self {
        match r {
            Rating::Down => -1,
            Rating::Neutral => 0,
            Rating::Up => 1,
        }
    }
}

impl TryFrom<i8> for Rating {
    type Error = String;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            -1 => Ok(Rating::Down),
            0 => Ok(Rating::Neutral),
            1 => Ok(Rating::Up),
            other => Err(format!("rating must be -1, 0 or 1, got {other}")),
        }
    }
}

impl std::str::FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "like" | "1" | "+1" => Ok(Rating::Up),
            "down" | "dislike" | "-1" => Ok(Rating::Down),
            "neutral" | "none" | "0" => Ok(Rating::Neutral),
            other => Err(format!("unknown rating: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    #[serde(default)]
    pub rating: Rating,
    #[serde(rename = "visitedAt")]
    pub visited_at: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub total: usize,
    pub liked: usize,
    pub disliked: usize,
    pub unrated: usize,
}

/// Visited venues by name, in the order they were first marked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrawlHistory {
    visits: IndexMap<String, Visit>,
}

impl CrawlHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Re-marking updates the rating but keeps the first
    /// `visited_at`.
    pub fn mark_visited(&mut self, name: &str, rating: Rating, now: &str) {
        let visited_at = match self.visits.get(name) {
            Some(v) if !v.visited_at.is_empty() => v.visited_at.clone(),
            _ => now.to_string(),
        };
        self.visits
            .insert(name.to_string(), Visit { rating, visited_at });
    }

    pub fn unmark_visited(&mut self, name: &str) -> bool {
        self.visits.shift_remove(name).is_some()
    }

    /// Update the rating of a visited venue. Returns `false` (and records
    /// nothing) if the venue was never visited.
    pub fn set_rating(&mut self, name: &str, rating: Rating) -> bool {
        match self.visits.get_mut(name) {
            Some(v) => {
                v.rating = rating;
                true
            }
            None => false,
        }
    }

    pub fn is_visited(&self, name: &str) -> bool {
        self.visits.contains_key(name)
    }

    /// Neutral for unvisited venues.
    pub fn rating(&self, name: &str) -> Rating {
        self.visits.get(name).map(|v| v.rating).unwrap_or_default()
    }

    pub fn visited_at(&self, name: &str) -> Option<&str> {
        self.visits
            .get(name)
            .map(|v| v.visited_at.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn get(&self, name: &str) -> Option<&Visit> {
        self.visits.get(name)
    }

    pub fn stats(&self) -> CrawlStats {
        let mut stats = CrawlStats {
            total: self.visits.len(),
            ..CrawlStats::default()
        };
        for visit in self.visits.values() {
            match visit.rating {
                Rating::Up => stats.liked += 1,
                Rating::Down => stats.disliked += 1,
                Rating::Neutral => stats.unrated += 1,
            }
        }
        stats
    }

    pub fn visited_names(&self) -> impl Iterator<Item = &str> {
        self.visits.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Visit)> {
        self.visits.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flip visited state; returns the new state. New visits are neutral.
    pub fn toggle_visited(&mut self, name: &str, now: &str) -> bool {
        if self.unmark_visited(name) {
            false
        } else {
            self.mark_visited(name, Rating::Neutral, now);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Merge another history in. Entries already present keep their
    /// original `visited_at` and take the incoming rating.
    pub fn merge(&mut self, other: CrawlHistory) {
        for (name, visit) in other.visits {
            self.mark_visited(&name, visit.rating, &visit.visited_at);
        }
    }
}

impl FromIterator<(String, Visit)> for CrawlHistory {
    fn from_iter<I: IntoIterator<Item = (String, Visit)>>(iter: I) -> Self {
        Self {
            visits: iter.into_iter().collect(),
        }
    }
}

/// Saved venues by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    names: IndexSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Add or remove; returns whether the venue is now saved.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.shift_remove(name) {
            false
        } else {
            self.names.insert(name.to_string());
            true
        }
    }

    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for Favorites {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
