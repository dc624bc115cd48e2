//! Browse view: filter and sort the venue list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::history::{CrawlHistory, Favorites};
use crate::time::NightWindow;
use crate::venue::Venue;

/// Whether a venue is open right now, as far as its closing time tells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OpenStatus {
    Open,
    LikelyClosed,
    Unknown,
}

impl OpenStatus {
    pub fn of(venue: &Venue, now_minute: u32, window: &NightWindow) -> Self {
        match window.is_open(venue.closing_minutes, now_minute) {
            Some(true) => OpenStatus::Open,
            Some(false) => OpenStatus::LikelyClosed,
            None => OpenStatus::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OpenStatus::Open => "Open now",
            OpenStatus::LikelyClosed => "Likely closed",
            OpenStatus::Unknown => "Hours unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitedFilter {
    #[default]
    Any,
    Visited,
    New,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Distance,
    Closing,
    Area,
    Category,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "distance" => Ok(SortKey::Distance),
            "closing" => Ok(SortKey::Closing),
            "area" => Ok(SortKey::Area),
            "category" => Ok(SortKey::Category),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// User-selected browse filters. Empty strings and empty vibe lists mean
/// "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseFilter {
    pub query: String,
    pub area: String,
    pub category: String,
    pub vibes: Vec<String>,
    pub open_now: bool,
    pub saved_only: bool,
    pub visited: VisitedFilter,
}

/// Per-user state the filter is evaluated against.
#[derive(Clone, Copy, Debug)]
pub struct BrowseContext<'a> {
    pub favorites: &'a Favorites,
    pub history: &'a CrawlHistory,
    pub now_minute: u32,
    pub window: NightWindow,
}

impl BrowseFilter {
    pub fn matches(&self, venue: &Venue, ctx: &BrowseContext<'_>) -> bool {
        if self.saved_only && !ctx.favorites.contains(&venue.name) {
            return false;
        }
        if self.open_now
            && ctx.window.is_open(venue.closing_minutes, ctx.now_minute) != Some(true)
        {
            return false;
        }
        match self.visited {
            VisitedFilter::Visited if !ctx.history.is_visited(&venue.name) => return false,
            VisitedFilter::New if ctx.history.is_visited(&venue.name) => return false,
            _ => {}
        }
        let area = self.area.trim();
        if !area.is_empty() && venue.area != area {
            return false;
        }
        let category = self.category.trim();
        if !category.is_empty() && venue.category != category {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !haystack(venue).contains(&query) {
            return false;
        }
        if !self.vibes.is_empty() {
            let tags = venue.vibe_set();
            if !self
                .vibes
                .iter()
                .all(|t| tags.contains(t.trim().to_lowercase().as_str()))
            {
                return false;
            }
        }
        true
    }

    /// Venues passing the filter, in dataset order.
    pub fn apply<'v>(&self, venues: &'v [Venue], ctx: &BrowseContext<'_>) -> Vec<&'v Venue> {
        venues.iter().filter(|v| self.matches(v, ctx)).collect()
    }

    /// Number of active constraints, for a filter badge.
    pub fn active_count(&self) -> usize {
        [
            !self.query.trim().is_empty(),
            !self.area.trim().is_empty(),
            !self.category.trim().is_empty(),
            self.open_now,
            self.saved_only,
            self.visited != VisitedFilter::Any,
        ]
        .into_iter()
        .filter(|&on| on)
        .count()
            + self.vibes.len()
    }
}

fn haystack(venue: &Venue) -> String {
    [
        venue.name.as_str(),
        venue.address.as_str(),
        venue.category.as_str(),
        venue.raw_tags().as_str(),
        venue.area.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Sort in place. Unknown distances and closing times go last.
pub fn sort_venues(venues: &mut [&Venue], key: SortKey) {
    match key {
        SortKey::Name => venues.sort_by(|a, b| natural_cmp(&a.name, &b.name)),
        SortKey::Area => venues.sort_by(|a, b| natural_cmp(&a.area, &b.area)),
        SortKey::Category => venues.sort_by(|a, b| natural_cmp(&a.category, &b.category)),
        SortKey::Distance => venues.sort_by(|a, b| {
            unknown_last(a.distance_miles, b.distance_miles, |x, y| x.total_cmp(&y))
        }),
        SortKey::Closing => venues.sort_by(|a, b| {
            unknown_last(a.closing_minutes, b.closing_minutes, |x, y| x.cmp(&y))
        }),
    }
}

fn unknown_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive comparison where digit runs compare by value,
/// so "Bar 9" sorts before "Bar 10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().flat_map(char::to_lowercase).peekable();
    let mut b = b.chars().flat_map(char::to_lowercase).peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_number(&mut a);
                let nb = take_number(&mut b);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(x), Some(y)) => {
                a.next();
                b.next();
                match x.cmp(&y) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<impl Iterator<Item = char>>) -> u128 {
    let mut n: u128 = 0;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(d as u128);
        chars.next();
    }
    n
}
