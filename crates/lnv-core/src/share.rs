//! Share-plan codec: a compact, URL-friendly token for a night plan.
//!
//! Wire shape (JSON, then standard base64 over UTF-8 bytes):
//! `{"s":[{"n":name,"a":area,"c":category,"t":closing,"l":maps_link}],"start":m,"dur":m}`.
//! Missing optional fields are empty strings, never null.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::arc::VibeArc;
use crate::error::ShareError;
use crate::itinerary::{ItineraryPlan, Slot};
use crate::venue::Venue;

/// Minimal projection of a venue carried in a share token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedStop {
    #[serde(rename = "n", default)]
    pub name: String,
    #[serde(rename = "a", default)]
    pub area: String,
    #[serde(rename = "c", default)]
    pub category: String,
    /// Raw closing text as shown in the dataset.
    #[serde(rename = "t", default)]
    pub closing_time: String,
    #[serde(rename = "l", default)]
    pub maps_link: String,
}

impl From<&Venue> for SharedStop {
    fn from(v: &Venue) -> Self {
        Self {
            name: v.name.clone(),
            area: v.area.clone(),
            category: v.category.clone(),
            closing_time: v.closing_time.clone(),
            maps_link: v.maps_link.clone(),
        }
    }
}

impl SharedStop {
    /// Rehydrate into a venue with only the shared fields set.
    pub fn to_venue(&self) -> Venue {
        Venue::from_fields([
            (crate::venue::headers::NAME, self.name.as_str()),
            (crate::venue::headers::AREA, self.area.as_str()),
            (crate::venue::headers::CATEGORY, self.category.as_str()),
            (crate::venue::headers::CLOSING_TIME, self.closing_time.as_str()),
            (crate::venue::headers::MAPS_LINK, self.maps_link.as_str()),
        ])
    }
}

/// Decoded share payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePlan {
    #[serde(rename = "s", default)]
    pub stops: Vec<SharedStop>,
    pub start: u32,
    #[serde(rename = "dur")]
    pub duration: u32,
}

impl SharePlan {
    /// Rebuild a plan whose stops fill consecutive slots. The arc is not
    /// carried in the token, so every slot gets the default arc's phases.
    pub fn to_plan(&self) -> ItineraryPlan {
        let count = self.stops.len();
        ItineraryPlan {
            arc: VibeArc::default(),
            start: self.start,
            slot_duration: self.duration,
            slots: self
                .stops
                .iter()
                .enumerate()
                .map(|(i, s)| Slot {
                    phase_index: crate::arc::phase_index(i, count),
                    venue: Some(s.to_venue()),
                })
                .collect(),
        }
    }
}

pub fn encode_share_plan<'a>(
    stops: impl IntoIterator<Item = &'a Venue>,
    start: u32,
    duration: u32,
) -> String {
    let plan = SharePlan {
        stops: stops.into_iter().map(SharedStop::from).collect(),
        start,
        duration,
    };
    encode_payload(&plan)
}

/// Encode the filled stops of a plan.
pub fn encode_plan(plan: &ItineraryPlan) -> String {
    encode_share_plan(plan.venues(), plan.start, plan.slot_duration)
}

fn encode_payload(plan: &SharePlan) -> String {
    // Serializing plain strings and integers cannot fail.
    let json = serde_json::to_string(plan).unwrap_or_default();
    BASE64.encode(json.as_bytes())
}

pub fn decode_share_plan(token: &str) -> Result<SharePlan, ShareError> {
    let bytes = BASE64.decode(token.trim())?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}
