use std::fs;
use std::path::Path;

use lnv_core::{MAX_RESULT_COUNT, NightWindow, VibeArc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

pub const CONFIG_FILE: &str = "config.toml";

/// User settings read from `config.toml`. Every field is optional in the
/// file; missing ones take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Venue CSV used when the CLI is not given one.
    pub dataset: String,
    pub recommend: RecommendSettings,
    pub planner: PlannerSettings,
    pub night: NightWindow,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendSettings {
    /// Miles. Zero or negative means no cap.
    pub max_distance: f64,
    pub result_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub start: String,
    pub end: String,
    pub stops: usize,
    pub arc: VibeArc,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset: "venue_list_500plus.csv".to_string(),
            recommend: RecommendSettings::default(),
            planner: PlannerSettings::default(),
            night: NightWindow::default(),
        }
    }
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            max_distance: 6.0,
            result_count: 8,
        }
    }
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            start: "21:00".to_string(),
            end: "01:00".to_string(),
            stops: 3,
            arc: VibeArc::ChillToWild,
        }
    }
}

impl RecommendSettings {
    pub fn max_distance(&self) -> Option<f64> {
        (self.max_distance > 0.0).then_some(self.max_distance)
    }

    pub fn result_count(&self) -> usize {
        self.result_count.min(MAX_RESULT_COUNT)
    }
}

impl Settings {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| StoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                tracing::debug!(path = %path.display(), "loading settings");
                Self::from_toml_str(&text, path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}
