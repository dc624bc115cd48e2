//! Local persistence for Late Night Vibes: favorites, crawl history and the
//! last planner session in SQLite, plus the TOML settings file.

pub mod config;
pub mod data_dir;
pub mod error;
pub mod json_bridge;
pub mod schema;
pub mod store;

pub use config::{PlannerSettings, RecommendSettings, Settings};
pub use data_dir::{DATA_DIR_ENV, DataDir, default_base_dir};
pub use error::{Result, StoreError};
pub use store::Store;
