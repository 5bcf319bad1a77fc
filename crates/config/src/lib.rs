//! Configuration loading for the troupe gateway.
//!
//! Config snapshots come from three places:
//! - `troupe.{toml,json}` — server settings (bind, port, transcript window,
//!   heartbeat interval, catalog path, preferences dir)
//! - the model catalog file — loaded by `troupe-catalog`
//! - per-agent preference files — one JSON file per agent under the
//!   preferences directory
//!
//! Missing or malformed files never error up to the caller: they are logged
//! at warning level and replaced with defaults, so the gateway always starts.

pub mod error;
pub mod loader;
pub mod preferences;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{discover_and_load, load_config},
    preferences::{PreferenceStore, UserPreference},
    schema::TroupeConfig,
};
