//! Startup preferences
//!
//! Read once from a JSON file; missing or unreadable files fall back to
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GolfError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keep the full unclipped path in aim previews
    pub debug_preview: bool,
    /// Trees scattered over each hole's rough
    pub tree_count: usize,
    /// Seed for tree placement (hole index is mixed in)
    pub tree_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_preview: false,
            tree_count: 12,
            tree_seed: 0x6f6c_6667,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, GolfError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from disk
    pub fn try_load(path: &Path) -> Result<Self, GolfError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from disk, or defaults if that fails
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Tree seed for a given hole
    pub fn seed_for_hole(&self, index: usize) -> u64 {
        self.tree_seed
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(index as u64)
    }
}
