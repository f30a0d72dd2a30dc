//=========================================================================
// Save Data
//=========================================================================
//
// Achievement progress persisted between sessions.
//
// The core treats the payload opaquely: it is created by the
// achievement system, written as the final step of release, and loaded
// during initialize. A missing or unreadable file is not a fault; the
// caller falls back to defaults.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== SaveError ===========================================================

/// Persistence failures. Contained at the facade: logged, never allowed
/// to terminate the frame loop.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save format error: {0}")]
    Format(String),
}

//=== AchievementSaveData =================================================

/// The on-disk save payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementSaveData {
    pub enemy_kills: u32,
    pub soldiers_trained: u32,
    pub stages_cleared: u32,
    pub survival_ticks: u64,
}

impl AchievementSaveData {
    /// Writes the payload to `path` as RON.
    pub fn save(&self, path: &Path) -> Result<(), SaveError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SaveError::Format(e.to_string()))?;
        fs::write(path, text)?;
        debug!("save data written to {}", path.display());
        Ok(())
    }

    /// Reads a payload from `path`.
    pub fn load(path: &Path) -> Result<Self, SaveError> {
        let text = fs::read_to_string(path)?;
        ron::from_str(&text).map_err(|e| SaveError::Format(e.to_string()))
    }
}

//=========================================================================
// Tests
//=========================================================================
