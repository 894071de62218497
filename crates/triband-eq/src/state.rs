//! Host state persistence for the equalizer.
//!
//! The host owns the state blob; the equalizer only defines its
//! content: a tagged key→float mapping of the three target gains,
//! serialized as JSON. Unknown keys are ignored on load and missing
//! keys default to 0 dB, so presets from newer or older versions load
//! without errors.

use serde::{Deserialize, Serialize};
use triband_core::{GAIN_MAX_DB, GAIN_MIN_DB};

/// Snapshot of the three target gains, in decibels.
///
/// This is the entire persistent state of the equalizer. Filter state
/// and ramps-in-flight are transient and deliberately not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqSnapshot {
    /// Bass (low-shelf) gain in dB.
    pub bass_db: f32,
    /// Mid (peaking) gain in dB.
    pub mid_db: f32,
    /// Treble (high-shelf) gain in dB.
    pub treble_db: f32,
}

impl Default for EqSnapshot {
    fn default() -> Self {
        Self {
            bass_db: 0.0,
            mid_db: 0.0,
            treble_db: 0.0,
        }
    }
}

impl EqSnapshot {
    /// Serialize to a JSON state blob.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON state blob, surfacing parse errors.
    ///
    /// Use this in tests and tooling; hosts restoring persisted state
    /// should prefer [`from_json_lossy`](Self::from_json_lossy) so a
    /// corrupt blob cannot fail plugin load.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Deserialize from a JSON state blob, falling back to default
    /// gains (0 dB) on malformed input.
    pub fn from_json_lossy(json: &str) -> Self {
        Self::from_json(json).unwrap_or_default()
    }

    /// Clamp all gains to the valid range.
    ///
    /// Persisted blobs are external input; values are clamped before
    /// they reach the parameter cells.
    pub fn clamped(self) -> Self {
        Self {
            bass_db: self.bass_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB),
            mid_db: self.mid_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB),
            treble_db: self.treble_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB),
        }
    }
}
