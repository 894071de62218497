//! Lock-free parameter handoff between control and audio contexts.
//!
//! Gain targets are the only mutable state shared across the thread
//! boundary. Each target lives in a [`GainCell`]: a single-slot
//! published value backed by an `AtomicU32` holding the f32 bit
//! pattern. The control thread stores, the audio thread loads once per
//! block. No locks, no allocation, and no ordering requirement beyond
//! eventual visibility within one block's latency.

use core::sync::atomic::{AtomicU32, Ordering};
use triband_core::{EqError, GAIN_MAX_DB, GAIN_MIN_DB};

/// A single published gain value in dB.
///
/// Stores clamp to the valid gain range, so whatever the audio thread
/// observes is always safe to feed into coefficient computation.
#[derive(Debug)]
pub struct GainCell(AtomicU32);

impl GainCell {
    /// Create a cell holding `db` (clamped).
    pub fn new(db: f32) -> Self {
        Self(AtomicU32::new(
            db.clamp(GAIN_MIN_DB, GAIN_MAX_DB).to_bits(),
        ))
    }

    /// Publish a new target, clamping silently.
    #[inline]
    pub fn store(&self, db: f32) {
        self.0.store(
            db.clamp(GAIN_MIN_DB, GAIN_MAX_DB).to_bits(),
            Ordering::Relaxed,
        );
    }

    /// Publish a new target, reporting out-of-range requests.
    ///
    /// The clamped value is published either way, so the audio path
    /// keeps moving even when a caller passes garbage.
    pub fn try_store(&self, db: f32) -> Result<(), EqError> {
        self.store(db);
        if (GAIN_MIN_DB..=GAIN_MAX_DB).contains(&db) {
            Ok(())
        } else {
            Err(EqError::InvalidParameterValue {
                value: db,
                min: GAIN_MIN_DB,
                max: GAIN_MAX_DB,
            })
        }
    }

    /// Read the published target.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl Default for GainCell {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// The three published gain targets of the equalizer.
///
/// Shared between the equalizer (audio side) and any number of control
/// surfaces via `Arc<EqParams>`. All methods take `&self`; the cells do
/// the synchronization.
#[derive(Debug, Default)]
pub struct EqParams {
    /// Bass (low-shelf) gain target.
    pub bass: GainCell,
    /// Mid (peaking) gain target.
    pub mid: GainCell,
    /// Treble (high-shelf) gain target.
    pub treble: GainCell,
}

impl EqParams {
    /// All gains at 0 dB.
    pub fn new() -> Self {
        Self::default()
    }
}
