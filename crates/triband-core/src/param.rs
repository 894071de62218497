//! Gain parameter smoothing for zipper-free changes.
//!
//! Equalizer gains need smooth transitions to avoid audible clicks when
//! the user or host automation moves a control. This module provides
//! [`SmoothedGain`], a linear per-sample ramp over a configurable time
//! window.
//!
//! A linear ramp (rather than a one-pole exponential) is used because
//! it lands *exactly* on the target after the configured number of
//! samples, which keeps "is the ramp done" decisions deterministic and
//! lets the coefficient-update guard in the equalizer settle instead of
//! chasing an asymptote forever.
//!
//! ## Usage
//!
//! ```rust
//! use triband_core::SmoothedGain;
//!
//! let mut gain = SmoothedGain::new(0.0);
//! gain.reset(48000.0, 0.02); // 20 ms ramp
//!
//! gain.set_target(6.0).unwrap();
//!
//! // In the audio callback, advance once per sample index
//! for _ in 0..960 {
//!     let db = gain.next_value();
//!     // feed db into the filter coefficient update...
//! }
//! assert_eq!(gain.current(), 6.0);
//! ```

use crate::error::EqError;

/// Minimum band gain in decibels.
pub const GAIN_MIN_DB: f32 = -12.0;
/// Maximum band gain in decibels.
pub const GAIN_MAX_DB: f32 = 12.0;
/// Step granularity for UI/host gain controls, in decibels.
pub const GAIN_STEP_DB: f32 = 0.01;
/// Default ramp window in seconds (20 ms).
pub const DEFAULT_RAMP_SECS: f32 = 0.02;

/// A gain parameter in dB with a built-in linear ramp.
///
/// `target` is what the host/UI last requested; `current` is what the
/// audio path applies, advanced one step per call to
/// [`next_value`](Self::next_value). After exactly
/// [`ramp_samples`](Self::ramp_samples) advances the current value
/// equals the target with no residual error.
#[derive(Debug, Clone)]
pub struct SmoothedGain {
    /// Value currently applied by the audio path
    current: f32,
    /// Value we are ramping towards
    target: f32,
    /// Per-sample increment (positive or negative)
    increment: f32,
    /// Samples remaining until target reached
    samples_remaining: u32,
    /// Configured ramp length in samples
    ramp_samples: u32,
}

impl SmoothedGain {
    /// Create a smoothed gain at `initial` dB (clamped to the valid
    /// range), with smoothing disabled until [`reset`](Self::reset) is
    /// called.
    pub fn new(initial: f32) -> Self {
        let initial = initial.clamp(GAIN_MIN_DB, GAIN_MAX_DB);
        Self {
            current: initial,
            target: initial,
            increment: 0.0,
            samples_remaining: 0,
            ramp_samples: 0,
        }
    }

    /// Configure the ramp length and snap the current value to the
    /// target.
    ///
    /// Called at processing setup (when the sample rate becomes known)
    /// and on sample rate changes. Any ramp in flight is abandoned:
    /// after `reset` the parameter reports `is_smoothing() == false`.
    pub fn reset(&mut self, sample_rate: f32, ramp_secs: f32) {
        self.ramp_samples = if sample_rate > 0.0 && ramp_secs > 0.0 {
            (ramp_secs * sample_rate) as u32
        } else {
            0
        };
        self.current = self.target;
        self.increment = 0.0;
        self.samples_remaining = 0;
    }

    /// Record a new target, starting a ramp from the current value.
    ///
    /// Out-of-range values are clamped and reported as
    /// [`EqError::InvalidParameterValue`]; the clamped target is still
    /// applied, so callers on the control path may ignore the error.
    pub fn set_target(&mut self, target_db: f32) -> Result<(), EqError> {
        let clamped = target_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB);
        self.begin_ramp(clamped);

        if clamped == target_db {
            Ok(())
        } else {
            Err(EqError::InvalidParameterValue {
                value: target_db,
                min: GAIN_MIN_DB,
                max: GAIN_MAX_DB,
            })
        }
    }

    /// Record a new target, clamping silently.
    ///
    /// The production audio path uses this; the strict
    /// [`set_target`](Self::set_target) variant is for control surfaces
    /// that want to report out-of-range requests.
    #[inline]
    pub fn set_target_clamped(&mut self, target_db: f32) {
        self.begin_ramp(target_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB));
    }

    fn begin_ramp(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.target = target;

        if self.ramp_samples == 0 {
            // Smoothing not configured: snap.
            self.current = target;
            self.increment = 0.0;
            self.samples_remaining = 0;
        } else {
            self.increment = (target - self.current) / self.ramp_samples as f32;
            self.samples_remaining = self.ramp_samples;
        }
    }

    /// Advance one sample toward the target and return the new current
    /// value.
    ///
    /// After exactly `ramp_samples` calls the returned value equals the
    /// target exactly (the final step snaps, so float rounding cannot
    /// accumulate into a residual offset).
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.increment;
            self.samples_remaining -= 1;
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }
        self.current
    }

    /// Current applied value in dB, without advancing.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Target value in dB.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether a ramp is in flight (current != target).
    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.samples_remaining > 0
    }

    /// Configured ramp length in samples.
    #[inline]
    pub fn ramp_samples(&self) -> u32 {
        self.ramp_samples
    }
}

impl Default for SmoothedGain {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_when_ramp_not_configured() {
        let mut gain = SmoothedGain::new(0.0);
        gain.set_target(6.0).unwrap();
        assert_eq!(gain.next_value(), 6.0);
        assert!(!gain.is_smoothing());
    }

    #[test]
    fn lands_exactly_after_ramp_samples() {
        let mut gain = SmoothedGain::new(0.0);
        gain.reset(48000.0, 0.02);
        let n = gain.ramp_samples();
        assert_eq!(n, 960);

        gain.set_target(5.37).unwrap();
        let mut last = 0.0;
        for _ in 0..n {
            last = gain.next_value();
        }

        assert_eq!(last, 5.37);
        assert!(!gain.is_smoothing());
    }

    #[test]
    fn ramp_is_strictly_monotonic() {
        let mut gain = SmoothedGain::new(-3.0);
        gain.reset(44100.0, 0.02);
        gain.set_target(9.0).unwrap();

        let mut prev = gain.current();
        while gain.is_smoothing() {
            let v = gain.next_value();
            assert!(v > prev, "ramp went backwards: {prev} -> {v}");
            assert!(v <= 9.0 + 1e-4, "overshoot: {v}");
            prev = v;
        }
        assert_eq!(prev, 9.0);
    }

    #[test]
    fn downward_ramp_monotonic() {
        let mut gain = SmoothedGain::new(6.0);
        gain.reset(44100.0, 0.02);
        gain.set_target(-6.0).unwrap();

        let mut prev = gain.current();
        while gain.is_smoothing() {
            let v = gain.next_value();
            assert!(v < prev);
            prev = v;
        }
        assert_eq!(prev, -6.0);
    }

    #[test]
    fn out_of_range_target_clamps_and_errors() {
        let mut gain = SmoothedGain::new(0.0);
        let err = gain.set_target(20.0).unwrap_err();
        assert!(matches!(err, EqError::InvalidParameterValue { .. }));
        assert_eq!(gain.target(), GAIN_MAX_DB);

        assert!(gain.set_target(-100.0).is_err());
        assert_eq!(gain.target(), GAIN_MIN_DB);
    }

    #[test]
    fn reset_snaps_current_to_target() {
        let mut gain = SmoothedGain::new(0.0);
        gain.reset(48000.0, 0.02);
        gain.set_target(12.0).unwrap();
        gain.next_value();
        assert!(gain.is_smoothing());

        gain.reset(48000.0, 0.02);
        assert_eq!(gain.current(), 12.0);
        assert!(!gain.is_smoothing());
    }

    #[test]
    fn same_target_does_not_restart_ramp() {
        let mut gain = SmoothedGain::new(0.0);
        gain.reset(48000.0, 0.02);
        gain.set_target(6.0).unwrap();

        for _ in 0..100 {
            gain.next_value();
        }
        let mid = gain.current();

        gain.set_target(6.0).unwrap();
        assert_eq!(gain.current(), mid);
        assert!(gain.is_smoothing());
    }
}
