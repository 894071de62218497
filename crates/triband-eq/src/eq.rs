//! Three-band equalizer: low-shelf bass, peaking mid, high-shelf treble.
//!
//! [`ThreeBandEq`] owns one bass→mid→treble filter chain per audio
//! channel and three gain ramps shared across channels. Per block it
//! pulls the published gain targets into the ramps, advances each ramp
//! once per sample index, recomputes band coefficients only when a
//! smoothed gain actually moved, and runs every channel's samples
//! through its chain in-place.

use std::sync::Arc;

use triband_core::{
    BandFilter, BandKind, DEFAULT_RAMP_SECS, EqError, GAIN_MAX_DB, GAIN_MIN_DB, GAIN_STEP_DB,
    ParamDescriptor, ParameterInfo, ProcessingEngine, SmoothedGain,
};

use crate::params::EqParams;
use crate::state::EqSnapshot;

/// Default bass (low-shelf) corner frequency in Hz.
pub const BASS_FREQUENCY_HZ: f32 = 100.0;
/// Default mid (peaking) center frequency in Hz.
pub const MID_FREQUENCY_HZ: f32 = 1000.0;
/// Default treble (high-shelf) corner frequency in Hz.
pub const TREBLE_FREQUENCY_HZ: f32 = 8000.0;
/// Q for all three bands (shelf slope S = 1 for the shelves).
pub const BAND_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Band frequencies are capped at 95% of Nyquist so low sample rates
/// (down to 8 kHz) cannot push a band into the unstable region.
const NYQUIST_MARGIN: f32 = 0.475;

/// One channel's filter chain. Delay-line state is per channel; gains
/// and coefficients are identical across channels.
#[derive(Debug, Clone)]
struct ChannelChain {
    bass: BandFilter,
    mid: BandFilter,
    treble: BandFilter,
}

impl ChannelChain {
    fn new() -> Self {
        Self {
            bass: BandFilter::new(BandKind::LowShelf),
            mid: BandFilter::new(BandKind::Peaking),
            treble: BandFilter::new(BandKind::HighShelf),
        }
    }

    fn prepare(&mut self, sample_rate: f32) -> Result<(), EqError> {
        self.bass.prepare(sample_rate)?;
        self.mid.prepare(sample_rate)?;
        self.treble.prepare(sample_rate)
    }

    /// Bass → mid → treble, in that order. The order is audible (the
    /// bands interact through their phase response), so it is fixed
    /// here rather than configurable.
    #[inline]
    fn process(&mut self, input: f32) -> Result<f32, EqError> {
        let after_bass = self.bass.process_sample(input)?;
        let after_mid = self.mid.process_sample(after_bass)?;
        self.treble.process_sample(after_mid)
    }

    fn reset(&mut self) {
        self.bass.reset();
        self.mid.reset();
        self.treble.reset();
    }
}

/// Which of the three bands a coefficient update targets.
#[derive(Debug, Clone, Copy)]
enum BandSlot {
    Bass,
    Mid,
    Treble,
}

/// Three-band equalizer core.
///
/// # Lifecycle
///
/// Construct once, [`prepare`](ProcessingEngine::prepare) when the
/// stream format is known (allocates the per-channel chains), then feed
/// blocks. `prepare` may be called again on format changes.
///
/// # Threading
///
/// Gain setters go through the lock-free [`EqParams`] cells and may be
/// called from a control thread while `process_block` runs on the audio
/// thread. Clone the handle with [`params`](Self::params).
///
/// # Example
///
/// ```rust
/// use triband_core::ProcessingEngine;
/// use triband_eq::ThreeBandEq;
///
/// let mut eq = ThreeBandEq::new();
/// eq.prepare(48000.0, 512, 2).unwrap();
/// eq.set_bass_gain(6.0);
///
/// let mut left = vec![0.1f32; 512];
/// let mut right = vec![0.1f32; 512];
/// eq.process_block(&mut [&mut left, &mut right]).unwrap();
/// ```
#[derive(Debug)]
pub struct ThreeBandEq {
    params: Arc<EqParams>,

    // Gain ramps, shared across channels (gain is not per-channel)
    bass: SmoothedGain,
    mid: SmoothedGain,
    treble: SmoothedGain,

    // One filter chain per channel
    channels: Vec<ChannelChain>,

    sample_rate: f32,
    max_block_size: usize,
    ramp_secs: f32,
    prepared: bool,

    // Band frequencies after the Nyquist cap applied at prepare time
    bass_freq: f32,
    mid_freq: f32,
    treble_freq: f32,

    // Gains currently baked into the coefficients; the change guard
    // that keeps per-sample recomputation off the steady-state path
    applied_bass_db: f32,
    applied_mid_db: f32,
    applied_treble_db: f32,
}

impl ThreeBandEq {
    /// Create an unprepared equalizer with all gains at 0 dB and the
    /// default 20 ms gain ramp.
    pub fn new() -> Self {
        Self::with_params(Arc::new(EqParams::new()))
    }

    /// Create an equalizer bound to an existing parameter store, e.g.
    /// one a host adapter already handed to its UI layer.
    pub fn with_params(params: Arc<EqParams>) -> Self {
        Self {
            params,
            bass: SmoothedGain::new(0.0),
            mid: SmoothedGain::new(0.0),
            treble: SmoothedGain::new(0.0),
            channels: Vec::new(),
            sample_rate: 0.0,
            max_block_size: 0,
            ramp_secs: DEFAULT_RAMP_SECS,
            prepared: false,
            bass_freq: BASS_FREQUENCY_HZ,
            mid_freq: MID_FREQUENCY_HZ,
            treble_freq: TREBLE_FREQUENCY_HZ,
            applied_bass_db: 0.0,
            applied_mid_db: 0.0,
            applied_treble_db: 0.0,
        }
    }

    /// Shared handle to the gain targets for control surfaces.
    pub fn params(&self) -> Arc<EqParams> {
        Arc::clone(&self.params)
    }

    /// Override the gain ramp window (default 20 ms). Takes effect at
    /// the next `prepare`.
    pub fn set_ramp_secs(&mut self, ramp_secs: f32) {
        self.ramp_secs = ramp_secs;
    }

    /// Set the bass (low-shelf) gain target in dB, clamped to
    /// [-12, +12].
    pub fn set_bass_gain(&self, db: f32) {
        self.params.bass.store(db);
    }

    /// Set the mid (peaking) gain target in dB, clamped to [-12, +12].
    pub fn set_mid_gain(&self, db: f32) {
        self.params.mid.store(db);
    }

    /// Set the treble (high-shelf) gain target in dB, clamped to
    /// [-12, +12].
    pub fn set_treble_gain(&self, db: f32) {
        self.params.treble.store(db);
    }

    /// Current bass gain target in dB.
    pub fn bass_gain(&self) -> f32 {
        self.params.bass.load()
    }

    /// Current mid gain target in dB.
    pub fn mid_gain(&self) -> f32 {
        self.params.mid.load()
    }

    /// Current treble gain target in dB.
    pub fn treble_gain(&self) -> f32 {
        self.params.treble.load()
    }

    /// Capture the persistent state (the three gain targets).
    pub fn snapshot(&self) -> EqSnapshot {
        EqSnapshot {
            bass_db: self.params.bass.load(),
            mid_db: self.params.mid.load(),
            treble_db: self.params.treble.load(),
        }
    }

    /// Restore persistent state. Gains are clamped and applied as new
    /// targets, so restoring mid-playback ramps instead of clicking.
    pub fn apply_snapshot(&self, snapshot: EqSnapshot) {
        let snapshot = snapshot.clamped();
        self.params.bass.store(snapshot.bass_db);
        self.params.mid.store(snapshot.mid_db);
        self.params.treble.store(snapshot.treble_db);
    }

    /// Number of channels the equalizer is prepared for.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Maximum block size announced at the last `prepare`.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    fn update_band(
        channels: &mut [ChannelChain],
        slot: BandSlot,
        gain_db: f32,
        frequency: f32,
        q: f32,
    ) -> Result<(), EqError> {
        for chain in channels.iter_mut() {
            let band = match slot {
                BandSlot::Bass => &mut chain.bass,
                BandSlot::Mid => &mut chain.mid,
                BandSlot::Treble => &mut chain.treble,
            };
            band.set_response(gain_db, frequency, q)?;
        }
        Ok(())
    }
}

impl Default for ThreeBandEq {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingEngine for ThreeBandEq {
    fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        num_channels: usize,
    ) -> Result<(), EqError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EqError::InvalidSampleRate(sample_rate));
        }
        if num_channels == 0 {
            return Err(EqError::InvalidChannelCount(num_channels));
        }

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;

        let max_freq = sample_rate * NYQUIST_MARGIN;
        self.bass_freq = BASS_FREQUENCY_HZ.min(max_freq);
        self.mid_freq = MID_FREQUENCY_HZ.min(max_freq);
        self.treble_freq = TREBLE_FREQUENCY_HZ.min(max_freq);

        self.channels.clear();
        for _ in 0..num_channels {
            let mut chain = ChannelChain::new();
            chain.prepare(sample_rate)?;
            self.channels.push(chain);
        }

        // Snap the ramps to the published targets; setup is not a
        // place to smooth from stale values.
        self.bass.set_target_clamped(self.params.bass.load());
        self.mid.set_target_clamped(self.params.mid.load());
        self.treble.set_target_clamped(self.params.treble.load());
        self.bass.reset(sample_rate, self.ramp_secs);
        self.mid.reset(sample_rate, self.ramp_secs);
        self.treble.reset(sample_rate, self.ramp_secs);

        let (bass_db, mid_db, treble_db) =
            (self.bass.current(), self.mid.current(), self.treble.current());
        Self::update_band(&mut self.channels, BandSlot::Bass, bass_db, self.bass_freq, BAND_Q)?;
        Self::update_band(&mut self.channels, BandSlot::Mid, mid_db, self.mid_freq, BAND_Q)?;
        Self::update_band(
            &mut self.channels,
            BandSlot::Treble,
            treble_db,
            self.treble_freq,
            BAND_Q,
        )?;
        self.applied_bass_db = bass_db;
        self.applied_mid_db = mid_db;
        self.applied_treble_db = treble_db;

        self.prepared = true;
        Ok(())
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]]) -> Result<(), EqError> {
        if !self.prepared {
            return Err(EqError::NotPrepared);
        }
        if channels.len() != self.channels.len() {
            return Err(EqError::InvalidChannelCount(channels.len()));
        }

        // Pull the published targets into the ramps once per block.
        self.bass.set_target_clamped(self.params.bass.load());
        self.mid.set_target_clamped(self.params.mid.load());
        self.treble.set_target_clamped(self.params.treble.load());

        let block_len = channels.first().map_or(0, |c| c.len());

        for i in 0..block_len {
            // Advance each ramp exactly once per sample index; gains
            // are shared across channels.
            let bass_db = self.bass.next_value();
            let mid_db = self.mid.next_value();
            let treble_db = self.treble.next_value();

            if bass_db != self.applied_bass_db {
                Self::update_band(&mut self.channels, BandSlot::Bass, bass_db, self.bass_freq, BAND_Q)?;
                self.applied_bass_db = bass_db;
            }
            if mid_db != self.applied_mid_db {
                Self::update_band(&mut self.channels, BandSlot::Mid, mid_db, self.mid_freq, BAND_Q)?;
                self.applied_mid_db = mid_db;
            }
            if treble_db != self.applied_treble_db {
                Self::update_band(
                    &mut self.channels,
                    BandSlot::Treble,
                    treble_db,
                    self.treble_freq,
                    BAND_Q,
                )?;
                self.applied_treble_db = treble_db;
            }

            for (chain, buffer) in self.channels.iter_mut().zip(channels.iter_mut()) {
                buffer[i] = chain.process(buffer[i])?;
            }
        }

        Ok(())
    }

    fn reset(&mut self) {
        for chain in &mut self.channels {
            chain.reset();
        }
        // Abandon ramps in flight; a transport jump should not replay
        // an old transition.
        self.bass.reset(self.sample_rate, self.ramp_secs);
        self.mid.reset(self.sample_rate, self.ramp_secs);
        self.treble.reset(self.sample_rate, self.ramp_secs);
    }
}

impl ParameterInfo for ThreeBandEq {
    fn param_count(&self) -> usize {
        3
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(ParamDescriptor::gain_db(
                "Bass",
                "Bass",
                GAIN_MIN_DB,
                GAIN_MAX_DB,
                0.0,
                GAIN_STEP_DB,
            )),
            1 => Some(ParamDescriptor::gain_db(
                "Mid",
                "Mid",
                GAIN_MIN_DB,
                GAIN_MAX_DB,
                0.0,
                GAIN_STEP_DB,
            )),
            2 => Some(ParamDescriptor::gain_db(
                "Treble",
                "Treble",
                GAIN_MIN_DB,
                GAIN_MAX_DB,
                0.0,
                GAIN_STEP_DB,
            )),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.bass_gain(),
            1 => self.mid_gain(),
            2 => self.treble_gain(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_bass_gain(value),
            1 => self.set_mid_gain(value),
            2 => self.set_treble_gain(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared_eq(num_channels: usize) -> ThreeBandEq {
        let mut eq = ThreeBandEq::new();
        eq.prepare(48000.0, 512, num_channels).unwrap();
        eq
    }

    #[test]
    fn process_before_prepare_fails() {
        let mut eq = ThreeBandEq::new();
        let mut buf = vec![0.0f32; 16];
        assert_eq!(
            eq.process_block(&mut [&mut buf]),
            Err(EqError::NotPrepared)
        );
    }

    #[test]
    fn prepare_rejects_zero_channels() {
        let mut eq = ThreeBandEq::new();
        assert_eq!(
            eq.prepare(48000.0, 512, 0),
            Err(EqError::InvalidChannelCount(0))
        );
    }

    #[test]
    fn prepare_rejects_bad_sample_rate() {
        let mut eq = ThreeBandEq::new();
        assert!(matches!(
            eq.prepare(0.0, 512, 2),
            Err(EqError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            eq.prepare(-1.0, 512, 2),
            Err(EqError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn channel_count_mismatch_is_rejected() {
        let mut eq = prepared_eq(2);
        let mut mono = vec![0.0f32; 16];
        assert_eq!(
            eq.process_block(&mut [&mut mono]),
            Err(EqError::InvalidChannelCount(1))
        );
    }

    #[test]
    fn flat_eq_passes_dc() {
        let mut eq = prepared_eq(1);
        let mut buf = vec![1.0f32; 2000];
        eq.process_block(&mut [&mut buf]).unwrap();
        let last = *buf.last().unwrap();
        assert!((last - 1.0).abs() < 1e-4, "flat EQ altered DC: {last}");
    }

    #[test]
    fn gain_setters_clamp() {
        let mut eq = prepared_eq(1);
        eq.set_bass_gain(40.0);
        assert_eq!(eq.bass_gain(), GAIN_MAX_DB);
        eq.set_param(1, -40.0);
        assert_eq!(eq.mid_gain(), GAIN_MIN_DB);
    }

    #[test]
    fn low_sample_rate_keeps_treble_below_nyquist() {
        // 8 kHz sample rate: the 8 kHz treble default is above Nyquist
        // and must be capped instead of erroring or going unstable.
        let mut eq = ThreeBandEq::new();
        eq.prepare(8000.0, 256, 1).unwrap();
        eq.set_treble_gain(12.0);

        let mut buf: Vec<f32> = (0..4096).map(|i| (i as f32 * 0.7).sin() * 0.5).collect();
        eq.process_block(&mut [&mut buf]).unwrap();
        assert!(buf.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn snapshot_round_trip_through_params() {
        let eq = ThreeBandEq::new();
        eq.set_bass_gain(4.0);
        eq.set_mid_gain(-2.5);
        eq.set_treble_gain(7.0);

        let snap = eq.snapshot();
        let other = ThreeBandEq::new();
        other.apply_snapshot(snap);

        assert_eq!(other.bass_gain(), 4.0);
        assert_eq!(other.mid_gain(), -2.5);
        assert_eq!(other.treble_gain(), 7.0);
    }

    #[test]
    fn param_info_exposes_range_and_step() {
        let eq = ThreeBandEq::new();
        assert_eq!(eq.param_count(), 3);

        for i in 0..3 {
            let desc = eq.param_info(i).unwrap();
            assert_eq!(desc.min, GAIN_MIN_DB);
            assert_eq!(desc.max, GAIN_MAX_DB);
            assert_eq!(desc.step, GAIN_STEP_DB);
            assert_eq!(desc.default, 0.0);
        }
        assert!(eq.param_info(3).is_none());
        assert_eq!(eq.find_param_by_name("treble"), Some(2));
    }

    #[test]
    fn reset_clears_filter_state() {
        let mut eq = prepared_eq(1);
        eq.set_bass_gain(12.0);

        let mut buf = vec![0.9f32; 1024];
        eq.process_block(&mut [&mut buf]).unwrap();

        eq.reset();

        // After reset, silence in gives silence out (no ringing tail
        // from the previous block).
        let mut silence = vec![0.0f32; 256];
        eq.process_block(&mut [&mut silence]).unwrap();
        assert!(silence.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn reprepare_changes_channel_layout() {
        let mut eq = prepared_eq(1);
        assert_eq!(eq.num_channels(), 1);
        eq.prepare(44100.0, 256, 4).unwrap();
        assert_eq!(eq.num_channels(), 4);

        let mut bufs: Vec<Vec<f32>> = vec![vec![0.25; 64]; 4];
        let mut refs: Vec<&mut [f32]> = bufs.iter_mut().map(|b| b.as_mut_slice()).collect();
        eq.process_block(&mut refs).unwrap();
    }
}
