//! Single equalizer band: one biquad stage with a fixed shape.
//!
//! A [`BandFilter`] wraps a [`Biquad`] with the setup contract the
//! equalizer needs: it must be prepared with a sample rate before it
//! can compute coefficients or process audio, and it rejects center
//! frequencies outside the open interval (0, Nyquist).

use crate::biquad::{
    Biquad, Coefficients, high_shelf_coefficients, low_shelf_coefficients, peaking_coefficients,
};
use crate::error::EqError;

/// The filter shape of a band, selected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    /// Shelving boost/cut below the corner frequency (bass).
    LowShelf,
    /// Bell-shaped boost/cut around the center frequency (mid).
    Peaking,
    /// Shelving boost/cut above the corner frequency (treble).
    HighShelf,
}

/// One second-order equalizer band.
///
/// Owns its own delay-line state; a multichannel equalizer needs one
/// `BandFilter` per band per channel.
#[derive(Debug, Clone)]
pub struct BandFilter {
    kind: BandKind,
    biquad: Biquad,
    sample_rate: f32,
    prepared: bool,
}

impl BandFilter {
    /// Create an unprepared band of the given shape.
    ///
    /// Until [`prepare`](Self::prepare) is called, coefficient updates
    /// and processing fail with [`EqError::NotPrepared`].
    pub fn new(kind: BandKind) -> Self {
        Self {
            kind,
            biquad: Biquad::new(),
            sample_rate: 0.0,
            prepared: false,
        }
    }

    /// The band's filter shape.
    pub fn kind(&self) -> BandKind {
        self.kind
    }

    /// Store the sample rate and zero the filter state.
    ///
    /// Must be called before [`set_response`](Self::set_response) or
    /// [`process_sample`](Self::process_sample). Coefficients are reset
    /// to passthrough; call `set_response` afterwards.
    pub fn prepare(&mut self, sample_rate: f32) -> Result<(), EqError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EqError::InvalidSampleRate(sample_rate));
        }
        self.sample_rate = sample_rate;
        self.biquad = Biquad::new();
        self.prepared = true;
        Ok(())
    }

    /// Whether [`prepare`](Self::prepare) has been called.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Recompute coefficients for the given response.
    ///
    /// `frequency` must lie strictly between 0 and Nyquist; violations
    /// fail with [`EqError::InvalidFrequency`] and leave the previous
    /// coefficients in place. Gain is in dB, `q` controls bandwidth
    /// (0.707 for shelf slope S = 1).
    pub fn set_response(&mut self, gain_db: f32, frequency: f32, q: f32) -> Result<(), EqError> {
        if !self.prepared {
            return Err(EqError::NotPrepared);
        }
        let nyquist = self.sample_rate / 2.0;
        if !frequency.is_finite() || frequency <= 0.0 || frequency >= nyquist {
            return Err(EqError::InvalidFrequency { frequency, nyquist });
        }

        let coeffs = self.compute_coefficients(gain_db, frequency, q);
        self.biquad.set_coefficients(coeffs);
        Ok(())
    }

    fn compute_coefficients(&self, gain_db: f32, frequency: f32, q: f32) -> Coefficients {
        match self.kind {
            BandKind::LowShelf => low_shelf_coefficients(frequency, q, gain_db, self.sample_rate),
            BandKind::Peaking => peaking_coefficients(frequency, q, gain_db, self.sample_rate),
            BandKind::HighShelf => high_shelf_coefficients(frequency, q, gain_db, self.sample_rate),
        }
    }

    /// Apply the difference equation to one sample and update state.
    ///
    /// Fails with [`EqError::NotPrepared`] if called before
    /// [`prepare`](Self::prepare). The check is a single predictable
    /// branch, cheap enough for the per-sample path.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> Result<f32, EqError> {
        if !self.prepared {
            return Err(EqError::NotPrepared);
        }
        Ok(self.biquad.process(input))
    }

    /// Zero the delay-line state without recomputing coefficients.
    pub fn reset(&mut self) {
        self.biquad.clear();
    }
}
