//! Error taxonomy for the equalizer core.
//!
//! Only setup-time misuse can fail: runtime inputs (gain targets) are
//! clamped before they reach the filters, so per-sample errors are
//! impossible by construction.

/// Errors raised by the equalizer core and its building blocks.
///
/// Fatal vs recoverable:
///
/// - [`InvalidSampleRate`](Self::InvalidSampleRate) and
///   [`InvalidChannelCount`](Self::InvalidChannelCount) are fatal at
///   prepare time (malformed host configuration).
/// - [`NotPrepared`](Self::NotPrepared) indicates a caller contract
///   violation (processing before setup).
/// - [`InvalidParameterValue`](Self::InvalidParameterValue) and
///   [`InvalidFrequency`](Self::InvalidFrequency) are recovered by
///   clamping in production paths; they surface only through the strict
///   setter APIs so tests can assert on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EqError {
    /// A gain value outside the valid dB range was requested.
    InvalidParameterValue {
        /// The requested value.
        value: f32,
        /// Lower bound of the valid range.
        min: f32,
        /// Upper bound of the valid range.
        max: f32,
    },
    /// A band center frequency at or beyond Nyquist, or non-positive.
    InvalidFrequency {
        /// The requested frequency in Hz.
        frequency: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f32,
    },
    /// Processing was invoked before `prepare`.
    NotPrepared,
    /// `prepare` was called with zero channels.
    InvalidChannelCount(usize),
    /// `prepare` was called with a non-positive or non-finite sample rate.
    InvalidSampleRate(f32),
}

impl core::fmt::Display for EqError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidParameterValue { value, min, max } => {
                write!(f, "gain {value} dB outside valid range [{min}, {max}] dB")
            }
            Self::InvalidFrequency { frequency, nyquist } => {
                write!(
                    f,
                    "frequency {frequency} Hz outside open interval (0, {nyquist}) Hz"
                )
            }
            Self::NotPrepared => write!(f, "processing invoked before prepare"),
            Self::InvalidChannelCount(n) => write!(f, "invalid channel count: {n}"),
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate: {sr} Hz"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EqError {}
