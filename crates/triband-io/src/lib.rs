//! WAV file I/O and offline rendering for the triband equalizer.
//!
//! This crate provides:
//!
//! - **Planar audio buffers**: [`PlanarAudio`], the channel-per-slice
//!   layout the equalizer processes, with interleaved conversion for
//!   file I/O
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for any channel
//!   count, PCM or float
//! - **Offline rendering**: [`render`] drives any
//!   [`ProcessingEngine`](triband_core::ProcessingEngine) over a buffer
//!   in fixed-size blocks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use triband_eq::ThreeBandEq;
//! use triband_io::{read_wav, render, write_wav};
//!
//! let (mut audio, spec) = read_wav("input.wav")?;
//!
//! let mut eq = ThreeBandEq::new();
//! eq.set_bass_gain(4.0);
//! render(&mut eq, &mut audio, 512)?;
//!
//! write_wav("output.wav", &audio, spec)?;
//! ```

mod host;
mod wav;

pub use host::{RenderStats, render, render_with_progress};
pub use wav::{PlanarAudio, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for file I/O and offline rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The processing engine rejected the stream or a block.
    #[error("processing error: {0}")]
    Engine(#[from] triband_core::EqError),

    /// The audio buffer has no channels or mismatched channel lengths.
    #[error("malformed audio buffer: {0}")]
    MalformedBuffer(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for I/O and rendering operations.
pub type Result<T> = std::result::Result<T, Error>;
