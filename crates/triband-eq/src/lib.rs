//! # triband-eq
//!
//! Three-band equalizer core: a low-shelf bass band, a peaking mid
//! band, and a high-shelf treble band, each with a gain control in
//! [-12, +12] dB.
//!
//! The crate is split along the control/audio boundary:
//!
//! - [`ThreeBandEq`] is the audio-side engine. It implements
//!   [`triband_core::ProcessingEngine`] and processes planar f32 blocks
//!   in place, with per-sample gain ramps and per-channel filter state.
//! - [`EqParams`] is the control-side parameter store: three lock-free
//!   gain cells shared with the audio thread through an `Arc`.
//! - [`EqSnapshot`] is the persistent state: the three gain targets as
//!   a JSON blob, tolerant of unknown and missing keys.
//!
//! ## Quick start
//!
//! ```rust
//! use triband_core::ProcessingEngine;
//! use triband_eq::ThreeBandEq;
//!
//! let mut eq = ThreeBandEq::new();
//! eq.prepare(48000.0, 512, 2).unwrap();
//!
//! // Control thread (here: same thread) publishes targets.
//! let params = eq.params();
//! params.bass.store(4.5);
//! params.treble.store(-3.0);
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! eq.process_block(&mut [&mut left, &mut right]).unwrap();
//! ```

pub mod eq;
pub mod params;
pub mod state;

pub use eq::{BAND_Q, BASS_FREQUENCY_HZ, MID_FREQUENCY_HZ, TREBLE_FREQUENCY_HZ, ThreeBandEq};
pub use params::{EqParams, GainCell};
pub use state::EqSnapshot;
