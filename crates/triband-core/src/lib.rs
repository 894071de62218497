//! Triband Core - DSP primitives for the three-band equalizer
//!
//! This crate provides the numerical building blocks for the triband
//! equalizer, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR section with RBJ cookbook coefficients
//! - [`BandFilter`] - One equalizer band ([`BandKind`]: low-shelf,
//!   peaking, or high-shelf) with a prepare/process contract
//!
//! ## Parameter Smoothing
//!
//! - [`SmoothedGain`] - Linear dB ramp for zipper-free gain changes,
//!   with exact landing after the configured ramp length
//!
//! ## Host Boundary
//!
//! - [`ProcessingEngine`] - Object-safe trait a host drives
//!   (prepare / process_block / reset)
//! - [`ParameterInfo`] - Parameter discovery for UI and automation
//!   binding
//!
//! ## Errors
//!
//! - [`EqError`] - Setup-time error taxonomy; runtime inputs are
//!   clamped so the per-sample path cannot fail
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! triband-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations in audio processing paths
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Fail at setup, clamp at runtime**: only `prepare`-time misuse
//!   returns errors; parameter changes during processing are clamped

#![cfg_attr(not(feature = "std"), no_std)]

pub mod band;
pub mod biquad;
pub mod engine;
pub mod error;
pub mod math;
pub mod param;
pub mod param_info;

// Re-export main types at crate root
pub use band::{BandFilter, BandKind};
pub use biquad::{
    Biquad, Coefficients, high_shelf_coefficients, low_shelf_coefficients, peaking_coefficients,
};
pub use engine::ProcessingEngine;
pub use error::EqError;
pub use math::{db_to_linear, linear_to_db};
pub use param::{DEFAULT_RAMP_SECS, GAIN_MAX_DB, GAIN_MIN_DB, GAIN_STEP_DB, SmoothedGain};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
