//! The processing-engine boundary between a host and the DSP core.
//!
//! A host (plugin wrapper, offline file processor, test harness) drives
//! the core exclusively through [`ProcessingEngine`]: it announces the
//! stream format with `prepare`, hands over planar sample buffers with
//! `process_block`, and clears state with `reset` on transport jumps.
//! The core never references the host.

use crate::error::EqError;

/// Object-safe trait implemented by audio processors driven by a host.
///
/// # Real-time contract
///
/// `process_block` is called from a real-time context with a hard
/// deadline: implementations must not allocate, lock, or block on I/O.
/// All allocation happens in `prepare`.
///
/// # Buffer layout
///
/// Audio is planar: one `&mut [f32]` per channel, all the same length,
/// at most `max_block_size` samples as announced to `prepare`.
/// Processing is in-place.
pub trait ProcessingEngine {
    /// Announce the stream format and allocate per-channel state.
    ///
    /// Must be called before the first `process_block`. May be called
    /// again to change the format; doing so resets all internal state.
    ///
    /// # Errors
    ///
    /// [`EqError::InvalidSampleRate`] for a non-positive or non-finite
    /// sample rate, [`EqError::InvalidChannelCount`] for zero channels.
    fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        num_channels: usize,
    ) -> Result<(), EqError>;

    /// Process one block of planar audio in-place.
    ///
    /// # Errors
    ///
    /// [`EqError::NotPrepared`] if called before `prepare`.
    fn process_block(&mut self, channels: &mut [&mut [f32]]) -> Result<(), EqError>;

    /// Zero all internal processing state (delay lines, ramps) without
    /// forgetting the stream format or parameter targets.
    fn reset(&mut self);
}
