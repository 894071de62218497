//! Offline rendering: drive a processing engine over a buffer.

use crate::{Error, PlanarAudio, Result};
use triband_core::ProcessingEngine;

/// Summary of a completed render, for logging and CLI output.
#[derive(Debug, Clone, Copy)]
pub struct RenderStats {
    /// Frames processed.
    pub frames: usize,
    /// Blocks fed to the engine.
    pub blocks: usize,
    /// Peak absolute sample value of the input.
    pub input_peak: f32,
    /// Peak absolute sample value of the output.
    pub output_peak: f32,
}

/// Process `audio` in place through `engine` in `block_size` chunks.
///
/// The engine must already be prepared for the buffer's channel count
/// and the file's sample rate. Blocks carry at most `block_size` frames
/// (the final block may be shorter), matching how a real-time host
/// would call the engine.
pub fn render<E: ProcessingEngine>(
    engine: &mut E,
    audio: &mut PlanarAudio,
    block_size: usize,
) -> Result<RenderStats> {
    render_with_progress(engine, audio, block_size, |_, _| {})
}

/// [`render`] with a progress callback, invoked after every block with
/// `(frames_done, frames_total)`.
pub fn render_with_progress<E, F>(
    engine: &mut E,
    audio: &mut PlanarAudio,
    block_size: usize,
    mut progress: F,
) -> Result<RenderStats>
where
    E: ProcessingEngine,
    F: FnMut(usize, usize),
{
    if block_size == 0 {
        return Err(Error::MalformedBuffer("block size must be non-zero".into()));
    }

    let num_channels = audio.num_channels();
    let num_frames = audio.num_frames();
    let input_peak = audio.peak();

    let mut blocks = 0usize;
    let mut done = 0usize;
    let mut slices = audio.channel_slices();

    while done < num_frames {
        let len = block_size.min(num_frames - done);
        let mut block: Vec<&mut [f32]> = slices
            .iter_mut()
            .map(|channel| &mut channel[done..done + len])
            .collect();
        engine.process_block(&mut block)?;

        done += len;
        blocks += 1;
        progress(done, num_frames);
    }

    drop(slices);
    let output_peak = audio.peak();
    tracing::debug!(
        frames = num_frames,
        channels = num_channels,
        blocks,
        input_peak,
        output_peak,
        "offline render complete"
    );

    Ok(RenderStats {
        frames: num_frames,
        blocks,
        input_peak,
        output_peak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use triband_eq::ThreeBandEq;

    fn prepared_eq(channels: usize) -> ThreeBandEq {
        let mut eq = ThreeBandEq::new();
        eq.prepare(48000.0, 512, channels).unwrap();
        eq
    }

    #[test]
    fn renders_whole_buffer_in_blocks() {
        let mut eq = prepared_eq(2);
        let mut audio = PlanarAudio::silent(2, 1000);

        let stats = render(&mut eq, &mut audio, 512).unwrap();
        assert_eq!(stats.frames, 1000);
        assert_eq!(stats.blocks, 2); // 512 + 488
        assert_eq!(stats.output_peak, 0.0);
    }

    #[test]
    fn progress_reports_monotonically_to_total() {
        let mut eq = prepared_eq(1);
        let mut audio = PlanarAudio::silent(1, 300);

        let mut reports = Vec::new();
        render_with_progress(&mut eq, &mut audio, 128, |done, total| {
            reports.push((done, total));
        })
        .unwrap();

        assert_eq!(reports, vec![(128, 300), (256, 300), (300, 300)]);
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let mut eq = prepared_eq(1);
        let mut audio = PlanarAudio::silent(1, 64);
        assert!(matches!(
            render(&mut eq, &mut audio, 0),
            Err(Error::MalformedBuffer(_))
        ));
    }

    #[test]
    fn unprepared_engine_error_propagates() {
        let mut eq = ThreeBandEq::new();
        let mut audio = PlanarAudio::silent(1, 64);
        assert!(matches!(
            render(&mut eq, &mut audio, 32),
            Err(Error::Engine(triband_core::EqError::NotPrepared))
        ));
    }

    #[test]
    fn stats_track_peaks() {
        let mut eq = prepared_eq(1);
        eq.set_bass_gain(12.0);

        // Long DC ramp-up: output peak exceeds input peak.
        let mut audio =
            PlanarAudio::from_channels(vec![vec![0.5f32; 48000]]).unwrap();
        let stats = render(&mut eq, &mut audio, 512).unwrap();

        assert_eq!(stats.input_peak, 0.5);
        assert!(stats.output_peak > 0.9, "peak {}", stats.output_peak);
    }
}
