//! WAV file reading and writing in planar f32 form.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
///
/// Much faster than [`read_wav`] when only the header matters.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / spec.channels as u64;
    let duration_secs = num_frames as f64 / spec.sample_rate as f64;

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Planar (channel-per-buffer) f32 audio.
///
/// WAV files store samples interleaved; the equalizer processes one
/// slice per channel. This type holds the planar form and converts at
/// the file boundary. All channels always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarAudio {
    channels: Vec<Vec<f32>>,
}

impl PlanarAudio {
    /// Create a silent buffer with the given layout.
    pub fn silent(num_channels: usize, num_frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_frames]; num_channels],
        }
    }

    /// Build from per-channel sample vectors.
    ///
    /// Fails if there are no channels or the channels disagree on
    /// length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Result<Self> {
        let first_len = channels
            .first()
            .ok_or_else(|| Error::MalformedBuffer("no channels".into()))?
            .len();
        if channels.iter().any(|c| c.len() != first_len) {
            return Err(Error::MalformedBuffer(
                "channels have differing lengths".into(),
            ));
        }
        Ok(Self { channels })
    }

    /// Deinterleave `frames * num_channels` samples into planar form.
    pub fn from_interleaved(samples: &[f32], num_channels: usize) -> Result<Self> {
        if num_channels == 0 {
            return Err(Error::MalformedBuffer("no channels".into()));
        }
        if samples.len() % num_channels != 0 {
            return Err(Error::MalformedBuffer(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                num_channels
            )));
        }

        let num_frames = samples.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(num_frames); num_channels];
        for frame in samples.chunks_exact(num_channels) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Ok(Self { channels })
    }

    /// Interleave back into frame order for writing.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.num_channels() * self.num_frames());
        for i in 0..self.num_frames() {
            for channel in &self.channels {
                out.push(channel[i]);
            }
        }
        out
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Read-only view of the channel buffers.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Mutable per-channel slices, the shape `process_block` takes.
    pub fn channel_slices(&mut self) -> Vec<&mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice).collect()
    }

    /// Largest absolute sample value across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()))
    }
}

/// Read a WAV file into planar f32 audio, preserving all channels.
///
/// Integer PCM samples are scaled to [-1, 1).
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(PlanarAudio, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let num_channels = spec.channels as usize;

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let audio = PlanarAudio::from_interleaved(&interleaved, num_channels)?;
    tracing::debug!(
        channels = num_channels,
        frames = audio.num_frames(),
        sample_rate = spec.sample_rate,
        "loaded WAV file"
    );
    Ok((audio, spec))
}

/// Write planar audio to a WAV file.
///
/// The channel count is taken from `audio`; `spec.channels` is ignored.
/// 32-bit output is IEEE float, anything else integer PCM with
/// clamping.
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &PlanarAudio, spec: WavSpec) -> Result<()> {
    if audio.num_channels() == 0 {
        return Err(Error::MalformedBuffer("no channels".into()));
    }

    let mut out_spec = spec;
    out_spec.channels = audio.num_channels() as u16;
    let mut writer = WavWriter::create(path, hound::WavSpec::from(out_spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in &audio.to_interleaved() {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in &audio.to_interleaved() {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
