//! Test signal generation command.

use clap::{Args, Subcommand};
use std::path::PathBuf;
use triband_io::{PlanarAudio, WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        frequency: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate a single-sample impulse followed by silence
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (output, samples, sample_rate) = match args.command {
        GenerateCommand::Tone {
            output,
            frequency,
            duration,
            sample_rate,
            amplitude,
        } => {
            let len = (duration * sample_rate as f32) as usize;
            let samples = (0..len)
                .map(|i| {
                    let phase = core::f32::consts::TAU * frequency * i as f32 / sample_rate as f32;
                    phase.sin() * amplitude
                })
                .collect();
            (output, samples, sample_rate)
        }

        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
            amplitude,
        } => {
            let mut samples = vec![0.0f32; length];
            if let Some(first) = samples.first_mut() {
                *first = amplitude;
            }
            (output, samples, sample_rate)
        }

        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            let len = (duration * sample_rate as f32) as usize;
            let samples = white_noise(len, amplitude);
            (output, samples, sample_rate)
        }
    };

    let audio = PlanarAudio::from_channels(vec![samples])?;
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };

    println!(
        "Writing {} ({} frames, {} Hz)...",
        output.display(),
        audio.num_frames(),
        sample_rate
    );
    write_wav(&output, &audio, spec)?;
    println!("Done!");

    Ok(())
}

/// White noise in [-amplitude, amplitude] from a xorshift PRNG.
fn white_noise(len: usize, amplitude: f32) -> Vec<f32> {
    let mut state = 0x2545_F491u32;
    (0..len)
        .map(|_| {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            state = x;
            (x as i32 as f32) / (i32::MAX as f32) * amplitude
        })
        .collect()
}
