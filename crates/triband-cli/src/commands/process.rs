//! File-based equalization command.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use triband_core::{ProcessingEngine, math::linear_to_db};
use triband_eq::{EqSnapshot, ThreeBandEq};
use triband_io::{WavSpec, read_wav, render_with_progress, write_wav};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Bass (low-shelf, 100 Hz) gain in dB
    #[arg(short, long, allow_hyphen_values = true)]
    bass: Option<f32>,

    /// Mid (peaking, 1 kHz) gain in dB
    #[arg(short, long, allow_hyphen_values = true)]
    mid: Option<f32>,

    /// Treble (high-shelf, 8 kHz) gain in dB
    #[arg(short, long, allow_hyphen_values = true)]
    treble: Option<f32>,

    /// Preset file (JSON gain snapshot); gain flags override its values
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (mut audio, spec) = read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        audio.num_frames(),
        audio.num_channels(),
        spec.sample_rate,
        audio.num_frames() as f32 / sample_rate
    );

    let mut eq = ThreeBandEq::new();
    eq.prepare(sample_rate, args.block_size, audio.num_channels())?;
    tracing::info!(
        sample_rate,
        channels = audio.num_channels(),
        block_size = args.block_size,
        "prepared equalizer"
    );

    if let Some(preset_path) = &args.preset {
        let json = std::fs::read_to_string(preset_path)?;
        let snapshot = EqSnapshot::from_json(&json)
            .map_err(|e| anyhow::anyhow!("bad preset {}: {e}", preset_path.display()))?;
        eq.apply_snapshot(snapshot);
        println!(
            "Preset: bass {:+.2} dB, mid {:+.2} dB, treble {:+.2} dB",
            snapshot.bass_db, snapshot.mid_db, snapshot.treble_db
        );
    }

    // Command-line gains override the preset where given.
    if let Some(db) = args.bass {
        eq.set_bass_gain(db);
    }
    if let Some(db) = args.mid {
        eq.set_mid_gain(db);
    }
    if let Some(db) = args.treble {
        eq.set_treble_gain(db);
    }

    println!(
        "Equalizing: bass {:+.2} dB, mid {:+.2} dB, treble {:+.2} dB",
        eq.bass_gain(),
        eq.mid_gain(),
        eq.treble_gain()
    );

    let pb = ProgressBar::new(audio.num_frames() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let stats = render_with_progress(&mut eq, &mut audio, args.block_size, |done, _| {
        pb.set_position(done as u64);
    })?;
    pb.finish_with_message("done");

    println!("\nStats:");
    println!("  Input peak:  {:+.1} dB", linear_to_db(stats.input_peak));
    println!("  Output peak: {:+.1} dB", linear_to_db(stats.output_peak));
    if stats.output_peak > 1.0 {
        println!("  Warning: output clips; consider lowering gains");
    }

    let out_spec = WavSpec {
        channels: audio.num_channels() as u16,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &audio, out_spec)?;
    println!("Done!");

    Ok(())
}
