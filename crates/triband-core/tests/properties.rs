//! Property-based tests for the DSP primitives.
//!
//! Verifies the stability invariant (no pole outside the unit circle
//! anywhere in the supported gain/frequency/sample-rate envelope) and
//! the exact-landing contract of the gain ramp.

use proptest::prelude::*;
use triband_core::{BandFilter, BandKind, SmoothedGain};

fn band_kinds() -> impl Strategy<Value = BandKind> {
    prop_oneof![
        Just(BandKind::LowShelf),
        Just(BandKind::Peaking),
        Just(BandKind::HighShelf),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any gain in [-12, 12] dB, frequency in (0, Nyquist), and
    /// audio sample rate in [8 kHz, 192 kHz], the impulse response must
    /// stay bounded and decay, i.e. the filter is stable.
    #[test]
    fn impulse_response_bounded_and_decaying(
        kind in band_kinds(),
        gain_db in -12.0f32..=12.0,
        freq_frac in 0.001f32..=0.99,
        sample_rate in 8000.0f32..=192000.0,
        q in 0.5f32..=2.0,
    ) {
        let frequency = freq_frac * sample_rate / 2.0;
        prop_assume!(frequency > 1.0);

        let mut band = BandFilter::new(kind);
        band.prepare(sample_rate).unwrap();
        band.set_response(gain_db, frequency, q).unwrap();

        let mut peak_tail = 0.0f32;
        for n in 0..10_000 {
            let x = if n == 0 { 1.0 } else { 0.0 };
            let y = band.process_sample(x).unwrap();
            prop_assert!(y.is_finite(), "non-finite output at sample {}", n);
            prop_assert!(y.abs() < 100.0, "impulse response grew to {} at sample {}", y, n);
            if n >= 9_000 {
                peak_tail = peak_tail.max(y.abs());
            }
        }

        // Any stable second-order section in this envelope has decayed
        // well below the initial impulse after 10k samples.
        prop_assert!(
            peak_tail < 1.0,
            "impulse response tail did not decay: {}",
            peak_tail
        );
    }

    /// After set_target(t) and exactly N advances (N = ramp samples),
    /// the returned value equals t, and intermediate values move
    /// monotonically toward it.
    #[test]
    fn ramp_lands_exactly_and_monotonically(
        start in -12.0f32..=12.0,
        target in -12.0f32..=12.0,
        sample_rate in 8000.0f32..=192000.0,
        ramp_ms in 5.0f32..=50.0,
    ) {
        // Keep the per-sample increment comfortably above f32 epsilon
        // at this magnitude, or "strictly monotonic" is unobservable.
        prop_assume!((start - target).abs() > 0.5);

        let mut gain = SmoothedGain::new(start);
        gain.reset(sample_rate, ramp_ms / 1000.0);
        let n = gain.ramp_samples();
        prop_assume!(n > 0);

        gain.set_target(target).unwrap();

        let ascending = target > start;
        let mut prev = gain.current();
        let mut last = prev;
        for _ in 0..n {
            last = gain.next_value();
            if ascending {
                prop_assert!(last > prev, "ramp not strictly increasing: {} -> {}", prev, last);
            } else {
                prop_assert!(last < prev, "ramp not strictly decreasing: {} -> {}", prev, last);
            }
            prev = last;
        }

        prop_assert_eq!(last, target);
        prop_assert!(!gain.is_smoothing());

        // Further advances stay pinned at the target.
        prop_assert_eq!(gain.next_value(), target);
    }

    /// White-noise input through any valid band yields bounded output.
    #[test]
    fn noise_input_stays_bounded(
        kind in band_kinds(),
        gain_db in -12.0f32..=12.0,
        input in prop::collection::vec(-1.0f32..=1.0, 512),
    ) {
        let mut band = BandFilter::new(kind);
        band.prepare(48000.0).unwrap();
        band.set_response(gain_db, 1000.0, 0.707).unwrap();

        for &x in &input {
            let y = band.process_sample(x).unwrap();
            prop_assert!(y.is_finite());
            // +12 dB is a 4x amplitude ceiling; transients may ring a
            // little above the static gain.
            prop_assert!(y.abs() < 8.0, "output {} out of bounds", y);
        }
    }
}
