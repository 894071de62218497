//! Property tests over gain settings, signals, and block layouts.

use proptest::prelude::*;
use triband_core::ProcessingEngine;
use triband_eq::ThreeBandEq;

fn gain_db() -> impl Strategy<Value = f32> {
    -12.0f32..=12.0f32
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Whatever gains are dialed in, bounded input gives bounded,
    /// finite output. Worst case is all three bands boosting the same
    /// region, which stays far below 100x.
    #[test]
    fn bounded_input_gives_bounded_output(
        bass in gain_db(),
        mid in gain_db(),
        treble in gain_db(),
        samples in prop::collection::vec(-1.0f32..=1.0, 256..2048),
    ) {
        let mut eq = ThreeBandEq::new();
        eq.prepare(48000.0, 2048, 1).unwrap();
        eq.set_bass_gain(bass);
        eq.set_mid_gain(mid);
        eq.set_treble_gain(treble);

        let mut buf = samples;
        eq.process_block(&mut [&mut buf]).unwrap();

        for &s in &buf {
            prop_assert!(s.is_finite());
            prop_assert!(s.abs() < 100.0, "output blew up: {s}");
        }
    }

    /// Splitting a stream into blocks of any size never changes the
    /// output, even while gain ramps are in flight.
    #[test]
    fn block_split_is_transparent(
        bass in gain_db(),
        treble in gain_db(),
        block_size in 1usize..512,
    ) {
        let input: Vec<f32> = (0..2048)
            .map(|i| (i as f32 * 0.05).sin() * 0.8)
            .collect();

        let mut eq_whole = ThreeBandEq::new();
        eq_whole.prepare(48000.0, 2048, 1).unwrap();
        eq_whole.set_bass_gain(bass);
        eq_whole.set_treble_gain(treble);
        let mut whole = input.clone();
        eq_whole.process_block(&mut [&mut whole]).unwrap();

        let mut eq_split = ThreeBandEq::new();
        eq_split.prepare(48000.0, 2048, 1).unwrap();
        eq_split.set_bass_gain(bass);
        eq_split.set_treble_gain(treble);
        let mut split = input;
        for chunk in split.chunks_mut(block_size) {
            eq_split.process_block(&mut [chunk]).unwrap();
        }

        prop_assert_eq!(whole, split);
    }

    /// Silence stays silence regardless of gain settings: the filters
    /// are linear and carry no offset.
    #[test]
    fn silence_in_silence_out(
        bass in gain_db(),
        mid in gain_db(),
        treble in gain_db(),
    ) {
        let mut eq = ThreeBandEq::new();
        eq.prepare(44100.0, 1024, 2).unwrap();
        eq.set_bass_gain(bass);
        eq.set_mid_gain(mid);
        eq.set_treble_gain(treble);

        let mut left = vec![0.0f32; 1024];
        let mut right = vec![0.0f32; 1024];
        eq.process_block(&mut [&mut left, &mut right]).unwrap();

        prop_assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
    }
}
