//! Biquad (bi-quadratic) filter structure.
//!
//! Provides the second-order IIR section underlying each equalizer band,
//! plus coefficient calculators for the three band shapes the equalizer
//! uses (low-shelf, peaking, high-shelf).
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use core::f32::consts::PI;
use libm::{cosf, powf, sinf, sqrtf};

/// Generic biquad filter coefficients and state.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// State (the four delay registers) belongs to exactly one audio
/// channel. Running two channels through the same instance smears the
/// delay lines across channels, so the equalizer allocates one biquad
/// per band per channel.
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients (normalized by a0)
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the biquad coefficients, normalizing by `a0` internally.
    pub fn set_coefficients(&mut self, c: Coefficients) {
        let a0_inv = 1.0 / c.a0;
        self.b0 = c.b0 * a0_inv;
        self.b1 = c.b1 * a0_inv;
        self.b2 = c.b2 * a0_inv;
        self.a1 = c.a1 * a0_inv;
        self.a2 = c.a2 * a0_inv;
    }

    /// Processes a single sample through the filter.
    ///
    /// Uses Direct Form I for numerical stability.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Clears the filter state (delay lines) without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw (un-normalized) biquad coefficients as produced by the RBJ
/// cookbook formulas. [`Biquad::set_coefficients`] divides through
/// by `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficient b0.
    pub b0: f32,
    /// Feedforward coefficient b1.
    pub b1: f32,
    /// Feedforward coefficient b2.
    pub b2: f32,
    /// Feedback coefficient a0 (normalization divisor).
    pub a0: f32,
    /// Feedback coefficient a1.
    pub a1: f32,
    /// Feedback coefficient a2.
    pub a2: f32,
}

impl Coefficients {
    /// Identity (passthrough) coefficients.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a0: 1.0,
        a1: 0.0,
        a2: 0.0,
    };
}

/// Shared intermediate terms for the cookbook formulas.
///
/// `a` is the amplitude term 10^(dB/40) (i.e. sqrt of the linear gain),
/// `alpha` is sin(w0)/(2Q).
struct Intermediates {
    a: f32,
    cos_w0: f32,
    alpha: f32,
}

fn intermediates(frequency: f32, q: f32, gain_db: f32, sample_rate: f32) -> Intermediates {
    let a = powf(10.0, gain_db / 40.0);
    let w0 = 2.0 * PI * frequency / sample_rate;
    Intermediates {
        a,
        cos_w0: cosf(w0),
        alpha: sinf(w0) / (2.0 * q),
    }
}

/// Calculates peaking EQ coefficients using the RBJ cookbook formula.
///
/// Boosts or cuts around `frequency` with bandwidth controlled by `q`.
/// At `gain_db == 0` the result is an identity filter.
pub fn peaking_coefficients(frequency: f32, q: f32, gain_db: f32, sample_rate: f32) -> Coefficients {
    let Intermediates { a, cos_w0, alpha } = intermediates(frequency, q, gain_db, sample_rate);

    Coefficients {
        b0: 1.0 + alpha * a,
        b1: -2.0 * cos_w0,
        b2: 1.0 - alpha * a,
        a0: 1.0 + alpha / a,
        a1: -2.0 * cos_w0,
        a2: 1.0 - alpha / a,
    }
}

/// Calculates low-shelf coefficients using the RBJ cookbook formula.
///
/// Boosts or cuts everything below the corner `frequency` by `gain_db`.
/// `q = 0.707` corresponds to shelf slope S = 1 (the steepest slope
/// that stays monotonic).
pub fn low_shelf_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> Coefficients {
    let Intermediates { a, cos_w0, alpha } = intermediates(frequency, q, gain_db, sample_rate);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    Coefficients {
        b0: a * ((a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
        b1: 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_w0),
        b2: a * ((a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
        a0: (a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
        a1: -2.0 * ((a - 1.0) + (a + 1.0) * cos_w0),
        a2: (a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
    }
}

/// Calculates high-shelf coefficients using the RBJ cookbook formula.
///
/// Boosts or cuts everything above the corner `frequency` by `gain_db`.
pub fn high_shelf_coefficients(
    frequency: f32,
    q: f32,
    gain_db: f32,
    sample_rate: f32,
) -> Coefficients {
    let Intermediates { a, cos_w0, alpha } = intermediates(frequency, q, gain_db, sample_rate);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    Coefficients {
        b0: a * ((a + 1.0) + (a - 1.0) * cos_w0 + two_sqrt_a_alpha),
        b1: -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_w0),
        b2: a * ((a + 1.0) + (a - 1.0) * cos_w0 - two_sqrt_a_alpha),
        a0: (a + 1.0) - (a - 1.0) * cos_w0 + two_sqrt_a_alpha,
        a1: 2.0 * ((a - 1.0) - (a + 1.0) * cos_w0),
        a2: (a + 1.0) - (a - 1.0) * cos_w0 - two_sqrt_a_alpha,
    }
}
