//! Statistical primitives for incrementality testing — a two-scenario
//! z-test and a closed-form standard normal CDF approximation.

use serde::{Deserialize, Serialize};

/// Lowest p-value the engine reports. Caps confidence at 99.9% so an
/// extreme z-score never reads as absolute certainty.
pub const P_VALUE_FLOOR: f64 = 0.001;

/// Two-tailed significance threshold.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Outcome of a two-tailed z-test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignificanceTest {
    pub z_score: f64,
    pub p_value: f64,
    pub is_significant: bool,
}

/// Two-tailed z-test over control/test conversion and spend aggregates.
///
/// With zero control spend (a holdout that received no media) the raw
/// conversion counts are compared under a Poisson count-difference
/// approximation. When the control group carries spend, conversions per
/// dollar are compared as pooled proportions.
///
/// A zero or non-finite standard error yields z = 0 rather than a
/// division; the p-value is clamped to [`P_VALUE_FLOOR`, 1.0].
pub fn z_test(
    control_conversions: f64,
    test_conversions: f64,
    control_spend: f64,
    test_spend: f64,
) -> SignificanceTest {
    let z_score = if control_spend == 0.0 {
        let std_error = (control_conversions + test_conversions).sqrt();
        if std_error > 0.0 {
            (test_conversions - control_conversions).abs() / std_error
        } else {
            0.0
        }
    } else {
        let p_control = control_conversions / control_spend;
        let p_test = if test_spend > 0.0 {
            test_conversions / test_spend
        } else {
            0.0
        };
        let pooled = (control_conversions + test_conversions) / (control_spend + test_spend);
        let std_error =
            (pooled * (1.0 - pooled) * (1.0 / control_spend + 1.0 / test_spend)).sqrt();
        if std_error.is_finite() && std_error > 0.0 {
            (p_control - p_test).abs() / std_error
        } else {
            0.0
        }
    };

    let raw_p = if z_score > 0.0 {
        2.0 * (1.0 - normal_cdf(z_score))
    } else {
        1.0
    };
    let p_value = raw_p.clamp(P_VALUE_FLOOR, 1.0);

    SignificanceTest {
        z_score,
        p_value,
        is_significant: p_value < SIGNIFICANCE_LEVEL,
    }
}

/// Standard normal CDF via the Abramowitz-Stegun rational approximation
/// (formula 26.2.17, absolute error below 7.5e-8). The coefficients are
/// inlined so independent implementations produce bit-comparable
/// statistics.
pub fn normal_cdf(x: f64) -> f64 {
    if x < 0.0 {
        return 1.0 - normal_cdf(-x);
    }

    const P: f64 = 0.231_641_9;
    const B1: f64 = 0.319_381_530;
    const B2: f64 = -0.356_563_782;
    const B3: f64 = 1.781_477_937;
    const B4: f64 = -1.821_255_978;
    const B5: f64 = 1.330_274_429;

    let t = 1.0 / (1.0 + P * x);
    let poly = t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
    let density = (-x * x / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    1.0 - density * poly
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
