//! Incrementality evaluation — conversion lift between a test and control
//! population, with a significance-gated scaling recommendation.

use adlift_core::types::{IncrementalityResult, IncrementalityTest, Recommendation};
use tracing::debug;

use crate::stats;

/// Lift above which a significant test recommends scaling up.
const SCALE_UP_LIFT_PERCENT: f64 = 20.0;
/// Lift below which a significant test recommends scaling down.
const SCALE_DOWN_LIFT_PERCENT: f64 = -10.0;

/// Stateless evaluator for control/test incrementality records.
pub struct IncrementalityEngine;

impl IncrementalityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one test record.
    ///
    /// Lift is relative to the control group's conversions (0% when the
    /// control group converted nobody). The recommendation is gated on
    /// significance first; lift thresholds only apply to a significant
    /// result.
    pub fn evaluate(&self, test: &IncrementalityTest) -> IncrementalityResult {
        let control = &test.control_group;
        let treated = &test.test_group;

        let lift_absolute = treated.conversions - control.conversions;
        let lift_percent = if control.conversions > 0.0 {
            lift_absolute / control.conversions * 100.0
        } else {
            0.0
        };

        let significance = stats::z_test(
            control.conversions,
            treated.conversions,
            control.spend,
            treated.spend,
        );

        let recommendation = if !significance.is_significant {
            Recommendation::MoreDataNeeded
        } else if lift_percent > SCALE_UP_LIFT_PERCENT {
            Recommendation::ScaleUp
        } else if lift_percent < SCALE_DOWN_LIFT_PERCENT {
            Recommendation::ScaleDown
        } else {
            Recommendation::Maintain
        };

        debug!(
            "Evaluated incrementality test {}: lift {:.1}%, p = {:.4}, {:?}",
            test.id, lift_percent, significance.p_value, recommendation
        );

        IncrementalityResult {
            test_id: test.id,
            lift_percent,
            lift_absolute,
            confidence: 1.0 - significance.p_value,
            is_significant: significance.is_significant,
            p_value: significance.p_value,
            recommendation,
        }
    }
}

impl Default for IncrementalityEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
