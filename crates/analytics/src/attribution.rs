//! Multi-touch attribution — splits conversion credit across the channels
//! in each path and aggregates per-channel credit, revenue, cost, and ROAS.

use std::collections::HashMap;

use adlift_core::error::{AdliftError, AdliftResult};
use adlift_core::types::{AttributionModel, AttributionResult, ChannelType, ConversionPath};
use tracing::debug;

/// Half-life of the time-decay model: 7 days in milliseconds.
const DECAY_HALF_LIFE_MS: f64 = 604_800_000.0;

/// Credit share the position-based model gives to each endpoint.
const POSITION_ENDPOINT_SHARE: f64 = 0.4;
/// Credit share the position-based model splits across interior touchpoints.
const POSITION_INTERIOR_SHARE: f64 = 0.2;

// ---------------------------------------------------------------------------
// AttributionEngine
// ---------------------------------------------------------------------------

/// Stateless attribution engine over immutable conversion-path snapshots.
pub struct AttributionEngine;

impl AttributionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Split one path's conversion credit across its channels.
    ///
    /// Credits for a non-empty path sum to 1.0, with one exception: the
    /// two-touchpoint position-based case sums to 0.8 — the remaining 20%
    /// is left unassigned rather than redistributed (replicated policy;
    /// see DESIGN.md). A path with no touchpoints yields an empty map.
    pub fn allocate_credit(
        &self,
        path: &ConversionPath,
        model: AttributionModel,
    ) -> AdliftResult<HashMap<String, f64>> {
        if path.touchpoints.is_empty() {
            return Ok(HashMap::new());
        }

        match model {
            AttributionModel::FirstTouch => Ok(Self::first_touch(path)),
            AttributionModel::LastTouch => Ok(Self::last_touch(path)),
            AttributionModel::Linear => Ok(Self::linear(path)),
            AttributionModel::TimeDecay => Ok(Self::time_decay(path)),
            AttributionModel::PositionBased => Ok(Self::position_based(path)),
            AttributionModel::Blended | AttributionModel::LastClick => {
                Err(AdliftError::UnsupportedModel(format!("{model:?}")))
            }
        }
    }

    /// Aggregate per-channel credit, revenue, cost, and conversions across
    /// all paths under one model. An empty input produces an empty result
    /// list. Results are sorted by channel name.
    pub fn calculate_attribution(
        &self,
        paths: &[ConversionPath],
        model: AttributionModel,
    ) -> AdliftResult<Vec<AttributionResult>> {
        let mut totals: HashMap<String, ChannelTotals> = HashMap::new();

        for path in paths {
            let credits = self.allocate_credit(path, model)?;
            for (channel, credit) in credits {
                let mut path_cost = 0.0;
                let mut channel_type = None;
                for tp in &path.touchpoints {
                    if tp.channel == channel {
                        path_cost += tp.cost;
                        channel_type.get_or_insert(tp.channel_type);
                    }
                }
                // Credit keys always come from the path's own touchpoints.
                let Some(channel_type) = channel_type else { continue };

                let entry = totals
                    .entry(channel)
                    .or_insert_with(|| ChannelTotals::new(channel_type));
                entry.credit += credit;
                entry.conversions += credit;
                entry.revenue += path.conversion_value * credit;
                // Full channel spend within this path, not weighted by
                // credit. Downstream ROAS figures depend on this.
                entry.cost += path_cost;
            }
        }

        let mut results: Vec<AttributionResult> = totals
            .into_iter()
            .map(|(channel, t)| AttributionResult {
                channel,
                channel_type: t.channel_type,
                model,
                credit: t.credit,
                attributed_revenue: t.revenue,
                cost: t.cost,
                roas: if t.cost > 0.0 { t.revenue / t.cost } else { 0.0 },
                conversions: t.conversions,
            })
            .collect();
        results.sort_by(|a, b| a.channel.cmp(&b.channel));

        debug!(
            "Attributed {} paths across {} channels under {:?}",
            paths.len(),
            results.len(),
            model
        );

        Ok(results)
    }

    /// Run every implemented model over the same paths for side-by-side
    /// comparison. `Blended` and `LastClick` are never exercised.
    pub fn compare_models(
        &self,
        paths: &[ConversionPath],
    ) -> AdliftResult<HashMap<AttributionModel, Vec<AttributionResult>>> {
        let mut by_model = HashMap::with_capacity(AttributionModel::IMPLEMENTED.len());
        for model in AttributionModel::IMPLEMENTED {
            by_model.insert(model, self.calculate_attribution(paths, model)?);
        }
        Ok(by_model)
    }

    // -- credit models ------------------------------------------------------

    fn first_touch(path: &ConversionPath) -> HashMap<String, f64> {
        let mut credits = HashMap::with_capacity(1);
        if let Some(first) = path.touchpoints.first() {
            credits.insert(first.channel.clone(), 1.0);
        }
        credits
    }

    fn last_touch(path: &ConversionPath) -> HashMap<String, f64> {
        let mut credits = HashMap::with_capacity(1);
        if let Some(last) = path.touchpoints.last() {
            credits.insert(last.channel.clone(), 1.0);
        }
        credits
    }

    fn linear(path: &ConversionPath) -> HashMap<String, f64> {
        let share = 1.0 / path.touchpoints.len() as f64;
        let mut credits = HashMap::new();
        for tp in &path.touchpoints {
            *credits.entry(tp.channel.clone()).or_insert(0.0) += share;
        }
        credits
    }

    /// Exponential recency weighting. A touchpoint logged after the
    /// conversion gets a pre-normalization weight above 1 and is
    /// tolerated as-is.
    fn time_decay(path: &ConversionPath) -> HashMap<String, f64> {
        let weights: Vec<f64> = path
            .touchpoints
            .iter()
            .map(|tp| {
                let age_ms = (path.conversion_timestamp - tp.timestamp).num_milliseconds() as f64;
                (-age_ms / DECAY_HALF_LIFE_MS).exp()
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let mut credits = HashMap::new();
        if total > 0.0 {
            for (tp, weight) in path.touchpoints.iter().zip(&weights) {
                *credits.entry(tp.channel.clone()).or_insert(0.0) += weight / total;
            }
        }
        credits
    }

    /// U-shaped split: 40% to each endpoint, 20% across the interior.
    /// A path that starts and ends on the same channel accumulates both
    /// endpoint shares into that one key.
    fn position_based(path: &ConversionPath) -> HashMap<String, f64> {
        let touchpoints = &path.touchpoints;
        let mut credits = HashMap::new();

        match touchpoints.len() {
            0 => {}
            1 => {
                credits.insert(touchpoints[0].channel.clone(), 1.0);
            }
            2 => {
                // 40/40: the remaining 20% stays unassigned.
                *credits.entry(touchpoints[0].channel.clone()).or_insert(0.0) +=
                    POSITION_ENDPOINT_SHARE;
                *credits.entry(touchpoints[1].channel.clone()).or_insert(0.0) +=
                    POSITION_ENDPOINT_SHARE;
            }
            n => {
                *credits.entry(touchpoints[0].channel.clone()).or_insert(0.0) +=
                    POSITION_ENDPOINT_SHARE;
                *credits.entry(touchpoints[n - 1].channel.clone()).or_insert(0.0) +=
                    POSITION_ENDPOINT_SHARE;
                let interior = POSITION_INTERIOR_SHARE / (n - 2) as f64;
                for tp in &touchpoints[1..n - 1] {
                    *credits.entry(tp.channel.clone()).or_insert(0.0) += interior;
                }
            }
        }

        credits
    }
}

impl Default for AttributionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Running per-channel totals during aggregation. The channel type is
/// captured from the first path that contains the channel.
struct ChannelTotals {
    channel_type: ChannelType,
    credit: f64,
    revenue: f64,
    cost: f64,
    conversions: f64,
}

impl ChannelTotals {
    fn new(channel_type: ChannelType) -> Self {
        Self {
            channel_type,
            credit: 0.0,
            revenue: 0.0,
            cost: 0.0,
            conversions: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
