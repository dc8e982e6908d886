use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category a marketing channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Search,
    Social,
    Display,
    Video,
    Email,
    Tv,
    Audio,
    Ooh,
}

/// How the user interacted with the ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Click,
    View,
}

/// One recorded ad exposure within a conversion path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Touchpoint {
    /// Free-text channel name, e.g. "Google Search". Grouping key for
    /// attribution output.
    pub channel: String,
    pub channel_type: ChannelType,
    /// Present in the schema; not used by any implemented model.
    pub interaction_type: InteractionType,
    pub timestamp: DateTime<Utc>,
    /// Cost attributable to this single impression/click.
    pub cost: f64,
}

/// The ordered touchpoint history of one user, ending in a conversion.
///
/// Touchpoints are assumed to be stored in chronological order; the
/// engine does not verify this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionPath {
    pub id: Uuid,
    pub user_id: Uuid,
    pub touchpoints: Vec<Touchpoint>,
    pub conversion_value: f64,
    pub conversion_timestamp: DateTime<Utc>,
    /// Hours between the first touchpoint and the conversion. Computed
    /// upstream when the path is assembled, not by this engine.
    pub time_to_conversion_hours: f64,
}

/// Attribution methodology.
///
/// `Blended` and `LastClick` are declared for schema compatibility but
/// have no implemented semantics; the engine rejects them with
/// [`crate::AdliftError::UnsupportedModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModel {
    FirstTouch,
    LastTouch,
    Linear,
    TimeDecay,
    PositionBased,
    Blended,
    LastClick,
}

impl AttributionModel {
    /// The five models with implemented credit-allocation semantics.
    pub const IMPLEMENTED: [AttributionModel; 5] = [
        AttributionModel::FirstTouch,
        AttributionModel::LastTouch,
        AttributionModel::Linear,
        AttributionModel::TimeDecay,
        AttributionModel::PositionBased,
    ];
}

/// One row of attribution output per (channel, model).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionResult {
    pub channel: String,
    pub channel_type: ChannelType,
    pub model: AttributionModel,
    /// Sum of per-path fractional credits; generally not integral.
    pub credit: f64,
    /// Sum of `conversion_value * credit` over all paths.
    pub attributed_revenue: f64,
    /// Sum of this channel's touchpoint costs across paths where it
    /// earned a credit entry. Not weighted by credit.
    pub cost: f64,
    /// `attributed_revenue / cost` (0.0 when cost is zero).
    pub roas: f64,
    /// Defined identically to credit: each path contributes at most 1.0
    /// conversion units split across its channels.
    pub conversions: f64,
}

/// Aggregate outcomes for one arm of an incrementality test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupSummary {
    pub conversions: f64,
    pub spend: f64,
    pub revenue: f64,
}

/// A control/test comparison over a shared test period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalityTest {
    pub id: Uuid,
    pub name: String,
    pub control_group: GroupSummary,
    pub test_group: GroupSummary,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Action suggested by an incrementality evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ScaleUp,
    ScaleDown,
    Maintain,
    MoreDataNeeded,
}

/// Outcome of evaluating one incrementality test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementalityResult {
    pub test_id: Uuid,
    /// Relative lift in conversions, as a percentage of the control
    /// group (0.0 when the control group has no conversions).
    pub lift_percent: f64,
    pub lift_absolute: f64,
    /// `1 - p_value`; capped at 0.999 by the p-value floor.
    pub confidence: f64,
    pub is_significant: bool,
    pub p_value: f64,
    pub recommendation: Recommendation,
}
