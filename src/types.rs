// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Type Definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Channel Type ────────────────────────────────────────────────────────────

/// Binary route-to-market classification of a record's distribution channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelType {
    Direct = 0,
    Indirect = 1,
}

impl Default for ChannelType {
    fn default() -> Self {
        ChannelType::Indirect
    }
}

// ─── Evaluation Mode ─────────────────────────────────────────────────────────

/// Global toggle selecting whether chart metrics carry monetary value
/// (market value in USD thousands, rebased to millions) or physical volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    Value,
    Volume,
}

impl Default for EvaluationMode {
    fn default() -> Self {
        EvaluationMode::Value
    }
}

impl EvaluationMode {
    pub fn parse(label: &str) -> Result<Self, crate::error::EngineError> {
        match label {
            "value" => Ok(Self::Value),
            "volume" => Ok(Self::Volume),
            other => Err(crate::error::EngineError::UnknownMode(other.to_string())),
        }
    }
}

// ─── Analysis View ───────────────────────────────────────────────────────────

/// The four analysis views of the dashboard, each with its own filter state.
/// Incremental, Attractiveness and YearOverYear are scoped views: their
/// region universe is restricted to {North America, Europe}.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Standard = 0,
    Incremental = 1,
    Attractiveness = 2,
    YearOverYear = 3,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Standard,
        View::Incremental,
        View::Attractiveness,
        View::YearOverYear,
    ];

    pub fn parse(label: &str) -> Result<Self, crate::error::EngineError> {
        match label {
            "standard" => Ok(Self::Standard),
            "incremental" => Ok(Self::Incremental),
            "attractiveness" => Ok(Self::Attractiveness),
            "yearOverYear" | "yoy" => Ok(Self::YearOverYear),
            other => Err(crate::error::EngineError::UnknownView(other.to_string())),
        }
    }

    /// Whether this view restricts the selectable region universe.
    pub fn is_scoped(&self) -> bool {
        !matches!(self, View::Standard)
    }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One synthetic market observation. Immutable once generated.
///
/// Categorical fields hold catalog values; the legacy dimensions
/// (product_type .. end_user) are drawn once per outer-loop combination
/// rather than fully cross-producted with the service-taxonomy dimensions,
/// which deliberately bounds the dataset size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    pub year: u16,
    pub region: String,
    pub country: String,

    // Service taxonomy ("new" dimensions)
    pub service_type: String,
    pub end_user_type: String,
    pub delivery_channel: String,
    pub business_model: String,

    // Legacy taxonomy
    pub product_type: String,
    pub blade_material: String,
    pub handle_length: String,
    pub application: String,
    pub end_user: String,

    pub distribution_channel_type: ChannelType,
    pub distribution_channel: String,
    pub brand: String,
    pub company: String,

    // Measures. Money is rounded to 2 decimal places; volume is floored.
    pub price: f64,
    pub volume_units: f64,
    pub qty: u32,
    pub revenue: f64,
    pub market_value_usd: f64,
    /// Legacy duplicate of `market_value_usd`, kept for UI compatibility.
    pub value: f64,
    pub market_share_pct: f64,
    pub cagr: f64,
    pub yoy_growth: f64,
}

// ─── Pivot Output ────────────────────────────────────────────────────────────

/// One chart row: a year label plus one numeric column per active segment.
/// Serializes flat (`{"year":"2024","Depot":1.2,...}`) the way the UI's
/// charting layer expects its data points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PivotRow {
    pub year: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl PivotRow {
    pub fn get(&self, segment: &str) -> f64 {
        self.values.get(segment).copied().unwrap_or(0.0)
    }
}

/// Year × segment aggregation table plus the ordered segment list the UI
/// couples to color assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PivotTable {
    pub rows: Vec<PivotRow>,
    pub segments: Vec<String>,
}

impl PivotTable {
    pub fn empty() -> Self {
        Self { rows: Vec::new(), segments: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row of the region × country share pivot: country columns hold each
/// country's percentage of the region total for that year (or absolute
/// volume when the evaluation mode is Volume).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionCountryRow {
    pub year: String,
    pub region: String,
    #[serde(flatten)]
    pub countries: BTreeMap<String, f64>,
}

// ─── Derived-Metric Output ───────────────────────────────────────────────────

/// One step of the incremental-opportunity waterfall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallStep {
    pub label: String,
    pub increment: f64,
    pub cumulative: f64,
}

/// Full waterfall: base, yearly increments, running totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Waterfall {
    pub base_year: String,
    pub base_value: f64,
    pub steps: Vec<WaterfallStep>,
    /// Sum of all yearly increments (total incremental opportunity).
    pub total_incremental: f64,
}

impl Waterfall {
    pub fn empty() -> Self {
        Self {
            base_year: String::new(),
            base_value: 0.0,
            steps: Vec::new(),
            total_incremental: 0.0,
        }
    }
}

// ─── Bubble Layout ───────────────────────────────────────────────────────────

/// Raw per-segment triple fed to the bubble-layout normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BubbleItem {
    pub key: String,
    pub cagr: f64,
    pub market_share: f64,
    pub opportunity: f64,
}

/// A positioned bubble in normalized 0..10 index space. `size` is a pixel
/// radius. Consumers must re-associate by `key`, not position: output is
/// ordered by descending opportunity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BubblePoint {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

// ─── KPI Summary ─────────────────────────────────────────────────────────────

/// Headline figures for the currently filtered view. `has_data` is the
/// explicit "no data" sentinel: when false every numeric field is 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub has_data: bool,
    pub total_value: f64,
    pub total_volume: f64,
    pub span_cagr: f64,
    pub top_segment: Option<String>,
}

impl Kpis {
    pub fn no_data() -> Self {
        Self {
            has_data: false,
            total_value: 0.0,
            total_volume: 0.0,
            span_cagr: 0.0,
            top_segment: None,
        }
    }
}
