// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Derived-Metric Calculator

use crate::types::{PivotRow, PivotTable, Waterfall, WaterfallStep};

// ─── CAGR ────────────────────────────────────────────────────────────────────

/// Compound annual growth rate between two year-anchored values, in percent.
///
/// Defined only when both endpoints are strictly positive and the year gap
/// is non-zero; anything else resolves to 0. Negative compound growth is
/// clamped to 0 — a deliberate display simplification for the bubble chart,
/// not general financial CAGR.
pub fn cagr(start: f64, end: f64, years: u32) -> f64 {
    if start <= 0.0 || end <= 0.0 || years == 0 {
        return 0.0;
    }
    let rate = ((end / start).powf(1.0 / years as f64) - 1.0) * 100.0;
    rate.max(0.0)
}

// ─── Year-over-Year ──────────────────────────────────────────────────────────

/// Per-segment YoY growth table over a year × segment pivot, in percent.
/// The first year of every series is 0 (no prior year); a zero prior value
/// guards the division and also yields 0.
pub fn yoy_table(table: &PivotTable) -> PivotTable {
    let rows: Vec<PivotRow> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| PivotRow {
            year: row.year.clone(),
            values: table
                .segments
                .iter()
                .map(|segment| {
                    let growth = if i == 0 {
                        0.0
                    } else {
                        let prev = table.rows[i - 1].get(segment);
                        let curr = row.get(segment);
                        if prev > 0.0 {
                            (curr - prev) / prev * 100.0
                        } else {
                            0.0
                        }
                    };
                    (segment.clone(), growth)
                })
                .collect(),
        })
        .collect();

    PivotTable {
        rows,
        segments: table.segments.clone(),
    }
}

// ─── Incremental Waterfall ───────────────────────────────────────────────────

/// Fallback yearly increments (USD millions at the reference base), used
/// when a year pair has no usable data.
pub const DEFAULT_INCREMENTS: [f64; 7] = [14.2, 16.8, 19.5, 22.4, 25.6, 28.1, 31.0];

/// Base value the default increment table was calibrated against.
pub const REFERENCE_BASE: f64 = 120.0;

/// Incremental-opportunity waterfall over an ascending `(year, value)`
/// series. The first point is the base; each later year contributes
/// `value[y] - value[y-1]` when both endpoints are non-zero, otherwise the
/// default increment scaled proportionally by `base / REFERENCE_BASE`.
/// Cumulative runs from the base; the total is the sum of all increments.
pub fn incremental_waterfall(series: &[(u16, f64)]) -> Waterfall {
    let Some(&(base_year, base_value)) = series.first() else {
        return Waterfall::empty();
    };

    let mut cumulative = base_value;
    let mut total_incremental = 0.0;
    let mut steps = Vec::with_capacity(series.len().saturating_sub(1));

    for (i, &(year, value)) in series.iter().enumerate().skip(1) {
        let prev = series[i - 1].1;
        let increment = if value != 0.0 && prev != 0.0 {
            value - prev
        } else {
            let slot = (i - 1).min(DEFAULT_INCREMENTS.len() - 1);
            let scale = if REFERENCE_BASE > 0.0 {
                base_value / REFERENCE_BASE
            } else {
                1.0
            };
            DEFAULT_INCREMENTS[slot] * scale
        };
        cumulative += increment;
        total_incremental += increment;
        steps.push(WaterfallStep {
            label: year.to_string(),
            increment,
            cumulative,
        });
    }

    Waterfall {
        base_year: base_year.to_string(),
        base_value,
        steps,
        total_incremental,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
