// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Dashboard Context

use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

use crate::bubble;
use crate::cache::DatasetCache;
use crate::filter::{self, Dimension, FilterState};
use crate::growth;
use crate::pivot;
use crate::types::*;

// ─── Dashboard struct ────────────────────────────────────────────────────────

/// Composition root of the analytics pipeline: owns the dataset cache, one
/// filter state per analysis view, and the global evaluation mode. Every
/// chart operation is a pure function of (records, filter state, mode);
/// the cache is the only cross-call state.
#[wasm_bindgen]
pub struct Dashboard {
    pub(crate) cache: DatasetCache,
    pub(crate) filters: BTreeMap<View, FilterState>,
    pub(crate) mode: EvaluationMode,
}

// ─── Internal Logic (Testable, pure Rust) ────────────────────────────────────

impl Dashboard {
    /// Filtered record refs for a view, in generation order. Populates the
    /// cache on first use.
    fn filtered(&mut self, view: View) -> Vec<&Record> {
        self.cache.get();
        match self.filters.get(&view) {
            Some(state) => filter::apply(self.cache.peek(), state),
            None => self.cache.peek().iter().collect(),
        }
    }

    /// Segment override: when the view's filter pins values for the group
    /// dimension, those values become the pivot's segment universe.
    fn explicit_segments(&self, view: View, dim: Dimension) -> Option<Vec<String>> {
        self.filters
            .get(&view)
            .and_then(|f| f.selection(dim))
            .map(|set| set.iter().cloned().collect())
    }

    pub fn set_mode_core(&mut self, mode: EvaluationMode) {
        self.mode = mode;
    }

    pub fn mode_core(&self) -> EvaluationMode {
        self.mode
    }

    /// Replace one dimension's selection set for a view.
    pub fn set_selection_core<I, S>(&mut self, view: View, dim: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.entry(view).or_default().set(dim, values);
    }

    /// Single-select a region, enforcing the view's scope rules.
    pub fn select_region_core(&mut self, view: View, region: &str) {
        self.filters
            .entry(view)
            .or_default()
            .select_region(view, region);
    }

    pub fn clear_filters_core(&mut self, view: View) {
        if let Some(state) = self.filters.get_mut(&view) {
            state.clear_all();
        }
    }

    pub fn record_count_core(&mut self) -> usize {
        self.cache.get().len()
    }

    /// The memoized record set, generating it on first call.
    pub fn records_core(&mut self) -> &[Record] {
        self.cache.get()
    }

    pub fn clear_cache_core(&mut self) {
        self.cache.invalidate();
    }

    // ── Chart operations ────────────────────────────────────────────────

    /// Grouped-bar pivot: year × segment sums of the active metric.
    pub fn grouped_bar_core(&mut self, view: View, dim: Dimension) -> PivotTable {
        let mode = self.mode;
        let explicit = self.explicit_segments(view, dim);
        let refs = self.filtered(view);
        pivot::pivot(&refs, dim, mode, explicit.as_deref())
    }

    /// Stacked/share pivot: zero-sum segments dropped, rows never blended
    /// across years.
    pub fn stacked_share_core(&mut self, view: View, dim: Dimension) -> PivotTable {
        let mode = self.mode;
        let explicit = self.explicit_segments(view, dim);
        let refs = self.filtered(view);
        pivot::active_pivot(&refs, dim, mode, explicit.as_deref())
    }

    /// Country share of region total per (year, region).
    pub fn region_country_share_core(&mut self, view: View) -> Vec<RegionCountryRow> {
        let mode = self.mode;
        let refs = self.filtered(view);
        pivot::region_country_share(&refs, mode)
    }

    /// YoY growth series per segment, over the YearOverYear view's filter.
    pub fn yoy_chart_core(&mut self, dim: Dimension) -> PivotTable {
        let base = self.grouped_bar_core(View::YearOverYear, dim);
        growth::yoy_table(&base)
    }

    /// Incremental-opportunity waterfall over the Incremental view's yearly
    /// totals.
    pub fn waterfall_core(&mut self) -> Waterfall {
        let series = self.year_totals(View::Incremental);
        growth::incremental_waterfall(&series)
    }

    /// Attractiveness bubbles: per segment of `dim`, span CAGR × share of
    /// total × last-year opportunity, pushed through the layout normalizer.
    pub fn bubble_chart_core(&mut self, dim: Dimension) -> Vec<BubblePoint> {
        let table = self.grouped_bar_core(View::Attractiveness, dim);
        if table.is_empty() {
            return Vec::new();
        }

        // Span from the year labels, not the row count: a sparse year
        // selection still covers the full gap between its endpoints.
        let span_years = match (table.rows.first(), table.rows.last()) {
            (Some(first), Some(last)) => {
                match (first.year.parse::<i64>(), last.year.parse::<i64>()) {
                    (Ok(f), Ok(l)) if l > f => (l - f) as u32,
                    _ => 0,
                }
            }
            _ => 0,
        };
        let grand_total: f64 = table
            .rows
            .iter()
            .flat_map(|r| r.values.values())
            .sum();

        let items: Vec<BubbleItem> = table
            .segments
            .iter()
            .map(|segment| {
                let first = table.rows.first().map(|r| r.get(segment)).unwrap_or(0.0);
                let last = table.rows.last().map(|r| r.get(segment)).unwrap_or(0.0);
                let total: f64 = table.rows.iter().map(|r| r.get(segment)).sum();
                BubbleItem {
                    key: segment.clone(),
                    cagr: growth::cagr(first, last, span_years),
                    market_share: if grand_total > 0.0 {
                        total / grand_total * 100.0
                    } else {
                        0.0
                    },
                    opportunity: last,
                }
            })
            .collect();

        bubble::layout(&items)
    }

    /// Headline figures for a view's filtered set; zeroed "no data" shape
    /// when the filter matches nothing.
    pub fn kpis_core(&mut self, view: View, dim: Dimension) -> Kpis {
        let mode = self.mode;
        let refs = self.filtered(view);
        if refs.is_empty() {
            return Kpis::no_data();
        }

        let total_value: f64 = refs.iter().map(|r| r.market_value_usd / 1000.0).sum();
        let total_volume: f64 = refs.iter().map(|r| r.volume_units).sum();

        let series = year_totals_of(&refs, mode);
        let span_cagr = match (series.first(), series.last()) {
            (Some(&(fy, fv)), Some(&(ly, lv))) if ly > fy => {
                growth::cagr(fv, lv, (ly - fy) as u32)
            }
            _ => 0.0,
        };

        let mut by_segment: BTreeMap<String, f64> = BTreeMap::new();
        for r in &refs {
            *by_segment.entry(dim.value_of(r).into_owned()).or_insert(0.0) +=
                pivot::metric(r, mode);
        }
        let top_segment = by_segment
            .into_iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k);

        Kpis {
            has_data: true,
            total_value,
            total_volume,
            span_cagr,
            top_segment,
        }
    }

    /// Ascending (year, metric total) series for a view's filtered set.
    pub fn year_totals(&mut self, view: View) -> Vec<(u16, f64)> {
        let mode = self.mode;
        let refs = self.filtered(view);
        year_totals_of(&refs, mode)
    }
}

fn year_totals_of(refs: &[&Record], mode: EvaluationMode) -> Vec<(u16, f64)> {
    let mut totals: BTreeMap<u16, f64> = BTreeMap::new();
    for r in refs {
        *totals.entry(r.year).or_insert(0.0) += pivot::metric(r, mode);
    }
    totals.into_iter().collect()
}
