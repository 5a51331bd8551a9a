// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine

pub mod bubble;
pub mod cache;
pub mod catalog;
pub mod dashboard;
mod diag;
pub mod error;
pub mod filter;
pub mod growth;
pub mod lcg;
pub mod money;
pub mod pivot;
pub mod synth;
pub mod types;

pub use dashboard::Dashboard;
pub use error::EngineError;
pub use filter::{apply, Dimension, FilterState};
pub use types::*;

use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────
//
// Thin serialization shims; the dashboard UI consumes these and owns all
// rendering. Everything testable lives in the `_core` methods.

#[wasm_bindgen]
impl Dashboard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Self {
            cache: cache::DatasetCache::new(),
            filters: BTreeMap::new(),
            mode: EvaluationMode::Value,
        }
    }

    /// Number of records in the memoized dataset, generating on first call.
    /// The synthesis pass may be driven from a deferred entry point on the
    /// UI side; wasm is single-threaded, so initialize-once holds trivially.
    pub fn record_count(&mut self) -> usize {
        self.record_count_core()
    }

    /// Force the next access to regenerate the dataset from scratch.
    pub fn clear_cache(&mut self) {
        self.clear_cache_core();
    }

    /// "value" or "volume"; unknown labels are ignored.
    pub fn set_evaluation_mode(&mut self, mode: &str) {
        if let Ok(mode) = EvaluationMode::parse(mode) {
            self.set_mode_core(mode);
        }
    }

    /// Replace one dimension's selection for a view. `values` is a JS array
    /// of strings; an empty array clears the constraint.
    pub fn set_filter(&mut self, view: &str, dimension: &str, values: JsValue) {
        let (Ok(view), Ok(dim)) = (View::parse(view), Dimension::parse(dimension)) else {
            return;
        };
        let values: Vec<String> = serde_wasm_bindgen::from_value(values).unwrap_or_default();
        self.set_selection_core(view, dim, values);
    }

    /// Single-select a region, applying the view's scope rules.
    pub fn select_region(&mut self, view: &str, region: &str) {
        if let Ok(view) = View::parse(view) {
            self.select_region_core(view, region);
        }
    }

    pub fn clear_filters(&mut self, view: &str) {
        if let Ok(view) = View::parse(view) {
            self.clear_filters_core(view);
        }
    }

    pub fn grouped_bar(&mut self, view: &str, dimension: &str) -> JsValue {
        let (Ok(view), Ok(dim)) = (View::parse(view), Dimension::parse(dimension)) else {
            return JsValue::NULL;
        };
        let table = self.grouped_bar_core(view, dim);
        serde_wasm_bindgen::to_value(&table).unwrap_or(JsValue::NULL)
    }

    pub fn stacked_share(&mut self, view: &str, dimension: &str) -> JsValue {
        let (Ok(view), Ok(dim)) = (View::parse(view), Dimension::parse(dimension)) else {
            return JsValue::NULL;
        };
        let table = self.stacked_share_core(view, dim);
        serde_wasm_bindgen::to_value(&table).unwrap_or(JsValue::NULL)
    }

    pub fn region_country_share(&mut self, view: &str) -> JsValue {
        let Ok(view) = View::parse(view) else {
            return JsValue::NULL;
        };
        let rows = self.region_country_share_core(view);
        serde_wasm_bindgen::to_value(&rows).unwrap_or(JsValue::NULL)
    }

    pub fn yoy_chart(&mut self, dimension: &str) -> JsValue {
        let Ok(dim) = Dimension::parse(dimension) else {
            return JsValue::NULL;
        };
        let table = self.yoy_chart_core(dim);
        serde_wasm_bindgen::to_value(&table).unwrap_or(JsValue::NULL)
    }

    pub fn waterfall(&mut self) -> JsValue {
        let wf = self.waterfall_core();
        serde_wasm_bindgen::to_value(&wf).unwrap_or(JsValue::NULL)
    }

    pub fn bubble_chart(&mut self, dimension: &str) -> JsValue {
        let Ok(dim) = Dimension::parse(dimension) else {
            return JsValue::NULL;
        };
        let points = self.bubble_chart_core(dim);
        serde_wasm_bindgen::to_value(&points).unwrap_or(JsValue::NULL)
    }

    pub fn kpis(&mut self, view: &str, dimension: &str) -> JsValue {
        let (Ok(view), Ok(dim)) = (View::parse(view), Dimension::parse(dimension)) else {
            return JsValue::NULL;
        };
        let kpis = self.kpis_core(view, dim);
        serde_wasm_bindgen::to_value(&kpis).unwrap_or(JsValue::NULL)
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
