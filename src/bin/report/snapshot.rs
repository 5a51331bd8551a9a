// Per-Year JSONL Snapshot Recorder
// Outputs one JSON line per dataset year for independent analysis

use atlas_engine::pivot;
use atlas_engine::{EvaluationMode, Record};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct YearSnapshot {
    pub year: u16,
    pub record_count: usize,
    pub total_value_musd: f64,
    pub total_volume_units: f64,
    pub yoy_value_pct: f64,
    pub top_region: String,
    pub region_totals: BTreeMap<String, f64>,
}

impl YearSnapshot {
    pub fn from_records(year: u16, records: &[&Record], prev_total: Option<f64>) -> Self {
        let total_value_musd: f64 = records
            .iter()
            .map(|r| pivot::metric(r, EvaluationMode::Value))
            .sum();
        let total_volume_units: f64 = records
            .iter()
            .map(|r| pivot::metric(r, EvaluationMode::Volume))
            .sum();

        let mut region_totals: BTreeMap<String, f64> = BTreeMap::new();
        for r in records {
            *region_totals.entry(r.region.clone()).or_insert(0.0) +=
                pivot::metric(r, EvaluationMode::Value);
        }
        let top_region = region_totals
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(k, _)| k.clone())
            .unwrap_or_default();

        let yoy_value_pct = match prev_total {
            Some(prev) if prev > 0.0 => (total_value_musd - prev) / prev * 100.0,
            _ => 0.0,
        };

        Self {
            year,
            record_count: records.len(),
            total_value_musd,
            total_volume_units,
            yoy_value_pct,
            top_region,
            region_totals,
        }
    }
}

/// Snapshot recorder that accumulates per-year lines and writes JSONL
pub struct SnapshotRecorder {
    snapshots: Vec<YearSnapshot>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, snapshot: YearSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn last_total(&self) -> Option<f64> {
        self.snapshots.last().map(|s| s.total_value_musd)
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}
