// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Aggregation / Pivot Engine

use std::collections::{BTreeMap, BTreeSet};

use crate::filter::Dimension;
use crate::types::{EvaluationMode, PivotRow, PivotTable, Record, RegionCountryRow};

// ─── Metric Selector ─────────────────────────────────────────────────────────

/// The one metric selector shared by every chart in a view: monetary value
/// is rebased from USD thousands to millions; volume stays in units.
pub fn metric(record: &Record, mode: EvaluationMode) -> f64 {
    match mode {
        EvaluationMode::Value => record.market_value_usd / 1000.0,
        EvaluationMode::Volume => record.volume_units,
    }
}

// ─── Pivot ───────────────────────────────────────────────────────────────────

/// Year × segment aggregation: one row per year present in the filtered
/// set (ascending), one column per segment, summing `metric`. Absent
/// (year, segment) pairs yield 0, not a missing column.
///
/// The segment universe is either the explicit override (the caller pinned
/// segments via a filter) or the distinct non-empty values of `dim` within
/// the filtered set, sorted lexicographically. Empty input short-circuits
/// to the empty table.
pub fn pivot(
    records: &[&Record],
    dim: Dimension,
    mode: EvaluationMode,
    explicit_segments: Option<&[String]>,
) -> PivotTable {
    if records.is_empty() {
        return PivotTable::empty();
    }

    let segments: Vec<String> = match explicit_segments {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => {
            let distinct: BTreeSet<String> = records
                .iter()
                .map(|r| dim.value_of(r).into_owned())
                .filter(|v| !v.is_empty())
                .collect();
            distinct.into_iter().collect()
        }
    };

    let years: BTreeSet<u16> = records.iter().map(|r| r.year).collect();

    let mut sums: BTreeMap<(u16, &str), f64> = BTreeMap::new();
    for record in records {
        let value = dim.value_of(record);
        if let Some(segment) = segments.iter().find(|s| s.as_str() == value.as_ref()) {
            *sums.entry((record.year, segment.as_str())).or_insert(0.0) +=
                metric(record, mode);
        }
    }

    let rows = years
        .into_iter()
        .map(|year| PivotRow {
            year: year.to_string(),
            values: segments
                .iter()
                .map(|s| {
                    let total = sums.get(&(year, s.as_str())).copied().unwrap_or(0.0);
                    (s.clone(), total)
                })
                .collect(),
        })
        .collect();

    PivotTable { rows, segments }
}

/// Stacked/share variant: same pivot, then segments whose sum is 0 across
/// every year are dropped. Each year's bar stands on its own; this table is
/// never summed across years for share displays.
pub fn active_pivot(
    records: &[&Record],
    dim: Dimension,
    mode: EvaluationMode,
    explicit_segments: Option<&[String]>,
) -> PivotTable {
    let full = pivot(records, dim, mode, explicit_segments);

    let active: Vec<String> = full
        .segments
        .iter()
        .filter(|s| full.rows.iter().map(|row| row.get(s)).sum::<f64>() != 0.0)
        .cloned()
        .collect();

    let rows = full
        .rows
        .into_iter()
        .map(|mut row| {
            row.values.retain(|k, _| active.contains(k));
            row
        })
        .collect();

    PivotTable { rows, segments: active }
}

// ─── Region × Country Share ──────────────────────────────────────────────────

/// Per (year, region): each country's share of the region total, in percent.
/// A zero region total yields 0 for every country (never NaN). In volume
/// mode the absolute values are emitted instead; the caller controls which
/// semantics the label implies.
pub fn region_country_share(
    records: &[&Record],
    mode: EvaluationMode,
) -> Vec<RegionCountryRow> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut totals: BTreeMap<(u16, String), BTreeMap<String, f64>> = BTreeMap::new();
    for record in records {
        *totals
            .entry((record.year, record.region.clone()))
            .or_default()
            .entry(record.country.clone())
            .or_insert(0.0) += metric(record, mode);
    }

    totals
        .into_iter()
        .map(|((year, region), by_country)| {
            let region_total: f64 = by_country.values().sum();
            let countries = by_country
                .into_iter()
                .map(|(country, v)| {
                    let out = match mode {
                        EvaluationMode::Volume => v,
                        EvaluationMode::Value => {
                            if region_total > 0.0 {
                                v / region_total * 100.0
                            } else {
                                0.0
                            }
                        }
                    };
                    (country, out)
                })
                .collect();
            RegionCountryRow {
                year: year.to_string(),
                region,
                countries,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{apply, FilterState};
    use crate::synth;

    #[test]
    fn test_empty_input_short_circuits() {
        let table = pivot(&[], Dimension::ServiceType, EvaluationMode::Value, None);
        assert!(table.is_empty());
        assert!(table.segments.is_empty());
        assert!(region_country_share(&[], EvaluationMode::Value).is_empty());
    }

    #[test]
    fn test_segments_discovered_sorted() {
        let records = synth::generate().unwrap();
        let refs = apply(&records, &FilterState::new());
        let table = pivot(&refs, Dimension::DeliveryChannel, EvaluationMode::Value, None);
        let mut sorted = table.segments.clone();
        sorted.sort();
        assert_eq!(table.segments, sorted);
        assert_eq!(table.segments.len(), 3);
    }

    #[test]
    fn test_rows_cover_all_years() {
        let records = synth::generate().unwrap();
        let refs = apply(&records, &FilterState::new());
        let table = pivot(&refs, Dimension::ServiceType, EvaluationMode::Value, None);
        assert_eq!(table.rows.len(), 8);
        for row in &table.rows {
            assert_eq!(row.values.len(), table.segments.len());
        }
    }

    #[test]
    fn test_explicit_segment_override() {
        let records = synth::generate().unwrap();
        let refs = apply(&records, &FilterState::new());
        let pinned = vec!["Depot".to_string(), "Remote".to_string()];
        let table = pivot(
            &refs,
            Dimension::DeliveryChannel,
            EvaluationMode::Value,
            Some(&pinned),
        );
        assert_eq!(table.segments, pinned);
        for row in &table.rows {
            assert_eq!(row.values.len(), 2);
        }
    }

    #[test]
    fn test_active_pivot_drops_zero_segments() {
        let records = synth::generate().unwrap();
        let refs = apply(&records, &FilterState::new());
        // Pin a segment that cannot match anything: it must be dropped.
        let pinned = vec!["Depot".to_string(), "Hovercraft".to_string()];
        let table = active_pivot(
            &refs,
            Dimension::DeliveryChannel,
            EvaluationMode::Value,
            Some(&pinned),
        );
        assert_eq!(table.segments, vec!["Depot".to_string()]);
    }

    #[test]
    fn test_volume_mode_emits_absolute_country_values() {
        let records = synth::generate().unwrap();
        let refs = apply(&records, &FilterState::new());
        let rows = region_country_share(&refs, EvaluationMode::Volume);
        // Absolute volume sums are far above any percentage.
        assert!(rows.iter().any(|r| r.countries.values().any(|&v| v > 100.0)));
    }

    #[test]
    fn test_value_mode_shares_sum_to_hundred() {
        let records = synth::generate().unwrap();
        let refs = apply(&records, &FilterState::new());
        let rows = region_country_share(&refs, EvaluationMode::Value);
        for row in &rows {
            let sum: f64 = row.countries.values().sum();
            assert!(
                (sum - 100.0).abs() < 1e-6,
                "shares for {}/{} sum to {}",
                row.year,
                row.region,
                sum
            );
        }
    }
}
