#[cfg(test)]
mod tests {
    use atlas_engine::pivot::{pivot, region_country_share};
    use atlas_engine::{
        apply, bubble, catalog, growth, synth, BubbleItem, ChannelType, Dashboard, Dimension,
        EvaluationMode, FilterState, Record, View,
    };

    fn record(year: u16, region: &str, country: &str, service: &str, value: f64) -> Record {
        Record {
            id: 0,
            year,
            region: region.to_string(),
            country: country.to_string(),
            service_type: service.to_string(),
            end_user_type: "Industrial".to_string(),
            delivery_channel: "Depot".to_string(),
            business_model: "One-time".to_string(),
            product_type: "Fixed Blade".to_string(),
            blade_material: "Stainless Steel".to_string(),
            handle_length: "Standard".to_string(),
            application: "Manufacturing".to_string(),
            end_user: "Industrial OEM".to_string(),
            distribution_channel_type: ChannelType::Indirect,
            distribution_channel: "Industrial Distributors".to_string(),
            brand: "KeenEdge".to_string(),
            company: "KeenEdge Tools Ltd.".to_string(),
            price: 25.0,
            volume_units: 100.0,
            qty: 10,
            revenue: 250.0,
            market_value_usd: value,
            value,
            market_share_pct: 1.0,
            cagr: 5.0,
            yoy_growth: 3.0,
        }
    }

    // ========== Determinism ==========

    #[test]
    fn test_generation_is_deterministic() {
        let first = synth::generate().expect("first pass");
        let second = synth::generate().expect("second pass");
        assert_eq!(first.len(), second.len());
        assert_eq!(first, second, "regeneration diverged field-for-field");
    }

    #[test]
    fn test_cache_clear_reproduces_dataset() {
        let mut dash = Dashboard::new();
        let first = dash.records_core().to_vec();
        dash.clear_cache_core();
        assert_eq!(dash.records_core(), first.as_slice());
    }

    // ========== Generated Invariants ==========

    #[test]
    fn test_country_belongs_to_region() {
        let records = synth::generate().unwrap();
        for r in &records {
            assert!(
                catalog::countries(&r.region).contains(&r.country.as_str()),
                "record {}: {} not in {}",
                r.id,
                r.country,
                r.region
            );
        }
    }

    #[test]
    fn test_channel_subtype_invariant() {
        let records = synth::generate().unwrap();
        for r in &records {
            let subtypes = catalog::channel_subtypes(&r.end_user);
            if subtypes.is_empty() {
                assert_eq!(
                    r.distribution_channel, r.end_user,
                    "record {}: expected end-user fallback",
                    r.id
                );
            } else {
                assert!(
                    subtypes.contains(&r.distribution_channel.as_str()),
                    "record {}: {} not a subtype of {}",
                    r.id,
                    r.distribution_channel,
                    r.end_user
                );
            }
        }
    }

    // ========== Filter Engine ==========

    #[test]
    fn test_filter_idempotence() {
        let records = synth::generate().unwrap();
        let mut state = FilterState::new();
        state.set(Dimension::Region, ["Europe"]);
        state.set(Dimension::Year, ["2026"]);

        let once: Vec<Record> = apply(&records, &state).into_iter().cloned().collect();
        let twice: Vec<Record> = apply(&once, &state).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_composition_is_order_independent() {
        let records = synth::generate().unwrap();

        let mut by_region = FilterState::new();
        by_region.set(Dimension::Region, ["Asia Pacific"]);
        let mut by_brand = FilterState::new();
        by_brand.set(Dimension::Brand, ["Vantis"]);
        let mut combined = FilterState::new();
        combined.set(Dimension::Region, ["Asia Pacific"]);
        combined.set(Dimension::Brand, ["Vantis"]);

        let region_first: Vec<Record> = {
            let step: Vec<Record> = apply(&records, &by_region).into_iter().cloned().collect();
            apply(&step, &by_brand).into_iter().cloned().collect()
        };
        let brand_first: Vec<Record> = {
            let step: Vec<Record> = apply(&records, &by_brand).into_iter().cloned().collect();
            apply(&step, &by_region).into_iter().cloned().collect()
        };
        let one_shot: Vec<Record> = apply(&records, &combined).into_iter().cloned().collect();

        assert_eq!(region_first, one_shot);
        assert_eq!(brand_first, one_shot);
    }

    #[test]
    fn test_deserialized_empty_selection_imposes_no_constraint() {
        // `set()` never stores an empty set, but UI-supplied JSON can.
        let state: FilterState =
            serde_json::from_str(r#"{"selections":{"region":[]}}"#).unwrap();
        let rec = record(2024, "Europe", "Germany", "Installation", 1.0);
        assert!(state.matches(&rec));

        let records = synth::generate().unwrap();
        assert_eq!(apply(&records, &state).len(), records.len());
    }

    // ========== Pivot Completeness ==========

    #[test]
    fn test_pivot_completeness_and_column_sums() {
        let records = synth::generate().unwrap();
        let mut state = FilterState::new();
        state.set(Dimension::Region, ["North America"]);
        let filtered = apply(&records, &state);

        let segments: Vec<String> = catalog::SERVICE_TYPES
            .iter()
            .map(|s| s.to_string())
            .collect();
        let table = pivot(
            &filtered,
            Dimension::ServiceType,
            EvaluationMode::Value,
            Some(&segments),
        );

        assert_eq!(table.rows.len(), 8, "one row per dataset year");
        for row in &table.rows {
            for segment in &segments {
                assert!(row.values.contains_key(segment));
            }
            let row_sum: f64 = segments.iter().map(|s| row.get(s)).sum();
            let expected: f64 = filtered
                .iter()
                .filter(|r| r.year.to_string() == row.year)
                .map(|r| r.market_value_usd / 1000.0)
                .sum();
            assert!(
                (row_sum - expected).abs() < 1e-6,
                "year {} sum {} != {}",
                row.year,
                row_sum,
                expected
            );
        }
    }

    // ========== Division Guards ==========

    #[test]
    fn test_zero_region_total_yields_zero_shares() {
        let rows = [
            record(2024, "Oceania", "Australia", "Tool Calibration", 0.0),
            record(2024, "Oceania", "Australia", "Operator Training", 0.0),
        ];
        let refs: Vec<&Record> = rows.iter().collect();
        let shares = region_country_share(&refs, EvaluationMode::Value);
        assert_eq!(shares.len(), 1);
        for (_, &pct) in &shares[0].countries {
            assert_eq!(pct, 0.0, "zero total must not produce NaN");
            assert!(pct.is_finite());
        }
    }

    // ========== End-to-End Scenario ==========

    #[test]
    fn test_three_record_pivot_and_share_scenario() {
        let rows = [
            record(2024, "North America", "U.S.", "A", 1000.0),
            record(2024, "North America", "Canada", "B", 3000.0),
            record(2025, "North America", "U.S.", "A", 2000.0),
        ];
        let refs: Vec<&Record> = rows.iter().collect();

        let table = pivot(&refs, Dimension::ServiceType, EvaluationMode::Value, None);
        assert_eq!(table.segments, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(table.rows[0].year, "2024");
        assert_eq!(table.rows[0].get("A"), 1.0);
        assert_eq!(table.rows[0].get("B"), 3.0);
        assert_eq!(table.rows[1].year, "2025");
        assert_eq!(table.rows[1].get("A"), 2.0);
        assert_eq!(table.rows[1].get("B"), 0.0);

        let shares = region_country_share(&refs, EvaluationMode::Value);
        let y2024 = shares
            .iter()
            .find(|r| r.year == "2024" && r.region == "North America")
            .expect("2024 North America row");
        assert!((y2024.countries["U.S."] - 25.0).abs() < 1e-9);
        assert!((y2024.countries["Canada"] - 75.0).abs() < 1e-9);
    }

    // ========== Dashboard Pipeline ==========

    #[test]
    fn test_dashboard_grouped_bar_respects_filters() {
        let mut dash = Dashboard::new();
        dash.set_selection_core(View::Standard, Dimension::Region, ["Europe"]);
        dash.set_selection_core(View::Standard, Dimension::Year, ["2024", "2025"]);
        let table = dash.grouped_bar_core(View::Standard, Dimension::ServiceType);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.segments.len(), 4);
    }

    #[test]
    fn test_dashboard_pinned_segments_become_universe() {
        let mut dash = Dashboard::new();
        dash.set_selection_core(
            View::Standard,
            Dimension::DeliveryChannel,
            ["Depot", "Remote"],
        );
        let table = dash.grouped_bar_core(View::Standard, Dimension::DeliveryChannel);
        assert_eq!(
            table.segments,
            vec!["Depot".to_string(), "Remote".to_string()]
        );
    }

    #[test]
    fn test_dashboard_empty_filter_yields_no_data_kpis() {
        let mut dash = Dashboard::new();
        dash.set_selection_core(View::Standard, Dimension::Brand, ["NoSuchBrand"]);
        let kpis = dash.kpis_core(View::Standard, Dimension::ServiceType);
        assert!(!kpis.has_data);
        assert_eq!(kpis.total_value, 0.0);
        assert_eq!(kpis.top_segment, None);
    }

    #[test]
    fn test_dashboard_volume_mode_switches_metric() {
        let mut dash = Dashboard::new();
        let value_table = dash.grouped_bar_core(View::Standard, Dimension::ServiceType);
        dash.set_mode_core(EvaluationMode::Volume);
        let volume_table = dash.grouped_bar_core(View::Standard, Dimension::ServiceType);
        let value_total: f64 = value_table.rows.iter().flat_map(|r| r.values.values()).sum();
        let volume_total: f64 = volume_table.rows.iter().flat_map(|r| r.values.values()).sum();
        assert!(volume_total > value_total, "volume units dwarf M-USD values");
    }

    #[test]
    fn test_dashboard_yoy_first_year_zero() {
        let mut dash = Dashboard::new();
        let yoy = dash.yoy_chart_core(Dimension::ServiceType);
        let first = yoy.rows.first().expect("yoy rows");
        for segment in &yoy.segments {
            assert_eq!(first.get(segment), 0.0);
        }
    }

    #[test]
    fn test_dashboard_waterfall_totals_consistent() {
        let mut dash = Dashboard::new();
        let wf = dash.waterfall_core();
        assert_eq!(wf.steps.len(), 7, "one step per year after the base");
        let sum: f64 = wf.steps.iter().map(|s| s.increment).sum();
        assert!((sum - wf.total_incremental).abs() < 1e-6);
        let last = wf.steps.last().unwrap();
        assert!((last.cumulative - (wf.base_value + wf.total_incremental)).abs() < 1e-6);
    }

    #[test]
    fn test_dashboard_bubbles_deterministic_and_keyed() {
        let mut dash = Dashboard::new();
        let first = dash.bubble_chart_core(Dimension::ServiceType);
        let second = dash.bubble_chart_core(Dimension::ServiceType);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        for point in &first {
            assert!(catalog::SERVICE_TYPES.contains(&point.key.as_str()));
        }
    }

    #[test]
    fn test_bubble_cagr_spans_year_labels_not_row_count() {
        // A sparse year selection keeps only the endpoint rows, but the
        // growth rate must still annualize over the full seven-year gap.
        let mut dash = Dashboard::new();
        dash.set_selection_core(View::Attractiveness, Dimension::Year, ["2024", "2031"]);

        let table = dash.grouped_bar_core(View::Attractiveness, Dimension::ServiceType);
        assert_eq!(table.rows.len(), 2);

        let grand_total: f64 = table.rows.iter().flat_map(|r| r.values.values()).sum();
        let items: Vec<BubbleItem> = table
            .segments
            .iter()
            .map(|segment| {
                let first = table.rows.first().map(|r| r.get(segment)).unwrap_or(0.0);
                let last = table.rows.last().map(|r| r.get(segment)).unwrap_or(0.0);
                let total: f64 = table.rows.iter().map(|r| r.get(segment)).sum();
                BubbleItem {
                    key: segment.clone(),
                    cagr: growth::cagr(first, last, 7),
                    market_share: total / grand_total * 100.0,
                    opportunity: last,
                }
            })
            .collect();

        let expected = bubble::layout(&items);
        assert_eq!(dash.bubble_chart_core(Dimension::ServiceType), expected);
    }

    #[test]
    fn test_scoped_view_region_reset() {
        let mut dash = Dashboard::new();
        dash.set_selection_core(View::Incremental, Dimension::Country, ["Mexico", "U.S."]);
        dash.select_region_core(View::Incremental, "North America");
        let table = dash.grouped_bar_core(View::Incremental, Dimension::Country);
        assert!(table.segments.contains(&"U.S.".to_string()));
        assert!(
            !table.segments.contains(&"Mexico".to_string()),
            "Mexico is outside the scoped country submap"
        );
    }
}
