// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Deterministic Data Synthesizer

use crate::catalog;
use crate::error::EngineError;
use crate::lcg::Lcg;
use crate::money::round_money;
use crate::types::{ChannelType, Record};

/// First identifier; ids are assigned monotonically in generation order.
pub const ID_BASE: u64 = 100_000;

// ─── Combination Iterator ────────────────────────────────────────────────────

/// One cell of the enumeration grid. The legacy dimensions are NOT part of
/// the grid: they are drawn per cell from the seeded sequence, which bounds
/// the dataset to |years × countries × service taxonomy| rows.
#[derive(Debug, Clone, Copy)]
struct Combo {
    year: u16,
    region: &'static str,
    country: &'static str,
    service_type: &'static str,
    end_user_type: &'static str,
    delivery_channel: &'static str,
    business_model: &'static str,
}

/// Cartesian product year × (region, country) × serviceType × endUserType ×
/// deliveryChannel × businessModel, in fixed catalog order.
fn combinations() -> impl Iterator<Item = Combo> {
    catalog::years().flat_map(|year| {
        catalog::REGIONS.iter().flat_map(move |&region| {
            catalog::countries(region).iter().flat_map(move |&country| {
                catalog::SERVICE_TYPES.iter().flat_map(move |&service_type| {
                    catalog::END_USER_TYPES.iter().flat_map(move |&end_user_type| {
                        catalog::DELIVERY_CHANNELS.iter().flat_map(move |&delivery_channel| {
                            catalog::BUSINESS_MODELS.iter().map(move |&business_model| Combo {
                                year,
                                region,
                                country,
                                service_type,
                                end_user_type,
                                delivery_channel,
                                business_model,
                            })
                        })
                    })
                })
            })
        })
    })
}

/// Number of records a full generation pass produces.
pub fn dataset_size() -> usize {
    let country_count: usize = catalog::REGIONS
        .iter()
        .map(|&r| catalog::countries(r).len())
        .sum();
    let years = (catalog::LAST_YEAR - catalog::FIRST_YEAR + 1) as usize;
    years
        * country_count
        * catalog::SERVICE_TYPES.len()
        * catalog::END_USER_TYPES.len()
        * catalog::DELIVERY_CHANNELS.len()
        * catalog::BUSINESS_MODELS.len()
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Generate the full synthetic record set.
///
/// Pure function of the fixed LCG seed: two calls produce field-for-field
/// identical output. Per-cell draw order (one state advance each, fixed):
/// productType, bladeMaterial, handleLength, application, endUser,
/// distributionChannel (only when subtypes exist), brand, base, price
/// jitter, qty, share, cagr, yoy.
pub fn generate() -> Result<Vec<Record>, EngineError> {
    let mut lcg = Lcg::new();
    let mut records = Vec::with_capacity(dataset_size());

    for (seq, combo) in combinations().enumerate() {
        let product_type = *lcg.pick(&catalog::PRODUCT_TYPES);
        let blade_material = *lcg.pick(&catalog::BLADE_MATERIALS);
        let handle_length = *lcg.pick(&catalog::HANDLE_LENGTHS);
        let application = *lcg.pick(&catalog::APPLICATIONS);
        let end_user = *lcg.pick(&catalog::END_USERS);

        let subtypes = catalog::channel_subtypes(end_user);
        let distribution_channel = if subtypes.is_empty() {
            end_user
        } else {
            *lcg.pick(subtypes)
        };
        let distribution_channel_type =
            if distribution_channel == "Direct Sales" || subtypes.is_empty() {
                ChannelType::Direct
            } else {
                ChannelType::Indirect
            };

        let brand_index = lcg.index(catalog::BRANDS.len());
        let (brand, company) = catalog::BRANDS[brand_index];

        let multiplier = catalog::product_multiplier(product_type)?
            * catalog::material_multiplier(blade_material)?
            * catalog::application_multiplier(application)?
            * catalog::end_user_multiplier(end_user)?
            * catalog::region_multiplier(combo.region)?
            * catalog::brand_tier_multiplier(brand_index);
        let trend = catalog::year_trend(combo.year);

        // Base market draw in USD thousands.
        let base = lcg.range(40.0, 200.0);
        let market_value_usd = round_money(base * multiplier * trend);
        let price = round_money(
            lcg.range(18.0, 60.0)
                * catalog::material_multiplier(blade_material)?
                * catalog::brand_tier_multiplier(brand_index),
        );
        let qty = lcg.range(200.0, 2000.0).floor() as u32;
        let revenue = round_money(price * qty as f64);
        // Units implied by value (thousands USD) at unit price, floored.
        let volume_units = if price > 0.0 {
            (market_value_usd * 1000.0 / price).floor()
        } else {
            0.0
        };
        let market_share_pct = round_money(lcg.next() * 12.0);
        let cagr = round_money(2.0 + lcg.next() * 16.0);
        let yoy_growth = round_money(lcg.next() * 18.0);

        records.push(Record {
            id: ID_BASE + seq as u64,
            year: combo.year,
            region: combo.region.to_string(),
            country: combo.country.to_string(),
            service_type: combo.service_type.to_string(),
            end_user_type: combo.end_user_type.to_string(),
            delivery_channel: combo.delivery_channel.to_string(),
            business_model: combo.business_model.to_string(),
            product_type: product_type.to_string(),
            blade_material: blade_material.to_string(),
            handle_length: handle_length.to_string(),
            application: application.to_string(),
            end_user: end_user.to_string(),
            distribution_channel_type,
            distribution_channel: distribution_channel.to_string(),
            brand: brand.to_string(),
            company: company.to_string(),
            price,
            volume_units,
            qty,
            revenue,
            market_value_usd,
            value: market_value_usd,
            market_share_pct,
            cagr,
            yoy_growth,
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
