// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Dimension Catalog
//
// Compiled-in universe of the synthetic dataset: year range, region/country
// topology, dimension value lists, multiplier tables, brand/company pairs.
// The core consumes no files, env vars or network input.

use crate::error::EngineError;

// ─── Years ───────────────────────────────────────────────────────────────────

pub const FIRST_YEAR: u16 = 2024;
pub const LAST_YEAR: u16 = 2031;

pub fn years() -> impl Iterator<Item = u16> {
    FIRST_YEAR..=LAST_YEAR
}

/// Linear year-trend factor applied to monetary measures.
pub fn year_trend(year: u16) -> f64 {
    1.0 + 0.06 * (year.saturating_sub(FIRST_YEAR)) as f64
}

// ─── Regions & Countries ─────────────────────────────────────────────────────

pub const REGIONS: [&str; 6] = [
    "North America",
    "Europe",
    "Asia Pacific",
    "Latin America",
    "Middle East & Africa",
    "Oceania",
];

/// Fixed region → country mapping. Every generated record satisfies
/// `country ∈ countries(region)`.
pub fn countries(region: &str) -> &'static [&'static str] {
    match region {
        "North America" => &["U.S.", "Canada", "Mexico"],
        "Europe" => &["Germany", "U.K.", "France", "Italy"],
        "Asia Pacific" => &["China", "Japan", "India", "South Korea"],
        "Latin America" => &["Brazil", "Argentina"],
        "Middle East & Africa" => &["Saudi Arabia", "South Africa"],
        "Oceania" => &["Australia"],
        _ => &[],
    }
}

/// Region subset for the scoped views (incremental / attractiveness / YoY),
/// with its own country submap independent of the six-region universe.
pub const SCOPED_REGIONS: [&str; 2] = ["North America", "Europe"];

pub fn scoped_countries(region: &str) -> &'static [&'static str] {
    match region {
        "North America" => &["U.S.", "Canada"],
        "Europe" => &["Germany", "U.K.", "France"],
        _ => &[],
    }
}

// ─── Service Taxonomy (new dimensions) ───────────────────────────────────────

pub const SERVICE_TYPES: [&str; 4] = [
    "Sharpening & Reconditioning",
    "Custom Fabrication",
    "Tool Calibration",
    "Operator Training",
];

pub const END_USER_TYPES: [&str; 4] = [
    "Industrial",
    "Commercial",
    "Institutional",
    "Residential",
];

pub const DELIVERY_CHANNELS: [&str; 3] = ["On-site", "Depot", "Remote"];

pub const BUSINESS_MODELS: [&str; 3] = ["One-time", "Subscription", "Annual Contract"];

// ─── Legacy Taxonomy ─────────────────────────────────────────────────────────

pub const PRODUCT_TYPES: [&str; 4] = ["Fixed Blade", "Folding", "Retractable", "Specialty"];

pub const BLADE_MATERIALS: [&str; 4] = [
    "Stainless Steel",
    "Carbon Steel",
    "Ceramic",
    "Titanium Coated",
];

pub const HANDLE_LENGTHS: [&str; 3] = ["Compact", "Standard", "Extended"];

pub const APPLICATIONS: [&str; 5] = [
    "Construction",
    "Manufacturing",
    "Logistics",
    "Agriculture",
    "DIY",
];

pub const END_USERS: [&str; 4] = [
    "Professional Trades",
    "Industrial OEM",
    "Retail Consumers",
    "Government",
];

/// Distribution-channel subtypes keyed by end user. An end user with no
/// subtypes (Government) falls back to the end-user label itself.
pub fn channel_subtypes(end_user: &str) -> &'static [&'static str] {
    match end_user {
        "Professional Trades" => &["Specialty Dealers", "Trade Wholesalers"],
        "Industrial OEM" => &["Direct Sales", "Industrial Distributors"],
        "Retail Consumers" => &["Mass Retail", "E-commerce", "Hardware Stores"],
        _ => &[],
    }
}

// ─── Brands ──────────────────────────────────────────────────────────────────

/// (brand, company) pairs. Brand tier = index mod 3.
pub const BRANDS: [(&str, &str); 6] = [
    ("KeenEdge", "KeenEdge Tools Ltd."),
    ("Bladecraft", "Bladecraft Industrial"),
    ("ArcPro", "ArcPro Manufacturing"),
    ("SteelLine", "SteelLine GmbH"),
    ("Vantis", "Vantis Holdings"),
    ("ToolNord", "ToolNord AB"),
];

/// Brand-tier multiplier derived from slot position modulo 3.
pub fn brand_tier_multiplier(brand_index: usize) -> f64 {
    match brand_index % 3 {
        0 => 1.00,
        1 => 1.18,
        _ => 0.87,
    }
}

// ─── Multiplier Tables ───────────────────────────────────────────────────────
//
// Each table is total over its catalog list; an unknown key is an internal
// invariant violation and fails closed upstream (empty dataset, logged).

pub fn product_multiplier(product_type: &str) -> Result<f64, EngineError> {
    match product_type {
        "Fixed Blade" => Ok(1.12),
        "Folding" => Ok(0.94),
        "Retractable" => Ok(1.05),
        "Specialty" => Ok(1.31),
        key => Err(EngineError::MissingMultiplier {
            table: "productType",
            key: key.to_string(),
        }),
    }
}

pub fn material_multiplier(blade_material: &str) -> Result<f64, EngineError> {
    match blade_material {
        "Stainless Steel" => Ok(1.00),
        "Carbon Steel" => Ok(0.88),
        "Ceramic" => Ok(1.24),
        "Titanium Coated" => Ok(1.47),
        key => Err(EngineError::MissingMultiplier {
            table: "bladeMaterial",
            key: key.to_string(),
        }),
    }
}

pub fn application_multiplier(application: &str) -> Result<f64, EngineError> {
    match application {
        "Construction" => Ok(1.18),
        "Manufacturing" => Ok(1.26),
        "Logistics" => Ok(0.97),
        "Agriculture" => Ok(0.82),
        "DIY" => Ok(0.71),
        key => Err(EngineError::MissingMultiplier {
            table: "application",
            key: key.to_string(),
        }),
    }
}

pub fn end_user_multiplier(end_user: &str) -> Result<f64, EngineError> {
    match end_user {
        "Professional Trades" => Ok(1.15),
        "Industrial OEM" => Ok(1.32),
        "Retail Consumers" => Ok(0.78),
        "Government" => Ok(1.04),
        key => Err(EngineError::MissingMultiplier {
            table: "endUser",
            key: key.to_string(),
        }),
    }
}

pub fn region_multiplier(region: &str) -> Result<f64, EngineError> {
    match region {
        "North America" => Ok(1.35),
        "Europe" => Ok(1.22),
        "Asia Pacific" => Ok(1.08),
        "Latin America" => Ok(0.74),
        "Middle East & Africa" => Ok(0.66),
        "Oceania" => Ok(0.58),
        key => Err(EngineError::MissingMultiplier {
            table: "region",
            key: key.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
