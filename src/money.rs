// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Monetary Rounding
//
// f64 ↔ Decimal adapter for the synthesizer's money path. All monetary
// fields are rounded to 2 decimal places through Decimal so repeated
// regeneration cannot drift on platform-dependent float formatting.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Convert f64 to Decimal (lossy but sufficient for synthetic measures).
pub fn to_decimal(v: f64) -> Decimal {
    Decimal::from_f64(v).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal to f64.
pub fn from_decimal(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Round a monetary amount to 2 decimal places, half away from zero.
/// Negative inputs clamp to zero: all monetary measures are non-negative.
pub fn round_money(v: f64) -> f64 {
    let d = to_decimal(v)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .max(dec!(0));
    from_decimal(d)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
