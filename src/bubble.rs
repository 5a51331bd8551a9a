// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Bubble-Layout Normalizer

use crate::types::{BubbleItem, BubblePoint};

/// Minimum pairwise distance in normalized index space.
pub const MIN_DIST: f64 = 1.1;

/// Relaxation iteration cap. Layout is best-effort anti-overlap, not a
/// physical simulation: if the cap is reached some residual overlap may
/// remain.
pub const MAX_ITERATIONS: usize = 48;

/// Points may spill this far past the 0..10 plot range during repulsion
/// but never escape further.
const OVERFLOW: f64 = 0.75;

/// Bubble radius range in pixels.
const SIZE_MIN_PX: f64 = 16.0;
const SIZE_MAX_PX: f64 = 56.0;

/// Min-max scale a value into 0..range; a degenerate (zero-width) input
/// range maps everything to the midpoint.
fn min_max_scale(v: f64, min: f64, max: f64, range: f64) -> f64 {
    if max - min <= f64::EPSILON {
        range / 2.0
    } else {
        (v - min) / (max - min) * range
    }
}

/// Map raw (CAGR, share, opportunity) triples into plot space with enforced
/// minimum separation.
///
/// x = CAGR and y = market share, each min-max normalized to 0..10 over the
/// current item set; size is an independent min-max of opportunity into the
/// pixel-radius range. Output is ordered by descending opportunity (largest
/// bubbles placed first) — consumers re-associate by `key`. Deterministic:
/// same input, same output.
pub fn layout(items: &[BubbleItem]) -> Vec<BubblePoint> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&BubbleItem> = items.iter().collect();
    ordered.sort_by(|a, b| {
        b.opportunity
            .partial_cmp(&a.opportunity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });

    let (cagr_min, cagr_max) = bounds(ordered.iter().map(|i| i.cagr));
    let (share_min, share_max) = bounds(ordered.iter().map(|i| i.market_share));
    let (opp_min, opp_max) = bounds(ordered.iter().map(|i| i.opportunity));

    let mut points: Vec<BubblePoint> = ordered
        .iter()
        .map(|item| BubblePoint {
            key: item.key.clone(),
            x: min_max_scale(item.cagr, cagr_min, cagr_max, 10.0),
            y: min_max_scale(item.market_share, share_min, share_max, 10.0),
            size: SIZE_MIN_PX
                + min_max_scale(item.opportunity, opp_min, opp_max, SIZE_MAX_PX - SIZE_MIN_PX),
        })
        .collect();

    relax(&mut points);
    points
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Iterative pairwise repulsion: every pair closer than `MIN_DIST` is pushed
/// apart along the connecting vector, half the deficit each, clamped to the
/// bounded overflow region. Terminates early once an iteration finds no
/// overlap.
fn relax(points: &mut [BubblePoint]) {
    for _ in 0..MAX_ITERATIONS {
        let mut overlapped = false;

        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let dx = points[j].x - points[i].x;
                let dy = points[j].y - points[i].y;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= MIN_DIST {
                    continue;
                }
                overlapped = true;

                // Coincident points get a fixed separation axis so the
                // result stays deterministic.
                let (ux, uy) = if dist > 1e-9 {
                    (dx / dist, dy / dist)
                } else {
                    (1.0, 0.0)
                };
                let push = (MIN_DIST - dist) / 2.0;

                points[i].x = clamp_plot(points[i].x - ux * push);
                points[i].y = clamp_plot(points[i].y - uy * push);
                points[j].x = clamp_plot(points[j].x + ux * push);
                points[j].y = clamp_plot(points[j].y + uy * push);
            }
        }

        if !overlapped {
            break;
        }
    }
}

fn clamp_plot(v: f64) -> f64 {
    v.clamp(-OVERFLOW, 10.0 + OVERFLOW)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
