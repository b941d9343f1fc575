//! Packs projects by value per hour, best ratio first.
//!
//! Runs in O(n log n) and always returns a feasible portfolio, but does not
//! backtrack, so the result can be worse than the optimum.

use anyhow::Result;
use log::debug;
use portfolio_challenges::portfolio::{Challenge, Item, Solution};
use std::cmp::Ordering;

// a.value / a.cost vs b.value / b.cost, cross-multiplied so no float is involved
fn cmp_ratio_desc(a: &Item, b: &Item) -> Ordering {
    let a_scaled = a.value() as u64 * b.cost() as u64;
    let b_scaled = b.value() as u64 * a.cost() as u64;
    b_scaled.cmp(&a_scaled)
}

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    let items = challenge.items();

    // Stable sort: equal ratios keep their input order
    let mut sorted_items: Vec<usize> = (0..items.len()).collect();
    sorted_items.sort_by(|&a, &b| cmp_ratio_desc(&items[a], &items[b]));

    let mut remaining = challenge.capacity();
    let mut selected_items = Vec::with_capacity(items.len());
    for &i in &sorted_items {
        let cost = items[i].cost() as u64;
        if cost <= remaining {
            remaining -= cost;
            selected_items.push(i);
        }
    }

    debug!(
        "greedy selected {} of {} items, {} hours left",
        selected_items.len(),
        items.len(),
        remaining
    );
    Ok(Solution {
        items: selected_items,
    })
}
