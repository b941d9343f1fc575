//! Tries every include/exclude decision over all projects.
//!
//! Always optimal, O(2^n). Recursion depth equals the number of items, which
//! is fine for the small instances this is meant for.

use anyhow::Result;
use log::debug;
use portfolio_challenges::portfolio::{Challenge, Item, Solution};

#[derive(Debug, Default)]
struct Branch {
    value: u64,
    items: Vec<usize>,
}

/// Best portfolio drawn from `items` within `remaining` hours. The last item
/// is decided first; on a tie the item is left out.
fn search(items: &[Item], remaining: u64, visited: &mut u64) -> Branch {
    *visited += 1;
    let Some((item, rest)) = items.split_last() else {
        return Branch::default();
    };
    if remaining == 0 {
        return Branch::default();
    }

    let exclude = search(rest, remaining, visited);
    let cost = item.cost() as u64;
    if cost > remaining {
        return exclude;
    }

    let mut include = search(rest, remaining - cost, visited);
    include.value += item.value() as u64;
    if include.value > exclude.value {
        include.items.push(rest.len());
        include
    } else {
        exclude
    }
}

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    let mut visited = 0;
    let best = search(challenge.items(), challenge.capacity(), &mut visited);
    debug!(
        "exhaustive search visited {} nodes, best value {}",
        visited, best.value
    );
    Ok(Solution { items: best.items })
}

pub fn max_value(challenge: &Challenge) -> Result<u64> {
    let mut visited = 0;
    Ok(search(challenge.items(), challenge.capacity(), &mut visited).value)
}
