//! Same include/exclude decomposition as `exhaustive`, with every
//! `(item count, remaining hours)` state cached.
//!
//! The cache is a dense `(n + 1) * (capacity + 1)` table when that fits in
//! `MAX_DENSE_ENTRIES`, otherwise a hash map holding only the visited states.
//! It is built fresh for each call. States are filled lazily from an explicit
//! stack, so large item counts do not grow the call stack.

use ahash::RandomState;
use anyhow::{anyhow, Result};
use log::debug;
use portfolio_challenges::portfolio::{Challenge, Item, Solution};
use std::collections::HashMap;

/// 16M entries, 256 MB of `Option<u64>`.
pub const MAX_DENSE_ENTRIES: usize = 1 << 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Distinct states evaluated.
    pub states: usize,
    /// Entries allocated for the cache. Equals `states` for the sparse cache.
    pub table_size: usize,
}

enum Table {
    Dense { width: usize, cells: Vec<Option<u64>> },
    Sparse(HashMap<(usize, u64), u64, RandomState>),
}

struct Memo {
    table: Table,
    states: usize,
}

impl Memo {
    fn new(num_items: usize, capacity: u64) -> Result<Self> {
        let dense_len = usize::try_from(capacity)
            .ok()
            .and_then(|c| c.checked_add(1))
            .and_then(|width| (num_items + 1).checked_mul(width).map(|len| (width, len)))
            .filter(|&(_, len)| len <= MAX_DENSE_ENTRIES);

        let table = match dense_len {
            Some((width, len)) => {
                let mut cells = Vec::new();
                cells
                    .try_reserve_exact(len)
                    .map_err(|e| anyhow!("Memo table of {} entries cannot be allocated: {}", len, e))?;
                cells.resize(len, None);
                Table::Dense { width, cells }
            }
            None => {
                debug!(
                    "{} items with capacity {} exceed the dense table, using a sparse cache",
                    num_items, capacity
                );
                Table::Sparse(HashMap::default())
            }
        };
        Ok(Self { table, states: 0 })
    }

    fn get(&self, count: usize, remaining: u64) -> Option<u64> {
        match &self.table {
            Table::Dense { width, cells } => cells[count * width + remaining as usize],
            Table::Sparse(cache) => cache.get(&(count, remaining)).copied(),
        }
    }

    // only for states already in the cache
    fn solved(&self, count: usize, remaining: u64) -> u64 {
        self.get(count, remaining).unwrap_or_default()
    }

    fn set(&mut self, count: usize, remaining: u64, value: u64) {
        match &mut self.table {
            Table::Dense { width, cells } => cells[count * *width + remaining as usize] = Some(value),
            Table::Sparse(cache) => {
                cache.insert((count, remaining), value);
            }
        }
        self.states += 1;
    }

    fn table_size(&self) -> usize {
        match &self.table {
            Table::Dense { cells, .. } => cells.len(),
            Table::Sparse(cache) => cache.len(),
        }
    }
}

/// Fills `memo` up to the state `(count, remaining)`: the best value using the
/// first `count` items within `remaining` hours.
fn evaluate(items: &[Item], memo: &mut Memo, count: usize, remaining: u64) -> u64 {
    let mut stack = vec![(count, remaining)];
    while let Some(&(i, c)) = stack.last() {
        if memo.get(i, c).is_some() {
            stack.pop();
            continue;
        }
        if i == 0 || c == 0 {
            memo.set(i, c, 0);
            stack.pop();
            continue;
        }

        let item = &items[i - 1];
        let cost = item.cost() as u64;
        let fits = cost <= c;
        let mut pending = false;
        if memo.get(i - 1, c).is_none() {
            stack.push((i - 1, c));
            pending = true;
        }
        if fits && memo.get(i - 1, c - cost).is_none() {
            stack.push((i - 1, c - cost));
            pending = true;
        }
        if pending {
            continue;
        }

        let exclude = memo.solved(i - 1, c);
        let best = if fits {
            exclude.max(memo.solved(i - 1, c - cost) + item.value() as u64)
        } else {
            exclude
        };
        memo.set(i, c, best);
        stack.pop();
    }
    memo.solved(count, remaining)
}

/// Walks the table back from the full state. Item `i` was taken exactly when
/// dropping it changes the best value.
fn reconstruct(items: &[Item], memo: &Memo, capacity: u64) -> Vec<usize> {
    let mut selected_items = Vec::new();
    let mut remaining = capacity;
    for i in (1..=items.len()).rev() {
        if remaining == 0 {
            break;
        }
        if memo.get(i, remaining) != memo.get(i - 1, remaining) {
            selected_items.push(i - 1);
            remaining -= items[i - 1].cost() as u64;
        }
    }
    selected_items.reverse();
    selected_items
}

pub fn solve_with_stats(challenge: &Challenge) -> Result<(Solution, Stats)> {
    let items = challenge.items();
    let capacity = challenge.capacity();
    let mut memo = Memo::new(items.len(), capacity)?;

    let best = evaluate(items, &mut memo, items.len(), capacity);
    let selected_items = reconstruct(items, &memo, capacity);

    let stats = Stats {
        states: memo.states,
        table_size: memo.table_size(),
    };
    debug!(
        "memoized search evaluated {} of {} states, best value {}",
        stats.states, stats.table_size, best
    );
    Ok((
        Solution {
            items: selected_items,
        },
        stats,
    ))
}

pub fn solve_challenge(challenge: &Challenge) -> Result<Solution> {
    solve_with_stats(challenge).map(|(solution, _)| solution)
}

pub fn max_value(challenge: &Challenge) -> Result<u64> {
    let items = challenge.items();
    let capacity = challenge.capacity();
    let mut memo = Memo::new(items.len(), capacity)?;
    Ok(evaluate(items, &mut memo, items.len(), capacity))
}
