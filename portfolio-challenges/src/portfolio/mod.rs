pub mod samples;

use anyhow::Result;
use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("Item '{name}' has cost {cost}, cost must be positive")]
    InvalidItem { name: String, cost: u32 },
    #[error("Duplicate item ({0}) selected")]
    DuplicateItem(usize),
    #[error("Item ({0}) is out of bounds")]
    ItemOutOfBounds(usize),
    #[error("Total cost ({total_cost}) exceeded budget ({capacity})")]
    OverBudget { total_cost: u64, capacity: u64 },
}

/// A project that can be added to the portfolio.
///
/// `cost` is the number of hours the project consumes and is always positive.
/// Items are validated on construction and on deserialization, so solvers
/// never see a zero cost.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "ItemData")]
pub struct Item {
    name: String,
    value: u32,
    cost: u32,
}

#[derive(Deserialize)]
struct ItemData {
    name: String,
    value: u32,
    cost: u32,
}

impl TryFrom<ItemData> for Item {
    type Error = ChallengeError;

    fn try_from(data: ItemData) -> Result<Self, Self::Error> {
        Item::new(data.name, data.value, data.cost)
    }
}

impl Item {
    pub fn new(name: impl Into<String>, value: u32, cost: u32) -> Result<Self, ChallengeError> {
        let name = name.into();
        if cost == 0 {
            return Err(ChallengeError::InvalidItem { name, cost });
        }
        Ok(Self { name, value, cost })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_items: usize,
    /// Budget as a percentage of the summed cost of all generated items.
    pub budget_pct: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    /// Indices into `Challenge::items`, in the order they were accepted.
    pub items: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

/// The chosen items of a solution together with their summed value and cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub items: Vec<&'a Item>,
    pub total_value: u64,
    pub total_cost: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    items: Vec<Item>,
    budget: i64,
}

impl Challenge {
    /// A negative budget is accepted and behaves as zero capacity.
    pub fn new(items: Vec<Item>, budget: i64) -> Self {
        Self { items, budget }
    }

    pub fn from_tuples(items: &[(&str, u32, u32)], budget: i64) -> Result<Self, ChallengeError> {
        let items = items
            .iter()
            .map(|&(name, value, cost)| Item::new(name, value, cost))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(items, budget))
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        let mut rng = SmallRng::from_seed(*seed);

        // Costs in [1, 50] hours, values in [1, 100]
        let items: Vec<Item> = (0..track.num_items)
            .map(|i| Item {
                name: format!("item-{}", i),
                value: rng.gen_range(1..=100),
                cost: rng.gen_range(1..=50),
            })
            .collect();

        let total_cost: u64 = items.iter().map(|item| item.cost as u64).sum();
        let budget = (track.budget_pct as f64 / 100.0 * total_cost as f64) as i64;
        debug!(
            "generated {} items with total cost {} and budget {}",
            items.len(),
            total_cost,
            budget
        );

        Ok(Challenge { items, budget })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    /// The budget solvers actually work with: negative budgets become zero and
    /// anything above the summed cost of every item is cut down to that sum,
    /// since extra hours cannot change any selection.
    pub fn capacity(&self) -> u64 {
        let total_cost: u64 = self.items.iter().map(|item| item.cost as u64).sum();
        (self.budget.max(0) as u64).min(total_cost)
    }

    pub fn evaluate_total_value(&self, solution: &Solution) -> Result<u64> {
        let mut seen = HashSet::with_capacity(solution.items.len());
        let mut total_cost = 0u64;
        let mut total_value = 0u64;
        for &index in &solution.items {
            if !seen.insert(index) {
                return Err(ChallengeError::DuplicateItem(index).into());
            }
            let item = self
                .items
                .get(index)
                .ok_or(ChallengeError::ItemOutOfBounds(index))?;
            total_cost += item.cost as u64;
            total_value += item.value as u64;
        }

        let capacity = self.capacity();
        if total_cost > capacity {
            return Err(ChallengeError::OverBudget {
                total_cost,
                capacity,
            }
            .into());
        }
        Ok(total_value)
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        self.evaluate_total_value(solution).map(|_| ())
    }

    pub fn selection(&self, solution: &Solution) -> Result<Selection<'_>> {
        let total_value = self.evaluate_total_value(solution)?;
        let items: Vec<&Item> = solution.items.iter().map(|&i| &self.items[i]).collect();
        let total_cost = items.iter().map(|item| item.cost as u64).sum();
        Ok(Selection {
            items,
            total_value,
            total_cost,
        })
    }
}
