//! Fixed instances used by the command line driver and the test suites.

use super::{Challenge, Item};

fn item(name: &str, value: u32, cost: u32) -> Item {
    Item {
        name: name.to_string(),
        value,
        cost,
    }
}

/// Four projects competing for a 10 hour budget.
pub fn projects() -> Challenge {
    Challenge::new(
        vec![
            item("Project A", 12, 4),
            item("Project B", 10, 3),
            item("Project C", 7, 2),
            item("Project D", 4, 3),
        ],
        10,
    )
}

/// An instance where packing by value per hour is not optimal.
///
/// Z has the best ratio (1.2) and is taken first, after which neither X nor Y
/// fits. No two projects fit together, so the optimum is Y alone with 11.
pub fn greedy_failure() -> Challenge {
    Challenge::new(
        vec![item("X", 10, 9), item("Y", 11, 10), item("Z", 6, 5)],
        10,
    )
}

pub fn by_name(name: &str) -> Option<Challenge> {
    match name {
        "projects" => Some(projects()),
        "greedy_failure" => Some(greedy_failure()),
        _ => None,
    }
}

pub const NAMES: [&str; 2] = ["projects", "greedy_failure"];
