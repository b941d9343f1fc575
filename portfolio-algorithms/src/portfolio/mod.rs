pub mod exhaustive;
pub mod greedy;
pub mod memoized;

use anyhow::{anyhow, Result};
use portfolio_challenges::portfolio::{Challenge, Solution};
use std::{fmt, str::FromStr};

/// Strategy used to pick a portfolio, ordered from fastest to most thorough
/// per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Greedy,
    Exhaustive,
    Memoized,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Greedy,
        Algorithm::Exhaustive,
        Algorithm::Memoized,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Exhaustive => "exhaustive",
            Algorithm::Memoized => "memoized",
        }
    }

    /// Whether the algorithm always returns the maximum achievable value.
    pub fn is_exact(&self) -> bool {
        !matches!(self, Algorithm::Greedy)
    }

    pub fn solve(&self, challenge: &Challenge) -> Result<Solution> {
        match self {
            Algorithm::Greedy => greedy::solve_challenge(challenge),
            Algorithm::Exhaustive => exhaustive::solve_challenge(challenge),
            Algorithm::Memoized => memoized::solve_challenge(challenge),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| anyhow!("Unknown algorithm '{}'", s))
    }
}
