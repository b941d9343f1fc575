pub mod portfolio;
pub use portfolio::{Challenge, ChallengeError, Item, Selection, Solution, Track};
