pub mod portfolio;
pub use portfolio::Algorithm;
