//! CLI command implementations.

pub mod product;

pub use product::ProductCommand;
