//! mobase-crawler - MoBase product attribute extraction CLI
//!
//! Fetches single product pages from the MoBase rail spare-parts catalog
//! and consolidates their technical attributes into one canonical record.

pub mod commands;
pub mod config;
pub mod format;
pub mod mobase;

pub use config::Config;
pub use mobase::{ProductDocument, ProductRecord};
