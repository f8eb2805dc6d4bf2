//! Unit manifest configuration.
//!
//! A manifest is a TOML file with one `[[unit]]` table per unit to place or
//! mask.  [`manifest::load`] parses it and [`validation::validate`] reports
//! entries that are accepted but probably not what the author meant.
pub mod manifest;
pub mod validation;

pub use manifest::{Manifest, UnitEntry};
pub use validation::ValidationWarning;
