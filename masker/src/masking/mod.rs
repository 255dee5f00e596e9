//! Masking strategies, traversal, and entrypoints.
//!
//! This module ties the pieces together:
//!
//! - **`strategy`**: Catalog layer - named transforms (`StrategyCatalog`, `StrategyFn`)
//! - **`traverse`**: Domain layer - what is walked (`Maskable`, `MaskValue`)
//! - **`engine`**: Application layer - decisions and entrypoints (`FieldMasker`, `MaskEngine`)
//!
//! The ambient-context adapter lives in `crate::context`.

mod engine;
mod strategy;
mod traverse;

pub use engine::{FieldMasker, MaskEngine, MaskPolicy, Overrides, OVERRIDE_NONE};
pub use strategy::{StrategyCatalog, StrategyFn};
pub use traverse::{MaskValue, Maskable};
