//! Domain model for techgap
//!
//! This module contains core domain types and errors that provide:
//! - Compile-time safety for jurisdictions, types and groups
//! - Self-documenting function signatures
//! - Structured error handling

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{Jurisdiction, Metric, Page, Scope, TechGroup, TechType};

pub use errors::{ExportError, LoadError};
