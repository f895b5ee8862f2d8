//! Core table operations.
//!
//! This module contains:
//! - [`filter`] - Row selection by participant and date range
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::MessageTable;
//! use chatlens::core::{FilterConfig, UserSelection, apply_filters, filter};
//!
//! let table = MessageTable::from_export("1/1/24, 10:00 - Alice: hi");
//! let view = filter(&table, &UserSelection::Overall);
//! let same = apply_filters(&table, &FilterConfig::new());
//! assert_eq!(view.len(), same.len());
//! ```

pub mod filter;

// Re-export main types for convenience
pub use filter::{FilterConfig, OVERALL, TableView, UserSelection, apply_filters, filter};
