//! # sc-counter
//!
//! The counting engine: turns parsed ELAN documents into per-gloss frequency
//! statistics.
//!
//! - [`units`] groups annotations into gloss units (singletons for one-handed
//!   signers, overlap-merged streams for two-handed signers)
//! - [`aggregate`] tallies units into typed [`FrequencyTables`]
//! - [`summary`] derives the per-gloss result records
//! - [`export`] renders results as JSON or flattened CSV
//! - [`counter`] drives the pipeline over files and directories

pub mod aggregate;
pub mod counter;
pub mod error;
pub mod export;
pub mod summary;
pub mod units;

pub use aggregate::{FrequencyTables, GlossTally};
pub use counter::{CountRun, CounterOptions, SignCounter, SkippedFile, expand_inputs};
pub use error::CounterError;
pub use summary::{Breakdown, GlossSummary, summarize};
