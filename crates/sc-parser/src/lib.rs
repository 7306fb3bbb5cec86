//! # sc-parser
//!
//! ELAN (`.eaf`) annotation document parsing and participant metadata loading.
//!
//! - [`time_slots`] resolves `TIME_SLOT` references to absolute milliseconds
//! - [`tiers`] selects gloss tiers and classifies participants as one-handed,
//!   two-handed, or skipped via an explicit tier-count policy
//! - [`elan`] ties both together into an [`ElanDocument`]
//! - [`metadata`] reads the tab-separated participant metadata table

pub mod elan;
pub mod error;
pub mod metadata;
pub mod tiers;
pub mod time_slots;

pub use elan::{ElanDocument, document_identifier};
pub use error::ParserError;
pub use metadata::{MetadataRow, MetadataTable};
pub use tiers::{
    ParticipantLayout, ParticipantTiers, SkippedParticipant, TierHandling, TierPatterns,
    TierPolicy,
};
pub use time_slots::TimeSlots;
