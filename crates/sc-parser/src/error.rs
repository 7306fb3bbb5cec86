//! Parser error types for sc-parser.

/// Errors that make a whole annotation document unusable.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Not an ELAN document: root element is <{0}>")]
    NotElan(String),

    #[error("<{element}> is missing attribute {attribute}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Time slot {slot} has a non-integer value '{value}'")]
    InvalidTimeValue { slot: String, value: String },

    #[error("Annotation {annotation} references unknown or unaligned time slot {slot}")]
    MissingTimeSlot { annotation: String, slot: String },

    #[error("Invalid tier pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}
