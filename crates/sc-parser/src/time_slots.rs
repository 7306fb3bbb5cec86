//! Time slot resolution.
//!
//! ELAN stores annotation boundaries as references into a `TIME_ORDER` table
//! of `TIME_SLOT` elements. Slots without a `TIME_VALUE` are unaligned and are
//! left out of the table; referencing one is an error at annotation time.

use std::collections::HashMap;

use crate::error::ParserError;

/// Time slot id → absolute time in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlots {
    slots: HashMap<String, i64>,
}

impl TimeSlots {
    /// Build the table from every `TIME_SLOT` element of the document.
    ///
    /// # Errors
    ///
    /// Returns `ParserError` when a slot has no id or a non-integer value.
    pub fn from_document(doc: &roxmltree::Document<'_>) -> Result<Self, ParserError> {
        let mut slots = HashMap::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("TIME_SLOT")) {
            let id = node
                .attribute("TIME_SLOT_ID")
                .ok_or(ParserError::MissingAttribute {
                    element: "TIME_SLOT",
                    attribute: "TIME_SLOT_ID",
                })?;
            let Some(raw) = node.attribute("TIME_VALUE") else {
                continue;
            };
            let value = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ParserError::InvalidTimeValue {
                    slot: id.to_string(),
                    value: raw.to_string(),
                })?;
            slots.insert(id.to_string(), value);
        }
        Ok(Self { slots })
    }

    #[must_use]
    pub fn get(&self, slot: &str) -> Option<i64> {
        self.slots.get(slot).copied()
    }

    /// Resolve a slot referenced by `annotation`.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::MissingTimeSlot` for unknown or unaligned slots.
    pub fn resolve(&self, slot: &str, annotation: &str) -> Result<i64, ParserError> {
        self.get(slot).ok_or_else(|| ParserError::MissingTimeSlot {
            annotation: annotation.to_string(),
            slot: slot.to_string(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
