// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Option model
//!
//! A select option is a value/label pair. The `value` is the identity key:
//! de-duplication and selection matching compare values only, never labels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single selectable entry
///
/// Two options with equal values are the same logical entry even when their
/// labels differ (e.g. a stale label cached in the selection). Structural
/// equality still compares both fields; identity comparisons go through
/// [`SelectOption::same_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Identity comparison: by value only
    pub fn same_value(&self, other: &SelectOption) -> bool {
        self.value == other.value
    }
}

/// Validation failure for an option arriving from a page source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOption {
    #[error("option at position {position} has an empty value (label: {label:?})")]
    EmptyValue { position: usize, label: String },
    #[error("option {value:?} at position {position} has an empty label")]
    EmptyLabel { position: usize, value: String },
}

/// Validate a fetched page before it is merged into the display list.
///
/// Positions are zero-based within the page.
pub fn validate_page(options: &[SelectOption]) -> Result<(), InvalidOption> {
    for (position, option) in options.iter().enumerate() {
        if option.value.is_empty() {
            return Err(InvalidOption::EmptyValue {
                position,
                label: option.label.clone(),
            });
        }
        if option.label.is_empty() {
            return Err(InvalidOption::EmptyLabel {
                position,
                value: option.value.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_ignores_label() {
        let a = SelectOption::new("duro1", "Duro");
        let b = SelectOption::new("duro1", "Duro (cached)");
        let c = SelectOption::new("marta1", "Duro");
        assert!(a.same_value(&b));
        assert!(!a.same_value(&c));
        assert_ne!(a, b, "structural equality still sees the labels");
    }

    #[test]
    fn validate_page_accepts_well_formed_options() {
        let page = vec![
            SelectOption::new("1", "Ada"),
            SelectOption::new("2", "Brendan"),
        ];
        assert_eq!(validate_page(&page), Ok(()));
    }

    #[test]
    fn validate_page_rejects_empty_value() {
        let page = vec![
            SelectOption::new("1", "Ada"),
            SelectOption::new("", "Nameless"),
        ];
        let err = validate_page(&page).unwrap_err();
        assert_eq!(
            err,
            InvalidOption::EmptyValue {
                position: 1,
                label: "Nameless".to_string()
            }
        );
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn validate_page_rejects_empty_label() {
        let page = vec![SelectOption::new("7", "")];
        let err = validate_page(&page).unwrap_err();
        assert_eq!(
            err,
            InvalidOption::EmptyLabel {
                position: 0,
                value: "7".to_string()
            }
        );
    }

    #[test]
    fn options_serialize_as_plain_pairs() {
        let option = SelectOption::new("duro1", "Duro");
        let json = serde_json::to_string(&option).unwrap();
        assert_eq!(json, r#"{"value":"duro1","label":"Duro"}"#);
        let back: SelectOption = serde_json::from_str(&json).unwrap();
        assert_eq!(back, option);
    }
}
