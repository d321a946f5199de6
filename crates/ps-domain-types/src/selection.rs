// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Selection model
//!
//! Single-select holds at most one option; multi-select holds an ordered
//! sequence in insertion order. Membership is always by value identity.

use serde::{Deserialize, Serialize};

use crate::option::SelectOption;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Selection {
    Single(Option<SelectOption>),
    Multi(Vec<SelectOption>),
}

impl Selection {
    pub fn single() -> Self {
        Selection::Single(None)
    }

    pub fn multi() -> Self {
        Selection::Multi(Vec::new())
    }

    /// Initial multi-selection, preserving the given order
    pub fn multi_with(options: Vec<SelectOption>) -> Self {
        Selection::Multi(options)
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, Selection::Multi(_))
    }

    /// The selected options in display order
    pub fn as_slice(&self) -> &[SelectOption] {
        match self {
            Selection::Single(Some(option)) => std::slice::from_ref(option),
            Selection::Single(None) => &[],
            Selection::Multi(options) => options.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.as_slice().iter().any(|option| option.value == value)
    }

    /// Toggle an option in or out of the selection.
    ///
    /// Multi mode removes an already-selected value and appends a new one.
    /// Single mode replaces the current choice; re-choosing the selected
    /// value keeps it.
    pub fn toggle(&mut self, option: SelectOption) {
        match self {
            Selection::Single(current) => {
                *current = Some(option);
            }
            Selection::Multi(options) => {
                if let Some(index) = options.iter().position(|o| o.same_value(&option)) {
                    options.remove(index);
                } else {
                    options.push(option);
                }
            }
        }
    }
}
