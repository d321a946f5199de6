// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Domain types for the pageselect component
//!
//! This crate contains the option and selection types shared between the
//! headless controller and the terminal UI adapter. They represent the
//! business domain and stay UI-agnostic.

pub mod option;
pub mod selection;

// Re-export commonly used types
pub use option::*;
pub use selection::*;
