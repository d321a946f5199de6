// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! ViewModel Layer - UI State and Presentation Models
//!
//! This module bridges the select controller to the rendering layer.
//! The ViewModel owns all interaction state and processes every input
//! event; the View only reads that state and draws it.
//!
//! ## What Belongs Here:
//!
//! ✅ **UI State Management**: Highlight position, menu windowing, the search field
//! ✅ **Input Processing**: Key handling, mouse event processing
//! ✅ **Page Fetching**: Dispatching page requests and absorbing their replies
//!
//! ## What Does NOT Belong Here:
//!
//! ❌ **Pagination Rules**: Page merging, dedup, and staleness live in `ps-core`
//! ❌ **Rendering**: Ratatui widget creation, styling, layout
//!
//! ## Primary Mission: Headless Testing
//!
//! The ViewModel runs without a terminal. Tests feed it [`Msg`] values
//! and read its state back, so every interaction path can be exercised
//! at full CPU speed with an in-memory pager.

pub mod select_model;

pub use select_model::{MouseAction, Msg, SelectStyle, SelectViewModel};
