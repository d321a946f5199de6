// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View Layer - Pure Rendering
//!
//! This module renders the view model into ratatui frames. Rendering is
//! read-mostly: the only state the view writes back is the menu window
//! offset (which depends on the rows that actually fit) and the hit-test
//! registry it fills with clickable regions for the event loop.
//!
//! ## What Belongs Here:
//!
//! ✅ **Widget Creation**: Blocks, paragraphs, spans, layout math
//! ✅ **Styling**: Mapping theme roles onto ratatui styles
//! ✅ **Hit Regions**: Registering clickable rectangles for mouse input
//!
//! ## What Does NOT Belong Here:
//!
//! ❌ **Input Processing**: Key and mouse events go through the view model
//! ❌ **Pagination Rules**: Page merging and staleness live in `ps-core`

pub mod select;

pub use hit_test::HitTestRegistry;
pub use select::render;
