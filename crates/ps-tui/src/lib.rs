// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal UI adapter for the pageselect component.
//!
//! The crate follows an MVVM split: `view_model` owns all interaction
//! state and is fully testable without a terminal, `view` renders that
//! state into ratatui frames, and `select_loop` wires both to crossterm
//! events and the page-fetch channel.

pub mod select_loop;
pub mod settings;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod view_model;

use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Create a terminal backed by an in-memory buffer for rendering tests.
pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}
