// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Headless controller for a paginated, searchable select component
//!
//! The controller is a plain state machine: UI adapters feed it
//! [`SelectMsg`] events and execute the [`PageRequest`] commands it
//! returns. Option pages come from a host-supplied [`OptionsPager`];
//! the [`PageFetcher`] runs those requests on the Tokio runtime and
//! feeds the replies back in as messages. Nothing in this crate touches
//! a terminal, which keeps every transition unit-testable.

pub mod controller;
pub mod debounce;
pub mod fetcher;
pub mod pager;

// Re-export commonly used types
pub use controller::{
    dedup_by_value, SelectConfig, SelectController, SelectMsg, DEFAULT_DEBOUNCE,
    DEFAULT_PAGE_SIZE,
};
pub use debounce::Debouncer;
pub use fetcher::PageFetcher;
pub use pager::{OptionsPager, PageRequest, PagerError, StaticOptionsPager};
