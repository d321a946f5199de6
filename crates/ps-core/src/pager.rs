// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Option Paging - Abstract Page Source Interface
//!
//! This module defines the `OptionsPager` trait that abstracts where option
//! pages come from (REST backends, databases, in-memory rosters).
//!
//! ## Architecture Overview
//!
//! The controller never fetches anything itself: it emits [`PageRequest`]
//! commands and the adapter layer resolves them against an `OptionsPager`.
//! A request's `term` is `None` when no search is active; implementations
//! typically treat that as match-all. `page_index` counts from zero and the
//! slice for a page is `[page_index * page_size, (page_index + 1) * page_size)`.
//!
//! The returned page is validated before the controller merges it: options
//! with an empty value or label are rejected with a descriptive error
//! instead of being silently rendered.

use async_trait::async_trait;
use ps_domain_types::{InvalidOption, SelectOption};
use std::time::Duration;
use thiserror::Error;

/// A single page fetch command issued by the controller
///
/// The generation tags the fetch context the request was issued in; replies
/// carrying a stale generation are discarded wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub term: Option<String>,
    pub page_index: usize,
    pub page_size: usize,
}

/// Page source failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    #[error("page source failed: {message}")]
    Backend { message: String },
    #[error(transparent)]
    Invalid(#[from] InvalidOption),
}

impl PagerError {
    pub fn backend(message: impl Into<String>) -> Self {
        PagerError::Backend {
            message: message.into(),
        }
    }
}

/// Abstract trait for option page sources
///
/// Implementations resolve one page of options for a search term. They do
/// not need to deduplicate against the selection or clamp page indexes; an
/// out-of-range page simply returns an empty list.
#[async_trait]
pub trait OptionsPager: Send + Sync {
    /// Fetch one page of options
    ///
    /// `request.term == None` means no filter is active.
    async fn page(&self, request: &PageRequest) -> Result<Vec<SelectOption>, PagerError>;

    /// Get a human-readable description of this page source
    fn description(&self) -> &str;
}

/// In-memory page source over a fixed roster
///
/// Filters case-insensitively by label substring, slices by page, and can
/// simulate backend latency. Used by the demo binary and the tests.
pub struct StaticOptionsPager {
    roster: Vec<SelectOption>,
    latency: Duration,
}

impl StaticOptionsPager {
    pub fn new(roster: Vec<SelectOption>) -> Self {
        Self {
            roster,
            latency: Duration::ZERO,
        }
    }

    /// Simulate a slow backend by sleeping before each reply.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn matching(&self, term: Option<&str>) -> Vec<SelectOption> {
        match term {
            None => self.roster.clone(),
            Some(term) => {
                let needle = term.to_lowercase();
                self.roster
                    .iter()
                    .filter(|option| option.label.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            }
        }
    }
}

#[async_trait]
impl OptionsPager for StaticOptionsPager {
    async fn page(&self, request: &PageRequest) -> Result<Vec<SelectOption>, PagerError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let start = request.page_index.saturating_mul(request.page_size);
        Ok(self
            .matching(request.term.as_deref())
            .into_iter()
            .skip(start)
            .take(request.page_size)
            .collect())
    }

    fn description(&self) -> &str {
        "in-memory roster"
    }
}
