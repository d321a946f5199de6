// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Select controller state machine
//!
//! One struct owns the whole component state: raw input text, the
//! debounced search term, fetched option pages, the selection, and the
//! pagination bookkeeping. Adapters call [`SelectController::update`]
//! with a [`SelectMsg`] and execute the returned [`PageRequest`], feeding
//! the reply back in as `PageLoaded`/`PageFailed`. Transitions are
//! synchronous; no timers or tasks run inside this module.
//!
//! Pagination rules:
//! - Page 0 is requested when the menu opens and when a new search term
//!   commits; the reply replaces the fetched list.
//! - Scrolling to the end of the open list requests page
//!   `fetched_count / page_size`; the reply appends.
//! - A page whose length is zero or not a multiple of the page size marks
//!   the end of pagination until the next page-0 fetch.
//! - Every request carries a generation number; replies from older
//!   generations (superseded term, closed menu) are dropped wholesale.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use ps_domain_types::{validate_page, SelectOption, Selection};

use crate::debounce::Debouncer;
use crate::pager::{PageRequest, PagerError};

pub const DEFAULT_PAGE_SIZE: usize = 15;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Construction-time knobs for the controller
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Multi-select (ordered sequence) vs single-select (one optional entry)
    pub multiple: bool,
    /// Page length used for fetches and for the end-of-pagination check
    pub page_size: usize,
    /// Quiet period between the last keystroke and the term commit
    pub debounce: Duration,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            multiple: false,
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Events fed into the controller by the adapter layer
#[derive(Debug, Clone)]
pub enum SelectMsg {
    /// The menu became visible
    Opened,
    /// The menu was dismissed
    Closed,
    /// The raw input text changed
    TextEdited(String),
    /// Periodic tick driving the debounce commit
    Tick(Instant),
    /// The user reached the bottom of the loaded list
    ScrolledToEnd,
    /// The option with this value was chosen in the menu
    Toggled(String),
    /// A page fetch finished
    PageLoaded {
        generation: u64,
        page_index: usize,
        options: Vec<SelectOption>,
    },
    /// A page fetch failed
    PageFailed { generation: u64, error: PagerError },
}

/// The paginated-select state machine
pub struct SelectController {
    config: SelectConfig,
    open: bool,
    raw_text: Option<String>,
    committed_term: Option<String>,
    debouncer: Debouncer,
    fetched: Vec<SelectOption>,
    selection: Selection,
    loading: bool,
    has_more_pages: bool,
    /// Latest issued fetch generation; replies must match it to merge
    generation: u64,
    last_error: Option<PagerError>,
    selection_changed: bool,
}

impl SelectController {
    pub fn new(mut config: SelectConfig) -> Self {
        config.page_size = config.page_size.max(1);
        let selection = if config.multiple {
            Selection::multi()
        } else {
            Selection::single()
        };
        let debouncer = Debouncer::new(config.debounce);
        Self {
            config,
            open: false,
            raw_text: None,
            committed_term: None,
            debouncer,
            fetched: Vec::new(),
            selection,
            loading: false,
            has_more_pages: true,
            generation: 0,
            last_error: None,
            selection_changed: false,
        }
    }

    /// Seed the selection before first use (e.g. values persisted by the host).
    ///
    /// Single mode keeps the first entry only. Does not count as a
    /// selection change.
    pub fn with_initial_selection(mut self, options: Vec<SelectOption>) -> Self {
        match &mut self.selection {
            Selection::Multi(current) => *current = options,
            Selection::Single(current) => *current = options.into_iter().next(),
        }
        self
    }

    /// Apply one event; the returned request, if any, must be executed by
    /// the caller and its reply fed back in.
    pub fn update(&mut self, msg: SelectMsg) -> Option<PageRequest> {
        match msg {
            SelectMsg::Opened => {
                if self.open {
                    return None;
                }
                self.open = true;
                Some(self.begin_page_zero())
            }
            SelectMsg::Closed => {
                self.close_menu();
                None
            }
            SelectMsg::TextEdited(text) => {
                self.raw_text = Some(text.clone());
                self.debouncer.note_input(text, Instant::now());
                None
            }
            SelectMsg::Tick(now) => {
                let term = self.debouncer.poll(now)?;
                if self.committed_term.as_deref() == Some(term.as_str()) {
                    return None;
                }
                self.committed_term = Some(term);
                Some(self.begin_page_zero())
            }
            SelectMsg::ScrolledToEnd => {
                if !self.open || !self.has_more_pages || self.loading {
                    return None;
                }
                let page_index = self.next_page_index();
                Some(self.issue_request(page_index))
            }
            SelectMsg::Toggled(value) => {
                self.toggle_value(&value);
                None
            }
            SelectMsg::PageLoaded {
                generation,
                page_index,
                options,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Dropping stale page reply: generation {} (latest is {})",
                        generation,
                        self.generation
                    );
                    return None;
                }
                if let Err(error) = validate_page(&options) {
                    tracing::warn!("Rejecting malformed options page: {}", error);
                    self.loading = false;
                    self.last_error = Some(error.into());
                    return None;
                }
                self.merge_page(page_index, options);
                None
            }
            SelectMsg::PageFailed { generation, error } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Dropping stale page failure: generation {} (latest is {})",
                        generation,
                        self.generation
                    );
                    return None;
                }
                tracing::warn!("Options page fetch failed: {}", error);
                self.loading = false;
                self.last_error = Some(error);
                None
            }
        }
    }

    /// The list the menu renders: current selection first, then fetched
    /// options, one entry per value. Selection entries win on collision,
    /// so a selected value stays visible with its own label even when the
    /// fetched pages carry a copy.
    pub fn display_options(&self) -> Vec<&SelectOption> {
        dedup_by_value(self.selection.as_slice().iter().chain(self.fetched.iter()))
    }

    /// Drain the selection-changed flag, returning the selection snapshot
    /// when a change happened since the last call.
    pub fn take_selection_change(&mut self) -> Option<Selection> {
        if self.selection_changed {
            self.selection_changed = false;
            Some(self.selection.clone())
        } else {
            None
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more_pages(&self) -> bool {
        self.has_more_pages
    }

    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }

    pub fn committed_term(&self) -> Option<&str> {
        self.committed_term.as_deref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selection.contains_value(value)
    }

    pub fn last_error(&self) -> Option<&PagerError> {
        self.last_error.as_ref()
    }

    pub fn fetched_count(&self) -> usize {
        self.fetched.len()
    }

    /// Index the next end-of-list fetch would request
    pub fn next_page_index(&self) -> usize {
        self.fetched.len() / self.config.page_size
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    fn begin_page_zero(&mut self) -> PageRequest {
        self.has_more_pages = true;
        self.issue_request(0)
    }

    fn issue_request(&mut self, page_index: usize) -> PageRequest {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.last_error = None;
        let request = PageRequest {
            generation: self.generation,
            term: self.committed_term.clone(),
            page_index,
            page_size: self.config.page_size,
        };
        tracing::debug!(
            "Requesting options page {} (generation {}, term {:?})",
            request.page_index,
            request.generation,
            request.term
        );
        request
    }

    fn merge_page(&mut self, page_index: usize, options: Vec<SelectOption>) {
        let page_len = options.len();
        if page_index == 0 {
            self.fetched = options;
        } else {
            self.fetched.extend(options);
        }
        // A short or empty page is the final one; an exact multiple leaves
        // the door open for another fetch.
        self.has_more_pages = page_len > 0 && page_len % self.config.page_size == 0;
        self.loading = false;
        self.last_error = None;
    }

    fn toggle_value(&mut self, value: &str) {
        let Some(option) = self
            .display_options()
            .into_iter()
            .find(|option| option.value == value)
            .cloned()
        else {
            tracing::debug!("Ignoring toggle for unknown value {:?}", value);
            return;
        };
        self.selection.toggle(option);
        self.selection_changed = true;
        if !self.config.multiple {
            self.close_menu();
        }
    }

    fn close_menu(&mut self) {
        self.open = false;
        self.raw_text = None;
        self.committed_term = None;
        self.debouncer.cancel();
        if self.loading {
            // Invalidate the in-flight fetch so its reply cannot merge
            // into a menu the user already dismissed.
            self.generation = self.generation.wrapping_add(1);
            self.loading = false;
        }
    }
}

/// Keep the first occurrence of every value, preserving order.
pub fn dedup_by_value<'a>(
    options: impl IntoIterator<Item = &'a SelectOption>,
) -> Vec<&'a SelectOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();
    for option in options {
        if seen.insert(option.value.as_str()) {
            unique.push(option);
        }
    }
    unique
}
