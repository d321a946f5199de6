// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! View model for the paginated select widget.
//!
//! [`SelectViewModel`] wraps the [`SelectController`] state machine with
//! everything the terminal adds on top: the editable search field, the
//! highlighted menu row, menu windowing, and the fetcher that executes
//! page requests. Input events arrive as [`Msg`] values; the event loop
//! redraws whenever [`SelectViewModel::needs_redraw`] is set.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ps_core::{OptionsPager, PageFetcher, SelectConfig, SelectController, SelectMsg};
use ps_domain_types::{SelectOption, Selection};
use tui_textarea::TextArea;

use crate::settings::MenuSize;

/// Presentation options for the select widget.
#[derive(Debug, Clone)]
pub struct SelectStyle {
    /// Title shown on the field border.
    pub label: String,
    /// Placeholder shown while the field is empty.
    pub placeholder: String,
    /// Draw a full border around the field instead of a bottom rule.
    pub outlined: bool,
    pub size: MenuSize,
    /// Menu row shown when the list is empty and nothing is in flight.
    pub no_options_text: String,
    /// Menu row shown while a page is in flight.
    pub loading_options_text: String,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            label: "Select".to_string(),
            placeholder: String::new(),
            outlined: true,
            size: MenuSize::default(),
            no_options_text: "No options".to_string(),
            loading_options_text: "Loading...".to_string(),
        }
    }
}

/// Action attached to a clickable screen region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MouseAction {
    /// Toggle the dropdown menu open or closed.
    ToggleMenu,
    /// Toggle the option at this display-list index.
    ToggleOption(usize),
}

/// Input events consumed by [`SelectViewModel::update`].
#[derive(Debug, Clone)]
pub enum Msg {
    Key(KeyEvent),
    MouseClick {
        action: MouseAction,
        column: u16,
        row: u16,
    },
    MouseScrollUp,
    MouseScrollDown,
    /// Reply delivered by the page fetcher.
    Pager(SelectMsg),
    Tick,
    Quit,
}

pub struct SelectViewModel {
    controller: SelectController,
    fetcher: PageFetcher,
    pub style: SelectStyle,
    /// Loading signal from the host application, merged into the
    /// spinner alongside the controller's own in-flight state.
    pub external_loading: bool,
    pub needs_redraw: bool,
    input: TextArea<'static>,
    highlighted: usize,
    window_offset: usize,
    started: Instant,
    exit_requested: bool,
}

impl SelectViewModel {
    pub fn new(
        config: SelectConfig,
        style: SelectStyle,
        pager: Arc<dyn OptionsPager>,
        ui_tx: Sender<SelectMsg>,
    ) -> Self {
        let fetcher = PageFetcher::new(pager, ui_tx);
        let mut input = TextArea::default();
        input.set_cursor_line_style(ratatui::style::Style::default());
        input.set_placeholder_text(style.placeholder.clone());
        Self {
            controller: SelectController::new(config),
            fetcher,
            style,
            external_loading: false,
            needs_redraw: true,
            input,
            highlighted: 0,
            window_offset: 0,
            started: Instant::now(),
            exit_requested: false,
        }
    }

    /// Seed the selection before the first frame.
    pub fn with_initial_selection(mut self, options: Vec<SelectOption>) -> Self {
        self.controller = self.controller.with_initial_selection(options);
        self
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::MouseClick {
                action,
                column,
                row,
            } => {
                tracing::debug!("Mouse click at ({}, {}): {:?}", column, row, action);
                self.handle_mouse_action(action);
            }
            Msg::MouseScrollUp => {
                if self.controller.is_open() {
                    self.highlight_up(1);
                }
            }
            Msg::MouseScrollDown => {
                if self.controller.is_open() {
                    self.highlight_down(1);
                }
            }
            Msg::Pager(event) => {
                self.drive(event);
                self.clamp_highlight();
                self.needs_redraw = true;
            }
            Msg::Tick => {
                self.drive(SelectMsg::Tick(Instant::now()));
                if self.is_loading() {
                    // Keep the spinner animating while a page is in flight.
                    self.needs_redraw = true;
                }
            }
            Msg::Quit => {
                self.exit_requested = true;
                self.needs_redraw = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.exit_requested = true;
            self.needs_redraw = true;
            return;
        }
        let page_step = self.style.size.max_rows() as usize;
        match key.code {
            KeyCode::Esc => {
                if self.controller.is_open() {
                    self.close_menu();
                } else {
                    self.exit_requested = true;
                    self.needs_redraw = true;
                }
            }
            KeyCode::Enter => {
                if self.controller.is_open() {
                    self.toggle_highlighted();
                } else {
                    self.open_menu();
                }
            }
            // Space toggles only while the filter is empty; otherwise it
            // types into the search text like any other character.
            KeyCode::Char(' ')
                if self.controller.is_open() && self.search_text_is_empty()
                    && key.modifiers.is_empty() =>
            {
                self.toggle_highlighted();
            }
            KeyCode::Up => {
                if self.controller.is_open() {
                    self.highlight_up(1);
                } else {
                    self.open_menu();
                }
            }
            KeyCode::Down => {
                if self.controller.is_open() {
                    self.highlight_down(1);
                } else {
                    self.open_menu();
                }
            }
            KeyCode::PageUp if self.controller.is_open() => self.highlight_up(page_step),
            KeyCode::PageDown if self.controller.is_open() => self.highlight_down(page_step),
            KeyCode::Home if self.controller.is_open() => {
                self.highlighted = 0;
                self.needs_redraw = true;
            }
            KeyCode::End if self.controller.is_open() => {
                let len = self.display_len();
                if len > 0 {
                    self.highlighted = len - 1;
                    self.drive(SelectMsg::ScrolledToEnd);
                }
                self.needs_redraw = true;
            }
            _ => self.feed_search_input(key),
        }
    }

    /// Pass a key to the search field; edits open the menu and restart
    /// the debounce window.
    fn feed_search_input(&mut self, key: KeyEvent) {
        if !self.input.input(key) {
            return;
        }
        if !self.controller.is_open() {
            self.drive(SelectMsg::Opened);
        }
        let text = self.input.lines()[0].clone();
        self.drive(SelectMsg::TextEdited(text));
        self.needs_redraw = true;
    }

    fn handle_mouse_action(&mut self, action: MouseAction) {
        match action {
            MouseAction::ToggleMenu => {
                if self.controller.is_open() {
                    self.close_menu();
                } else {
                    self.open_menu();
                }
            }
            MouseAction::ToggleOption(index) => {
                if index < self.display_len() {
                    self.highlighted = index;
                    self.toggle_highlighted();
                }
            }
        }
    }

    fn open_menu(&mut self) {
        self.highlighted = 0;
        self.window_offset = 0;
        self.drive(SelectMsg::Opened);
        self.needs_redraw = true;
    }

    fn close_menu(&mut self) {
        self.drive(SelectMsg::Closed);
        self.reset_search_field();
        self.highlighted = 0;
        self.window_offset = 0;
        self.needs_redraw = true;
    }

    fn toggle_highlighted(&mut self) {
        let value = {
            let display = self.controller.display_options();
            match display.get(self.highlighted) {
                Some(option) => option.value.clone(),
                None => return,
            }
        };
        self.drive(SelectMsg::Toggled(value));
        if !self.controller.is_open() {
            // Single select closes on pick; mirror the cleared search text.
            self.reset_search_field();
            self.highlighted = 0;
            self.window_offset = 0;
        }
        self.needs_redraw = true;
    }

    fn highlight_up(&mut self, step: usize) {
        self.highlighted = self.highlighted.saturating_sub(step);
        self.needs_redraw = true;
    }

    fn highlight_down(&mut self, step: usize) {
        let len = self.display_len();
        if len == 0 {
            return;
        }
        let last = len - 1;
        self.highlighted = (self.highlighted + step).min(last);
        if self.highlighted == last {
            // Reaching the bottom asks for the next page; the controller
            // ignores it while loading or after the list is exhausted.
            self.drive(SelectMsg::ScrolledToEnd);
        }
        self.needs_redraw = true;
    }

    fn drive(&mut self, event: SelectMsg) {
        if let Some(request) = self.controller.update(event) {
            self.fetcher.dispatch(request);
            self.needs_redraw = true;
        }
    }

    fn clamp_highlight(&mut self) {
        let len = self.display_len();
        if len == 0 {
            self.highlighted = 0;
            self.window_offset = 0;
        } else if self.highlighted >= len {
            self.highlighted = len - 1;
        }
    }

    fn reset_search_field(&mut self) {
        self.input.select_all();
        self.input.cut();
    }

    fn search_text_is_empty(&self) -> bool {
        self.input.lines()[0].is_empty()
    }

    /// Slide the menu window so the highlighted row stays visible within
    /// `visible_rows`. Called by the view with the row count that fits.
    pub fn ensure_highlight_visible(&mut self, visible_rows: usize) {
        if visible_rows == 0 {
            return;
        }
        if self.highlighted < self.window_offset {
            self.window_offset = self.highlighted;
        } else if self.highlighted >= self.window_offset + visible_rows {
            self.window_offset = self.highlighted + 1 - visible_rows;
        }
        let len = self.display_len();
        if self.window_offset + visible_rows > len {
            self.window_offset = len.saturating_sub(visible_rows);
        }
    }

    pub fn controller(&self) -> &SelectController {
        &self.controller
    }

    pub fn input(&self) -> &TextArea<'static> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.input
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn window_offset(&self) -> usize {
        self.window_offset
    }

    pub fn display_len(&self) -> usize {
        self.controller.display_options().len()
    }

    /// Spinner state: true while any page is in flight or the host
    /// reports its own loading.
    pub fn is_loading(&self) -> bool {
        self.external_loading || self.controller.is_loading()
    }

    /// Elapsed time since the widget was created, used to pick the
    /// spinner frame.
    pub fn spinner_elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn pager_description(&self) -> &str {
        self.fetcher.pager_description()
    }

    /// Drain the exit request raised by Esc on a closed menu or Ctrl-C.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    /// Drain the latest selection change, if any.
    pub fn take_selection_change(&mut self) -> Option<Selection> {
        self.controller.take_selection_change()
    }
}
