// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Select Loop - Main event loop and rendering
//!
//! This module owns the terminal for the lifetime of the widget. It
//! multiplexes three sources over a biased select: input events from a
//! reader thread, page replies from the fetcher channel, and a 16ms
//! tick that drives the debounce clock and the spinner. Input is
//! preferred over page replies, and both over ticks.

use crossbeam_channel as chan;
use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};
use tracing::debug;

use crate::{
    settings::Settings,
    terminal::{self, TerminalConfig},
    theme::Theme,
    view::{self, HitTestRegistry},
    view_model::{MouseAction, Msg, SelectViewModel},
};
use ps_core::SelectMsg;
use ps_domain_types::Selection;

/// Run the select widget until the user quits; returns the selection
/// they ended up with.
///
/// `rx_page` must be the receiving side of the channel the view model's
/// fetcher sends its replies on.
pub async fn run_select(
    mut model: SelectViewModel,
    rx_page: chan::Receiver<SelectMsg>,
    settings: &Settings,
    theme: &Theme,
) -> Result<Selection, Box<dyn std::error::Error>> {
    // Install signal handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));

    terminal::setup_terminal(
        TerminalConfig::default()
            .with_running_flag(running.clone())
            .with_mouse_capture(settings.mouse),
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let mut hit_registry: HitTestRegistry<MouseAction> = HitTestRegistry::new();

    debug!(
        "Select loop started against pager: {}",
        model.pager_description()
    );

    // Create channels for event handling
    let (tx_ev, rx_ev) = chan::unbounded::<Event>();

    // Use coalescing tick channel that never builds a backlog
    let rx_tick = chan::tick(Duration::from_millis(16));

    // Event reader thread
    thread::spawn(move || {
        while let Ok(ev) = crossterm::event::read() {
            // Send event to main thread
            let _ = tx_ev.send(ev);
        }
    });

    // Main event loop
    loop {
        // Check if we should exit due to interrupt signal
        if !running.load(Ordering::SeqCst) {
            break;
        }

        // Use biased select to prefer input events over page replies and ticks
        chan::select_biased! {
            recv(rx_ev) -> msg => {
                let event = match msg {
                    Ok(e) => e,
                    Err(_) => break,
                };

                match event {
                    Event::Key(key) => {
                        debug!(
                            key_code = ?key.code,
                            modifiers = ?key.modifiers,
                            key_kind = ?key.kind,
                            "Key event received in select loop"
                        );

                        model.update(Msg::Key(key));
                        if model.take_exit_request() {
                            break;
                        }
                    }
                    Event::Mouse(mouse_event) => {
                        match mouse_event.kind {
                            MouseEventKind::Down(MouseButton::Left) => {
                                if let Some(action) = hit_registry.hit_test(mouse_event.column, mouse_event.row) {
                                    model.update(Msg::MouseClick {
                                        action,
                                        column: mouse_event.column,
                                        row: mouse_event.row,
                                    });
                                }
                            }
                            MouseEventKind::ScrollUp => {
                                model.update(Msg::MouseScrollUp);
                            }
                            MouseEventKind::ScrollDown => {
                                model.update(Msg::MouseScrollDown);
                            }
                            _ => {}
                        }

                        if model.take_exit_request() {
                            break;
                        }
                    }
                    Event::Resize(_width, _height) => {
                        let _ = terminal.autoresize();
                        model.needs_redraw = true; // Force redraw on resize
                    }
                    _ => {}
                }

                if let Some(selection) = model.take_selection_change() {
                    debug!("Selection changed: {} item(s)", selection.len());
                }

                if model.needs_redraw {
                    terminal.draw(|frame| {
                        view::render(frame, &mut model, theme, &mut hit_registry);
                    })?;
                    model.needs_redraw = false;
                }
            }
            recv(rx_page) -> msg => {
                let event = match msg {
                    Ok(e) => e,
                    Err(_) => break,
                };

                model.update(Msg::Pager(event));

                if model.needs_redraw {
                    terminal.draw(|frame| {
                        view::render(frame, &mut model, theme, &mut hit_registry);
                    })?;
                    model.needs_redraw = false;
                }
            }
            recv(rx_tick) -> _ => {
                model.update(Msg::Tick);

                // Only redraw if tick actually changed something
                if model.needs_redraw {
                    terminal.draw(|frame| {
                        view::render(frame, &mut model, theme, &mut hit_registry);
                    })?;
                    model.needs_redraw = false;
                }
            }
        }
    }

    // Ensure cleanup happens
    terminal::cleanup_terminal();

    Ok(model.controller().selection().clone())
}
