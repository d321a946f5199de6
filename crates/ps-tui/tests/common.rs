// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared helpers for the UI integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossbeam_channel::Receiver;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ps_core::{OptionsPager, PageRequest, PagerError, SelectConfig, SelectMsg, StaticOptionsPager};
use ps_domain_types::SelectOption;
use ps_tui::view_model::{Msg, SelectStyle, SelectViewModel};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// The demo roster: twenty numbered passengers plus Duro and Marta.
pub fn passenger_roster() -> Vec<SelectOption> {
    let mut roster: Vec<SelectOption> = (1..=20)
        .map(|n| SelectOption::new(n.to_string(), format!("Passenger {:02}", n)))
        .collect();
    roster.push(SelectOption::new("duro1", "Duro"));
    roster.push(SelectOption::new("marta1", "Marta"));
    roster
}

/// View model over the passenger roster with an immediate debounce, so
/// a single tick commits whatever was typed.
pub fn roster_model(
    page_size: usize,
    multiple: bool,
    latency: Duration,
) -> (SelectViewModel, Receiver<SelectMsg>) {
    let pager = Arc::new(StaticOptionsPager::new(passenger_roster()).with_latency(latency));
    model_over(pager, page_size, multiple)
}

pub fn model_over(
    pager: Arc<dyn OptionsPager>,
    page_size: usize,
    multiple: bool,
) -> (SelectViewModel, Receiver<SelectMsg>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let config = SelectConfig {
        multiple,
        page_size,
        debounce: Duration::ZERO,
    };
    let style = SelectStyle {
        label: "Passenger".to_string(),
        placeholder: "Select a Passenger".to_string(),
        ..SelectStyle::default()
    };
    let model = SelectViewModel::new(config, style, pager, tx);
    (model, rx)
}

/// Wait for the next fetcher reply and feed it into the model.
pub fn deliver_next(model: &mut SelectViewModel, rx: &Receiver<SelectMsg>) {
    let reply = rx
        .recv_timeout(RECV_TIMEOUT)
        .expect("fetcher reply should arrive");
    model.update(Msg::Pager(reply));
}

pub fn key(code: KeyCode) -> Msg {
    Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Flatten the rendered buffer into newline-separated rows.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// Pager whose every page fails, for error-path rendering.
pub struct FailingPager;

#[async_trait]
impl OptionsPager for FailingPager {
    async fn page(&self, _request: &PageRequest) -> Result<Vec<SelectOption>, PagerError> {
        Err(PagerError::backend("roster service unavailable"))
    }

    fn description(&self) -> &str {
        "always-failing roster"
    }
}
