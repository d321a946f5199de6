// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared test utilities for controller and fetcher tests

use std::time::Instant;

use ps_core::{
    OptionsPager, PageRequest, PagerError, SelectConfig, SelectController, SelectMsg,
    StaticOptionsPager,
};
use ps_domain_types::SelectOption;

/// The demo roster: twenty generic passengers on page 0, plus Duro and
/// Marta who only appear on page 1 with a page size of 15.
pub fn passenger_roster() -> Vec<SelectOption> {
    let mut roster: Vec<SelectOption> = (1..=20)
        .map(|n| SelectOption::new(n.to_string(), format!("Passenger {:02}", n)))
        .collect();
    roster.push(SelectOption::new("duro1", "Duro"));
    roster.push(SelectOption::new("marta1", "Marta"));
    roster
}

/// Resolve a request against a pager on the spot
pub fn page_from(pager: &StaticOptionsPager, request: &PageRequest) -> Vec<SelectOption> {
    tokio_test::block_on(pager.page(request)).expect("static pager never fails")
}

pub fn multi_controller(page_size: usize) -> SelectController {
    SelectController::new(SelectConfig {
        multiple: true,
        page_size,
        ..Default::default()
    })
}

/// Type a final text and advance past the quiet period, returning the
/// page request the commit triggered (if any).
pub fn commit_text(controller: &mut SelectController, text: &str) -> Option<PageRequest> {
    controller.update(SelectMsg::TextEdited(text.to_string()));
    let past_deadline = Instant::now() + controller.config().debounce * 2;
    controller.update(SelectMsg::Tick(past_deadline))
}

pub fn values(options: &[&SelectOption]) -> Vec<String> {
    options.iter().map(|option| option.value.clone()).collect()
}

/// Page source that always fails, for error-path tests
pub struct FailingPager {
    pub message: String,
}

impl FailingPager {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl OptionsPager for FailingPager {
    async fn page(&self, _request: &PageRequest) -> Result<Vec<SelectOption>, PagerError> {
        Err(PagerError::backend(self.message.clone()))
    }

    fn description(&self) -> &str {
        "always-failing page source"
    }
}
