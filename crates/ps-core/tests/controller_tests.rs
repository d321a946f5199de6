// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Scenario tests for the select controller state machine

mod common;

use std::time::Instant;

use common::{commit_text, multi_controller, page_from, passenger_roster, values};
use ps_core::{
    PagerError, SelectConfig, SelectController, SelectMsg, StaticOptionsPager,
};
use ps_domain_types::{InvalidOption, SelectOption};

#[test]
fn open_fetches_page_zero_unfiltered() {
    let mut controller = multi_controller(15);

    let request = controller.update(SelectMsg::Opened).expect("open must fetch page 0");
    assert_eq!(request.page_index, 0);
    assert_eq!(request.page_size, 15);
    assert_eq!(request.term, None, "no committed term means an unfiltered fetch");
    assert!(controller.is_open());
    assert!(controller.is_loading());
    assert!(controller.has_more_pages());

    // Opening an already-open menu fetches nothing
    assert!(controller.update(SelectMsg::Opened).is_none());
}

#[test]
fn scrolling_pages_through_the_whole_roster() {
    let pager = StaticOptionsPager::new(passenger_roster());
    let mut controller = multi_controller(15);

    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    let page0 = page_from(&pager, &request);
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: request.page_index,
        options: page0,
    });
    assert_eq!(controller.fetched_count(), 15);
    assert!(!controller.is_loading());
    assert!(
        controller.has_more_pages(),
        "a full page leaves pagination open (15 % 15 == 0)"
    );

    let request = controller.update(SelectMsg::ScrolledToEnd).expect("page 1 request");
    assert_eq!(request.page_index, 1, "next page index is fetched / page_size");
    let page1 = page_from(&pager, &request);
    assert_eq!(page1.len(), 7);
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: request.page_index,
        options: page1,
    });
    assert_eq!(controller.fetched_count(), 22, "page 1 appends items 16..=22");
    assert!(
        !controller.has_more_pages(),
        "a short page (7 < 15) ends pagination"
    );

    assert!(
        controller.update(SelectMsg::ScrolledToEnd).is_none(),
        "further scrolls fetch nothing"
    );
}

#[test]
fn rapid_edits_commit_once_with_the_last_value() {
    let mut controller = multi_controller(15);
    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: Vec::new(),
    });

    for text in ["d", "du", "dur", "duro"] {
        controller.update(SelectMsg::TextEdited(text.to_string()));
    }
    assert_eq!(controller.raw_text(), Some("duro"), "raw text updates immediately");
    assert_eq!(controller.committed_term(), None, "nothing commits inside the window");
    assert!(
        controller.update(SelectMsg::Tick(Instant::now())).is_none(),
        "the quiet period has not elapsed yet"
    );

    let past_deadline = Instant::now() + controller.config().debounce * 2;
    let request = controller
        .update(SelectMsg::Tick(past_deadline))
        .expect("the commit triggers a fresh page-0 fetch");
    assert_eq!(request.term.as_deref(), Some("duro"));
    assert_eq!(request.page_index, 0);
    assert_eq!(controller.committed_term(), Some("duro"));
    assert!(controller.has_more_pages(), "a new term resets the pagination heuristic");

    assert!(
        controller.update(SelectMsg::Tick(past_deadline)).is_none(),
        "a commit drains the debouncer"
    );
}

#[test]
fn recommitting_the_same_term_fetches_nothing() {
    let mut controller = multi_controller(15);
    controller.update(SelectMsg::Opened);
    let request = commit_text(&mut controller, "marta").expect("first commit fetches");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: vec![SelectOption::new("marta1", "Marta")],
    });

    assert!(
        commit_text(&mut controller, "marta").is_none(),
        "an identical committed term is a no-op"
    );
}

#[test]
fn committing_an_empty_term_still_fetches() {
    let mut controller = multi_controller(15);
    controller.update(SelectMsg::Opened);
    let request = commit_text(&mut controller, "x").expect("term commit");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: Vec::new(),
    });

    // Clearing the field back to "" is a different term from "x"
    let request = commit_text(&mut controller, "").expect("empty term is still a term");
    assert_eq!(request.term.as_deref(), Some(""));
}

#[test]
fn a_new_term_supersedes_the_inflight_page() {
    let pager = StaticOptionsPager::new(passenger_roster());
    let mut controller = multi_controller(15);

    let stale = controller.update(SelectMsg::Opened).expect("page 0 request");
    // Before the unfiltered page 0 arrives, the user finishes typing
    let fresh = commit_text(&mut controller, "duro").expect("term commit supersedes");
    assert_ne!(stale.generation, fresh.generation);

    // The slow unfiltered reply lands first and must be dropped
    controller.update(SelectMsg::PageLoaded {
        generation: stale.generation,
        page_index: 0,
        options: page_from(&pager, &stale),
    });
    assert_eq!(controller.fetched_count(), 0, "stale replies never merge");
    assert!(controller.is_loading(), "the fresh fetch is still outstanding");

    controller.update(SelectMsg::PageLoaded {
        generation: fresh.generation,
        page_index: 0,
        options: page_from(&pager, &fresh),
    });
    assert_eq!(controller.fetched_count(), 1);
    assert_eq!(values(&controller.display_options()), vec!["duro1"]);
    assert!(!controller.is_loading());
    assert!(!controller.has_more_pages());
}

#[test]
fn closing_discards_the_inflight_reply_and_clears_text() {
    let pager = StaticOptionsPager::new(passenger_roster());
    let mut controller = multi_controller(15);

    controller.update(SelectMsg::TextEdited("mar".to_string()));
    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::Closed);

    assert_eq!(controller.raw_text(), None, "close clears the raw text");
    assert_eq!(controller.committed_term(), None, "close clears the committed term");
    assert!(!controller.is_open());
    assert!(!controller.is_loading());

    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: page_from(&pager, &request),
    });
    assert_eq!(
        controller.fetched_count(),
        0,
        "a reply from before the close must not merge"
    );

    // The debounced "mar" must not commit after the close either
    let past_deadline = Instant::now() + controller.config().debounce * 2;
    assert!(controller.update(SelectMsg::Tick(past_deadline)).is_none());
    assert_eq!(controller.committed_term(), None);

    // Reopening starts over, unfiltered
    let request = controller.update(SelectMsg::Opened).expect("reopen fetches page 0");
    assert_eq!(request.term, None);
    assert_eq!(request.page_index, 0);
}

#[test]
fn failed_fetch_clears_loading_and_keeps_items() {
    let pager = StaticOptionsPager::new(passenger_roster());
    let mut controller = multi_controller(15);

    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: page_from(&pager, &request),
    });

    let request = controller.update(SelectMsg::ScrolledToEnd).expect("page 1 request");
    controller.update(SelectMsg::PageFailed {
        generation: request.generation,
        error: PagerError::backend("roster service unavailable"),
    });

    assert!(!controller.is_loading(), "a failure must clear the loading flag");
    assert_eq!(controller.fetched_count(), 15, "already-fetched items survive");
    assert!(controller.has_more_pages(), "the heuristic is untouched by failures");
    let error = controller.last_error().expect("the failure is surfaced");
    assert!(error.to_string().contains("roster service unavailable"));

    // The user can retry by scrolling again; the retry clears the error
    let request = controller.update(SelectMsg::ScrolledToEnd).expect("retry request");
    assert_eq!(request.page_index, 1);
    assert!(controller.last_error().is_none());
}

#[test]
fn malformed_pages_are_rejected_with_a_descriptive_error() {
    let mut controller = multi_controller(15);
    let request = controller.update(SelectMsg::Opened).expect("page 0 request");

    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: vec![
            SelectOption::new("1", "Passenger 01"),
            SelectOption::new("", "Nameless"),
        ],
    });

    assert!(!controller.is_loading());
    assert_eq!(controller.fetched_count(), 0, "a malformed page never merges");
    match controller.last_error() {
        Some(PagerError::Invalid(InvalidOption::EmptyValue { position, label })) => {
            assert_eq!(*position, 1);
            assert_eq!(label, "Nameless");
        }
        other => panic!("expected an EmptyValue rejection, got {:?}", other),
    }
}

#[test]
fn selection_stays_visible_and_deduplicated_across_pages() {
    let pager = StaticOptionsPager::new(passenger_roster());
    let mut controller = multi_controller(15).with_initial_selection(vec![
        SelectOption::new("duro1", "Duro"),
        SelectOption::new("marta1", "Marta"),
    ]);

    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: page_from(&pager, &request),
    });

    // Page 0 holds passengers 1..=15; the selected pair renders anyway
    let display = controller.display_options();
    assert_eq!(display.len(), 17);
    assert_eq!(display[0].value, "duro1", "selection renders first");
    assert_eq!(display[1].value, "marta1");
    assert!(controller.is_selected("duro1"));

    // Page 1 brings the fetched copies of Duro and Marta in
    let request = controller.update(SelectMsg::ScrolledToEnd).expect("page 1 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: request.page_index,
        options: page_from(&pager, &request),
    });

    let display = controller.display_options();
    assert_eq!(display.len(), 22, "fetched copies collapse into the selected entries");
    let duro_entries = display.iter().filter(|o| o.value == "duro1").count();
    assert_eq!(duro_entries, 1, "no duplicate rows for a selected value");

    // Deselecting works through the merged list, and the fetched copy remains
    controller.update(SelectMsg::Toggled("duro1".to_string()));
    let selection = controller.take_selection_change().expect("toggle reports a change");
    assert!(!selection.contains_value("duro1"));
    assert!(selection.contains_value("marta1"));
    let display = controller.display_options();
    assert_eq!(display.len(), 22, "the fetched Duro row still renders");
    assert!(display.iter().any(|o| o.value == "duro1"));
    assert!(controller.is_open(), "multi-select keeps the menu open on toggle");
}

#[test]
fn selection_only_entries_stay_toggleable() {
    let mut controller = multi_controller(15)
        .with_initial_selection(vec![SelectOption::new("duro1", "Duro")]);
    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: vec![SelectOption::new("1", "Passenger 01")],
    });

    // "duro1" exists only in the selection, not in any fetched page
    controller.update(SelectMsg::Toggled("duro1".to_string()));
    let selection = controller.take_selection_change().expect("selection changed");
    assert!(selection.is_empty());
    assert!(
        !controller.display_options().iter().any(|o| o.value == "duro1"),
        "deselecting a selection-only entry removes it from the display list"
    );
}

#[test]
fn single_select_choice_replaces_and_closes() {
    let mut controller = SelectController::new(SelectConfig {
        multiple: false,
        page_size: 15,
        ..Default::default()
    });

    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: vec![
            SelectOption::new("1", "Passenger 01"),
            SelectOption::new("2", "Passenger 02"),
        ],
    });

    controller.update(SelectMsg::Toggled("2".to_string()));
    assert!(!controller.is_open(), "single-select closes on choice");
    assert_eq!(controller.raw_text(), None, "close semantics clear the text");
    let selection = controller.take_selection_change().expect("selection changed");
    assert!(selection.contains_value("2"));
    assert_eq!(selection.as_slice().len(), 1);
}

#[test]
fn an_empty_page_ends_pagination() {
    let mut controller = multi_controller(15);
    let request = controller.update(SelectMsg::Opened).expect("page 0 request");
    controller.update(SelectMsg::PageLoaded {
        generation: request.generation,
        page_index: 0,
        options: Vec::new(),
    });

    assert!(!controller.has_more_pages(), "an empty page is a final page");
    assert!(controller.update(SelectMsg::ScrolledToEnd).is_none());
}

#[test]
fn end_of_list_fetch_needs_an_open_idle_menu() {
    let mut controller = multi_controller(15);
    assert!(
        controller.update(SelectMsg::ScrolledToEnd).is_none(),
        "a closed menu never fetches"
    );

    controller.update(SelectMsg::Opened);
    assert!(
        controller.update(SelectMsg::ScrolledToEnd).is_none(),
        "no concurrent fetches while page 0 is in flight"
    );
}
