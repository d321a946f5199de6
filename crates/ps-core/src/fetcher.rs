// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Async page fetch driver
//!
//! Executes the [`PageRequest`] commands the controller returns: each
//! dispatch spawns the pager call on the current Tokio runtime and sends
//! the reply back through the UI message channel as
//! `PageLoaded`/`PageFailed`, tagged with the request's generation. The
//! controller decides on arrival whether the generation is still current.

use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::controller::SelectMsg;
use crate::pager::{OptionsPager, PageRequest};

pub struct PageFetcher {
    pager: Arc<dyn OptionsPager>,
    ui_tx: Sender<SelectMsg>,
}

impl PageFetcher {
    pub fn new(pager: Arc<dyn OptionsPager>, ui_tx: Sender<SelectMsg>) -> Self {
        Self { pager, ui_tx }
    }

    pub fn pager_description(&self) -> &str {
        self.pager.description()
    }

    /// Spawn the fetch for one request. The reply arrives on the UI
    /// channel; a dropped receiver is ignored (the loop is shutting down).
    pub fn dispatch(&self, request: PageRequest) {
        let handle = tokio::runtime::Handle::try_current().expect(
            "Options page fetches require an active Tokio runtime; \
             ensure controller updates run inside a Tokio executor",
        );
        let pager = Arc::clone(&self.pager);
        let tx = self.ui_tx.clone();
        handle.spawn(async move {
            tracing::debug!(
                "Fetching page {} from {} (generation {})",
                request.page_index,
                pager.description(),
                request.generation
            );
            let msg = match pager.page(&request).await {
                Ok(options) => SelectMsg::PageLoaded {
                    generation: request.generation,
                    page_index: request.page_index,
                    options,
                },
                Err(error) => SelectMsg::PageFailed {
                    generation: request.generation,
                    error,
                },
            };
            let _ = tx.send(msg);
        });
    }
}
