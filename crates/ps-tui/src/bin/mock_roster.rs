// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Demo entrypoint: a paginated passenger picker over a mock backend.
//!
//! The roster holds 22 passengers served 15 per page with simulated
//! latency, so pagination, the loading spinner, and debounced search
//! are all visible without a real service. The final selection is
//! printed as JSON on exit.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel as chan;
use ps_core::{SelectConfig, StaticOptionsPager};
use ps_domain_types::SelectOption;
use ps_logging::CliLoggingArgs;
use ps_tui::select_loop::run_select;
use ps_tui::settings::{MenuSize, Settings};
use ps_tui::theme::Theme;
use ps_tui::view_model::{SelectStyle, SelectViewModel};
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "mock_roster", about = "Paginated passenger picker with a mock backend")]
struct Args {
    /// Options returned per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Quiet period before a typed search term commits, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Simulated backend latency per page, in milliseconds
    #[arg(long, default_value_t = 1000)]
    latency_ms: u64,

    /// Pick a single passenger instead of several
    #[arg(long)]
    single: bool,

    /// Draw the search field without a border
    #[arg(long)]
    plain: bool,

    /// Menu height
    #[arg(long, value_enum)]
    size: Option<MenuSize>,

    /// Use the high-contrast palette
    #[arg(long)]
    high_contrast: bool,

    /// Disable mouse capture
    #[arg(long)]
    no_mouse: bool,

    #[command(flatten)]
    logging: CliLoggingArgs,
}

fn passenger_roster() -> Vec<SelectOption> {
    let mut roster: Vec<SelectOption> = (1..=20)
        .map(|n| SelectOption::new(n.to_string(), format!("Passenger {:02}", n)))
        .collect();
    roster.push(SelectOption::new("duro1", "Duro"));
    roster.push(SelectOption::new("marta1", "Marta"));
    roster
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The terminal belongs to the UI, so logs go to a file.
    args.logging.clone().init("mock-roster", true)?;

    // A corrupt user config degrades to defaults; the demo still runs.
    let mut settings = Settings::load().unwrap_or_else(|error| {
        warn!("Ignoring unreadable config file: {}", error);
        Settings::default()
    });
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        settings.debounce_ms = debounce_ms;
    }
    if let Some(size) = args.size {
        settings.menu_size = size;
    }
    if args.high_contrast {
        settings.high_contrast = true;
    }
    if args.no_mouse {
        settings.mouse = false;
    }

    let theme = Theme::from_settings(&settings)?;

    let config = SelectConfig {
        multiple: !args.single,
        page_size: settings.page_size,
        debounce: Duration::from_millis(settings.debounce_ms),
    };
    let style = SelectStyle {
        label: "Passenger".to_string(),
        placeholder: "Select a Passenger".to_string(),
        outlined: !args.plain,
        size: settings.menu_size,
        ..SelectStyle::default()
    };

    let pager = Arc::new(
        StaticOptionsPager::new(passenger_roster())
            .with_latency(Duration::from_millis(args.latency_ms)),
    );

    let (tx_page, rx_page) = chan::unbounded();
    let model = SelectViewModel::new(config, style, pager, tx_page).with_initial_selection(vec![
        SelectOption::new("duro1", "Duro"),
        SelectOption::new("marta1", "Marta"),
    ]);

    let selection = run_select(model, rx_page, &settings, &theme)
        .await
        .map_err(|error| anyhow!("select loop failed: {}", error))?;

    println!("{}", serde_json::to_string(&selection)?);
    Ok(())
}
