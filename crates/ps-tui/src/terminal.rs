// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal setup and cleanup for the select UI.
//!
//! Raw mode, alternate screen, mouse capture, and signal handlers are
//! tracked in process-wide flags so cleanup can run exactly once from
//! whichever path reaches it first: normal exit, Ctrl-C, or a panic.

use crossterm::{
    ExecutableCommand,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io,
    panic,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

// Global flag to ensure cleanup only happens once
static CLEANUP_DONE: AtomicBool = AtomicBool::new(false);

// Track what we modified so we can restore properly
static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALTERNATE_SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);
static MOUSE_CAPTURE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Terminal setup configuration
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Enable raw mode
    pub raw_mode: bool,
    /// Enter alternate screen
    pub alternate_screen: bool,
    /// Enable mouse capture
    pub mouse_capture: bool,
    /// Install signal handlers for graceful shutdown
    pub install_signal_handlers: bool,
    /// Running flag cleared by the Ctrl-C handler
    pub running_flag: Option<Arc<AtomicBool>>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            raw_mode: true,
            alternate_screen: true,
            mouse_capture: true,
            install_signal_handlers: true,
            running_flag: None,
        }
    }
}

impl TerminalConfig {
    /// Set the running flag for signal handlers
    pub fn with_running_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.running_flag = Some(flag);
        self
    }

    /// Enable or disable mouse capture
    pub fn with_mouse_capture(mut self, mouse_capture: bool) -> Self {
        self.mouse_capture = mouse_capture;
        self
    }
}

/// Setup terminal for the select UI with the specified configuration
pub fn setup_terminal(config: TerminalConfig) -> io::Result<()> {
    let mut stdout = io::stdout();

    if config.raw_mode {
        crossterm::terminal::enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);
    }

    if config.alternate_screen {
        stdout.execute(EnterAlternateScreen)?;
        ALTERNATE_SCREEN_ACTIVE.store(true, Ordering::SeqCst);
    }

    if config.mouse_capture {
        stdout.execute(EnableMouseCapture)?;
        MOUSE_CAPTURE_ENABLED.store(true, Ordering::SeqCst);
    }

    if config.install_signal_handlers {
        if let Some(running_flag) = &config.running_flag {
            let r = running_flag.clone();
            ctrlc::set_handler(move || {
                cleanup_terminal();
                r.store(false, Ordering::SeqCst);
            })
            .expect("Error setting Ctrl-C handler");
        } else {
            ctrlc::set_handler(|| {
                cleanup_terminal();
            })
            .expect("Error setting Ctrl-C handler");
        }

        // Install panic hook for cleanup on panic
        let default_panic = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            cleanup_terminal();
            default_panic(panic_info);
        }));
    }

    Ok(())
}

/// Cleanup terminal after the select UI
pub fn cleanup_terminal() {
    if CLEANUP_DONE.swap(true, Ordering::SeqCst) {
        return; // Already cleaned up
    }

    let mut stdout = io::stdout();

    if MOUSE_CAPTURE_ENABLED.load(Ordering::SeqCst) {
        let _ = stdout.execute(DisableMouseCapture);
        MOUSE_CAPTURE_ENABLED.store(false, Ordering::SeqCst);
    }

    // Disable raw mode next
    if RAW_MODE_ENABLED.load(Ordering::SeqCst) {
        let _ = crossterm::terminal::disable_raw_mode();
        RAW_MODE_ENABLED.store(false, Ordering::SeqCst);
    }

    // Leave alternate screen last
    if ALTERNATE_SCREEN_ACTIVE.load(Ordering::SeqCst) {
        let _ = stdout.execute(LeaveAlternateScreen);
        ALTERNATE_SCREEN_ACTIVE.store(false, Ordering::SeqCst);
    }
}
