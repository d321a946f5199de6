// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Runtime settings for the select UI.
//!
//! Settings resolve in layers: built-in defaults, then the user's
//! config file, then command-line flags applied by the binary. The
//! config file lives at the platform config dir under
//! `pageselect/config.toml` and uses kebab-case keys.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use ps_core::{DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How many rows the dropdown menu may occupy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MenuSize {
    Compact,
    #[default]
    Normal,
    Comfortable,
}

impl MenuSize {
    /// Upper bound on menu rows; the view shrinks further when the
    /// terminal is short.
    pub fn max_rows(self) -> u16 {
        match self {
            MenuSize::Compact => 6,
            MenuSize::Normal => 10,
            MenuSize::Comfortable => 14,
        }
    }
}

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved settings the UI runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Quiet period before an edited search term is committed.
    pub debounce_ms: u64,
    /// Options requested per page.
    pub page_size: usize,
    /// Whether mouse capture is enabled.
    pub mouse: bool,
    /// Use the high-contrast palette as the theme base.
    pub high_contrast: bool,
    pub menu_size: MenuSize,
    /// Optional theme override file applied on top of the base palette.
    pub theme_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            page_size: DEFAULT_PAGE_SIZE,
            mouse: true,
            high_contrast: false,
            menu_size: MenuSize::default(),
            theme_file: None,
        }
    }
}

/// Partial settings read from the config file; unspecified keys keep
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageselectConfig {
    pub debounce_ms: Option<u64>,
    pub page_size: Option<usize>,
    pub mouse: Option<bool>,
    pub high_contrast: Option<bool>,
    pub menu_size: Option<MenuSize>,
    pub theme: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default config location, falling back to
    /// the built-in defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.exists() => Self::from_config_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit config file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = read_config(path.as_ref())?;
        let mut settings = Self::default();
        settings.apply(config);
        Ok(settings)
    }

    /// Apply a parsed config on top of these settings.
    pub fn apply(&mut self, config: PageselectConfig) {
        if let Some(debounce_ms) = config.debounce_ms {
            self.debounce_ms = debounce_ms;
        }
        if let Some(page_size) = config.page_size {
            self.page_size = page_size;
        }
        if let Some(mouse) = config.mouse {
            self.mouse = mouse;
        }
        if let Some(high_contrast) = config.high_contrast {
            self.high_contrast = high_contrast;
        }
        if let Some(menu_size) = config.menu_size {
            self.menu_size = menu_size;
        }
        if let Some(theme) = config.theme {
            self.theme_file = Some(theme);
        }
    }
}

/// Platform config file location, `~/.config/pageselect/config.toml`
/// on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pageselect").join("config.toml"))
}

fn read_config(path: &Path) -> Result<PageselectConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::ParseToml {
        path: path.display().to_string(),
        source,
    })
}
