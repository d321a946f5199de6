// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Color themes for the select widget.
//!
//! A [`Theme`] holds semantic color roles rather than widget-specific
//! styles; the view maps roles onto ratatui styles at render time.
//! Themes start from one of the built-in palettes and can be adjusted
//! through a TOML override file, where each color is written as a hex
//! string (`"#89b4fa"`), an `{ r, g, b }` table, or a three-element
//! array.

use std::path::Path;
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::settings::Settings;

/// Animated spinner shown while a page of options is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Spinner {
    pub frames: Vec<String>,
    pub interval: Duration,
    pub color: Color,
}

impl Spinner {
    /// Frame to display after `elapsed` time, cycling through the frame
    /// list at the spinner's interval.
    pub fn current_frame(&self, elapsed: Duration) -> &str {
        if self.frames.is_empty() {
            return "";
        }
        let interval = self.interval.as_millis().max(1);
        let index = (elapsed.as_millis() / interval) as usize % self.frames.len();
        &self.frames[index]
    }
}

/// Errors raised while loading a theme override file.
#[derive(Debug, Error)]
pub enum ThemeLoadError {
    #[error("failed to read theme file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme file {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid color for \"{field}\": {details}")]
    InvalidColor { field: String, details: String },
}

/// Semantic color roles used by the select widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Screen background.
    pub bg: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text: hints, pagination markers, the loading row.
    pub muted: Color,
    /// Placeholder text in an empty search field.
    pub placeholder: Color,
    /// Field and menu borders.
    pub border: Color,
    /// Border of the search field while the menu is open.
    pub border_focused: Color,
    /// Background of the highlighted menu row.
    pub highlight_bg: Color,
    /// Foreground of the highlighted menu row.
    pub highlight_fg: Color,
    /// Check marks on selected rows and selection chips in the field.
    pub check: Color,
    /// Error text on the status line.
    pub error: Color,
    /// Loading spinner.
    pub spinner: Spinner,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            text: Color::Rgb(205, 214, 244),
            muted: Color::Rgb(108, 112, 134),
            placeholder: Color::Rgb(127, 132, 156),
            border: Color::Rgb(69, 71, 90),
            border_focused: Color::Rgb(137, 180, 250),
            highlight_bg: Color::Rgb(49, 50, 68),
            highlight_fg: Color::Rgb(205, 214, 244),
            check: Color::Rgb(166, 227, 161),
            error: Color::Rgb(243, 139, 168),
            spinner: Spinner {
                frames: ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
                    .iter()
                    .map(|frame| frame.to_string())
                    .collect(),
                interval: Duration::from_millis(80),
                color: Color::Rgb(137, 180, 250),
            },
        }
    }
}

impl Theme {
    /// High-contrast palette for terminals where the default colors are
    /// hard to read.
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            text: Color::White,
            muted: Color::Rgb(163, 163, 163),
            placeholder: Color::Rgb(163, 163, 163),
            border: Color::White,
            border_focused: Color::Rgb(250, 204, 21),
            highlight_bg: Color::White,
            highlight_fg: Color::Black,
            check: Color::Rgb(74, 222, 128),
            error: Color::Rgb(248, 113, 113),
            spinner: Spinner {
                frames: ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]
                    .iter()
                    .map(|frame| frame.to_string())
                    .collect(),
                interval: Duration::from_millis(80),
                color: Color::Rgb(250, 204, 21),
            },
        }
    }

    /// Resolve the theme described by `settings`: pick the base palette,
    /// then apply the override file when one is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ThemeLoadError> {
        let mut theme = if settings.high_contrast {
            Self::high_contrast()
        } else {
            Self::default()
        };
        if let Some(path) = &settings.theme_file {
            theme.apply_overrides_from_file(path)?;
        }
        Ok(theme)
    }

    /// Load a TOML override file and apply it on top of this theme.
    pub fn apply_overrides_from_file(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<(), ThemeLoadError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ThemeLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides: ThemeOverrides =
            toml::from_str(&contents).map_err(|source| ThemeLoadError::ParseToml {
                path: path.display().to_string(),
                source,
            })?;
        self.apply_overrides(overrides)
    }

    fn apply_overrides(&mut self, overrides: ThemeOverrides) -> Result<(), ThemeLoadError> {
        if let Some(value) = &overrides.bg {
            self.bg = parse_color("bg", value)?;
        }
        if let Some(value) = &overrides.text {
            self.text = parse_color("text", value)?;
        }
        if let Some(value) = &overrides.muted {
            self.muted = parse_color("muted", value)?;
        }
        if let Some(value) = &overrides.placeholder {
            self.placeholder = parse_color("placeholder", value)?;
        }
        if let Some(value) = &overrides.border {
            self.border = parse_color("border", value)?;
        }
        if let Some(value) = &overrides.border_focused {
            self.border_focused = parse_color("border-focused", value)?;
        }
        if let Some(value) = &overrides.highlight_bg {
            self.highlight_bg = parse_color("highlight-bg", value)?;
        }
        if let Some(value) = &overrides.highlight_fg {
            self.highlight_fg = parse_color("highlight-fg", value)?;
        }
        if let Some(value) = &overrides.check {
            self.check = parse_color("check", value)?;
        }
        if let Some(value) = &overrides.error {
            self.error = parse_color("error", value)?;
        }
        if let Some(value) = &overrides.spinner_color {
            self.spinner.color = parse_color("spinner-color", value)?;
        }
        if let Some(interval) = overrides.spinner_interval_ms {
            self.spinner.interval = Duration::from_millis(interval.max(1));
        }
        if let Some(frames) = overrides.spinner_frames {
            // An empty frame list keeps the defaults.
            if !frames.is_empty() {
                self.spinner.frames = frames;
            }
        }
        Ok(())
    }
}

/// Partial theme read from an override file; unspecified fields keep
/// the base palette's values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThemeOverrides {
    pub bg: Option<ColorValue>,
    pub text: Option<ColorValue>,
    pub muted: Option<ColorValue>,
    pub placeholder: Option<ColorValue>,
    pub border: Option<ColorValue>,
    pub border_focused: Option<ColorValue>,
    pub highlight_bg: Option<ColorValue>,
    pub highlight_fg: Option<ColorValue>,
    pub check: Option<ColorValue>,
    pub error: Option<ColorValue>,
    pub spinner_color: Option<ColorValue>,
    pub spinner_interval_ms: Option<u64>,
    pub spinner_frames: Option<Vec<String>>,
}

/// A color as written in an override file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(String),
    Rgb { r: u8, g: u8, b: u8 },
    Array(Vec<u8>),
}

fn parse_color(field: &str, value: &ColorValue) -> Result<Color, ThemeLoadError> {
    match value {
        ColorValue::Hex(hex) => parse_hex(field, hex),
        ColorValue::Rgb { r, g, b } => Ok(Color::Rgb(*r, *g, *b)),
        ColorValue::Array(parts) => {
            if parts.len() != 3 {
                return Err(ThemeLoadError::InvalidColor {
                    field: field.to_string(),
                    details: format!("expected three components, got {}", parts.len()),
                });
            }
            Ok(Color::Rgb(parts[0], parts[1], parts[2]))
        }
    }
}

fn parse_hex(field: &str, hex: &str) -> Result<Color, ThemeLoadError> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Err(ThemeLoadError::InvalidColor {
            field: field.to_string(),
            details: format!("expected six hex digits, got \"{hex}\""),
        });
    }
    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|e| ThemeLoadError::InvalidColor {
            field: field.to_string(),
            details: e.to_string(),
        })
    };
    Ok(Color::Rgb(component(0..2)?, component(2..4)?, component(4..6)?))
}
