// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Rendering for the paginated select widget.
//!
//! The layout is a search field at the top, the dropdown menu below it
//! while open, and a one-line status bar at the bottom. The menu is
//! windowed: it shows at most the configured number of rows and slides
//! the window to keep the highlighted row visible.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;
use crate::view::hit_test::HitTestRegistry;
use crate::view_model::{MouseAction, SelectViewModel};

/// Render one frame and rebuild the hit-test registry for it.
pub fn render(
    frame: &mut Frame,
    model: &mut SelectViewModel,
    theme: &Theme,
    hits: &mut HitTestRegistry<MouseAction>,
) {
    hits.clear();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg).fg(theme.text)),
        area,
    );

    let field_height: u16 = if model.style.outlined { 3 } else { 1 };
    let [field_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(field_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_field(frame, model, theme, hits, field_area);
    if model.controller().is_open() {
        render_menu(frame, model, theme, hits, body_area);
    }
    render_status_line(frame, model, theme, status_area);
}

/// The search field: selection chips, the editable filter text, and a
/// spinner while a page is in flight.
fn render_field(
    frame: &mut Frame,
    model: &mut SelectViewModel,
    theme: &Theme,
    hits: &mut HitTestRegistry<MouseAction>,
    area: Rect,
) {
    let open = model.controller().is_open();
    let loading = model.is_loading();

    hits.register(area, MouseAction::ToggleMenu);

    let inner = if model.style.outlined {
        let border_color = if open { theme.border_focused } else { theme.border };
        let title_color = if open { theme.border_focused } else { theme.muted };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                model.style.label.clone(),
                Style::default().fg(title_color),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        inner
    } else {
        area
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let line_area = Rect { height: 1, ..inner };

    let mut chip_spans: Vec<Span> = Vec::new();
    let mut total_chip_width = 0u16;
    for option in model.controller().selection().as_slice() {
        let chip = format!("[{}] ", option.label);
        total_chip_width = total_chip_width.saturating_add(chip.width() as u16);
        chip_spans.push(Span::styled(chip, Style::default().fg(theme.check)));
    }
    let spinner_width: u16 = if loading { 2 } else { 0 };
    // Chips never squeeze the input below a usable typing width.
    let chips_width = total_chip_width.min(line_area.width.saturating_sub(spinner_width + 8));

    let [chips_area, input_area, spinner_area] = Layout::horizontal([
        Constraint::Length(chips_width),
        Constraint::Min(1),
        Constraint::Length(spinner_width),
    ])
    .areas(line_area);

    if chips_width > 0 {
        frame.render_widget(Paragraph::new(Line::from(chip_spans)), chips_area);
    }

    {
        let text_style = Style::default().fg(theme.text);
        let placeholder_style = Style::default().fg(theme.placeholder);
        let input = model.input_mut();
        input.set_style(text_style);
        input.set_placeholder_style(placeholder_style);
        input.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    }
    frame.render_widget(model.input(), input_area);

    if loading {
        let spinner_frame = theme.spinner.current_frame(model.spinner_elapsed());
        frame.render_widget(
            Paragraph::new(Span::styled(
                spinner_frame.to_string(),
                Style::default().fg(theme.spinner.color),
            )),
            spinner_area,
        );
    }
}

/// The dropdown menu: windowed option rows plus one footer row for the
/// loading, empty, or more-pages state.
fn render_menu(
    frame: &mut Frame,
    model: &mut SelectViewModel,
    theme: &Theme,
    hits: &mut HitTestRegistry<MouseAction>,
    area: Rect,
) {
    if area.height < 3 || area.width < 2 {
        return;
    }
    let loading = model.is_loading();
    let has_more = model.controller().has_more_pages();
    let rows: Vec<(String, bool)> = {
        let controller = model.controller();
        controller
            .display_options()
            .into_iter()
            .map(|option| (option.label.clone(), controller.is_selected(&option.value)))
            .collect()
    };

    let footer = if loading {
        Some(Line::from(vec![
            Span::styled(
                theme
                    .spinner
                    .current_frame(model.spinner_elapsed())
                    .to_string(),
                Style::default().fg(theme.spinner.color),
            ),
            Span::raw(" "),
            Span::styled(
                model.style.loading_options_text.clone(),
                Style::default().fg(theme.muted),
            ),
        ]))
    } else if rows.is_empty() {
        Some(Line::styled(
            model.style.no_options_text.clone(),
            Style::default().fg(theme.muted),
        ))
    } else if has_more {
        Some(Line::styled(
            "↓ more".to_string(),
            Style::default().fg(theme.muted),
        ))
    } else {
        None
    };

    let budget = model.style.size.max_rows().min(area.height.saturating_sub(2));
    let footer_rows = footer.is_some() as u16;
    let option_rows = budget.saturating_sub(footer_rows).min(rows.len() as u16);
    model.ensure_highlight_visible(option_rows.max(1) as usize);

    let menu_area = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: (option_rows + footer_rows + 2).min(area.height),
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(menu_area);
    frame.render_widget(Clear, menu_area);
    frame.render_widget(block, menu_area);

    let offset = model.window_offset();
    let highlighted = model.highlighted();
    let end = (offset + option_rows as usize).min(rows.len());
    let mut lines: Vec<Line> = Vec::with_capacity(end - offset + footer_rows as usize);
    for (row_index, (label, selected)) in rows[offset..end].iter().enumerate() {
        let global_index = offset + row_index;
        let is_highlighted = global_index == highlighted;
        let mark_style = if *selected {
            Style::default().fg(theme.check)
        } else {
            Style::default()
        };
        let label_style = if is_highlighted {
            Style::default()
                .fg(theme.highlight_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        let mark = if *selected { "✓ " } else { "  " };
        let mut line = Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(label.clone(), label_style),
        ]);
        if is_highlighted {
            line = line.style(Style::default().bg(theme.highlight_bg));
        }
        lines.push(line);

        hits.register(
            Rect {
                x: inner.x,
                y: inner.y + row_index as u16,
                width: inner.width,
                height: 1,
            },
            MouseAction::ToggleOption(global_index),
        );
    }
    if let Some(footer_line) = footer {
        lines.push(footer_line);
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// One-line status bar: the last fetch error when present, key hints
/// otherwise.
fn render_status_line(frame: &mut Frame, model: &SelectViewModel, theme: &Theme, area: Rect) {
    let line = if let Some(error) = model.controller().last_error() {
        Line::styled(
            format!("Error: {}", error),
            Style::default().fg(theme.error),
        )
    } else {
        let mut text = if model.controller().is_open() {
            "Enter toggle  Esc close  Ctrl-C quit".to_string()
        } else {
            "Enter open  Esc quit".to_string()
        };
        let selected = model.controller().selection().len();
        if selected > 0 {
            text.push_str(&format!("  |  {} selected", selected));
        }
        Line::styled(text, Style::default().fg(theme.muted))
    };
    frame.render_widget(Paragraph::new(line), area);
}
