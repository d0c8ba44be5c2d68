//! Common UI components shared across panels.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar with per-source sample counts.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" TUNER SCOPE ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
    ];

    for (i, plotter) in app.plotters.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        spans.push(Span::styled(
            plotter.kind().title(),
            Style::default().fg(app.theme.highlight),
        ));
        spans.push(Span::raw(format!(" {}", plotter.series().len())));
    }

    if app.paused {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "PAUSED",
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar with key hints and any transient status message.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(msg) = app.get_status_message() {
        Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(app.theme.highlight),
        ))
    } else {
        Line::from(vec![
            Span::styled(" q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit │ "),
            Span::styled("p", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" pause │ "),
            Span::styled("c", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" clear │ "),
            Span::styled("e", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" export │ "),
            Span::styled("?", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" help"),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help overlay, centered over the given area.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from("  q, Esc     quit"),
        Line::from("  p          pause / resume draining"),
        Line::from("  c          clear accumulated series"),
        Line::from("  e          export windowed series to JSON"),
        Line::from("  ?          toggle this help"),
        Line::from(""),
        Line::from(Span::styled(
            "  Tailed logs:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for plotter in &app.plotters {
        lines.push(Line::from(format!("    {}", plotter.source_description())));
    }
    lines.push(Line::from(""));

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 52.min(area.width);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight))
        .title(Span::styled(" Help ", app.theme.header));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Left),
        popup,
    );
}
