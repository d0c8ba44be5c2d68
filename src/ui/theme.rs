//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and panel titles.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for the header bar.
    pub header: Style,
    /// Style for axis labels.
    pub axis: Style,
    /// Trace color palette, cycled per dataset within a chart.
    pub traces: [Color; 5],
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::DarkGray),
            traces: [Color::Green, Color::Cyan, Color::Magenta, Color::Gray, Color::Red],
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            axis: Style::default().fg(Color::Gray),
            traces: [Color::Green, Color::Blue, Color::Magenta, Color::Black, Color::Red],
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Trace color for the nth dataset in a chart.
    pub fn trace(&self, index: usize) -> Color {
        self.traces[index % self.traces.len()]
    }
}
