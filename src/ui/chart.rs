//! Windowed time-series chart rendering.
//!
//! One chart per call: the x-axis is pinned to the trailing window
//! `[max(ts[0], ts_last − window), ts_last]` and the y-axis is derived from
//! the visible values of all traces.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use super::theme::Theme;

/// One named value series to draw, already converted to display units.
#[derive(Debug, Clone)]
pub struct Trace {
    /// Legend label.
    pub label: String,
    /// Values aligned with the timestamp axis passed to [`render_chart`].
    pub values: Vec<f64>,
}

impl Trace {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self { label: label.into(), values }
    }
}

/// Render one chart of the given traces over the shared timestamp axis.
///
/// Does nothing when the timestamp axis is empty.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    ts: &[f64],
    traces: &[Trace],
    window_secs: f64,
) {
    let Some(&x_last) = ts.last() else {
        return;
    };
    let x_first = ts[0].max(x_last - window_secs);

    // Materialize (x, y) points per trace; Dataset borrows them below.
    let points: Vec<Vec<(f64, f64)>> = traces
        .iter()
        .map(|trace| {
            ts.iter()
                .zip(&trace.values)
                .filter(|(&t, _)| t >= x_first)
                .map(|(&t, &v)| (t, v))
                .collect()
        })
        .collect();

    let (y_min, y_max) = y_bounds(&points);

    let datasets: Vec<Dataset> = traces
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (trace, pts))| {
            Dataset::default()
                .name(trace.label.clone())
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(theme.trace(i)))
                .graph_type(GraphType::Line)
                .data(pts)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(format!(" {title} "), theme.header));

    let x_labels = vec![
        Span::styled(format!("{x_first:.0}s"), theme.axis),
        Span::styled(format!("{:.0}s", (x_first + x_last) / 2.0), theme.axis),
        Span::styled(format!("{x_last:.0}s"), theme.axis),
    ];
    let y_labels = vec![
        Span::styled(format_value(y_min), theme.axis),
        Span::styled(format_value((y_min + y_max) / 2.0), theme.axis),
        Span::styled(format_value(y_max), theme.axis),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([x_first, x_last]).labels(x_labels))
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(y_labels));

    frame.render_widget(chart, area);
}

/// Y bounds across all visible points, padded so flat lines stay visible.
fn y_bounds(points: &[Vec<(f64, f64)>]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for pts in points {
        for &(_, y) in pts {
            min = min.min(y);
            max = max.max(y);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(f64::EPSILON);
    if max - min < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min - pad, max + pad)
    }
}

/// Compact axis-label formatting: integers plain, small values with precision.
fn format_value(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1000.0 {
        format!("{v:.0}")
    } else if abs >= 1.0 || abs == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_empty_timestamp_axis_draws_nothing() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chart(
                    frame,
                    area,
                    &theme,
                    "Latency",
                    &[],
                    &[Trace::new("niq ms", vec![])],
                    90.0,
                );
            })
            .unwrap();

        // Nothing rendered: the buffer stays blank.
        let buffer = terminal.backend().buffer().clone();
        assert!(buffer.content().iter().all(|cell| cell.symbol() == " "));
    }

    #[test]
    fn test_nonempty_series_renders_title_and_border() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chart(
                    frame,
                    area,
                    &theme,
                    "Latency",
                    &[1.0, 2.0, 3.0],
                    &[Trace::new("niq ms", vec![5.0, 6.0, 7.0])],
                    90.0,
                );
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(rendered.contains("Latency"));
    }

    #[test]
    fn test_y_bounds_pad_flat_series() {
        let (min, max) = y_bounds(&[vec![(0.0, 5.0), (1.0, 5.0)]]);
        assert!(min < 5.0 && max > 5.0);
    }

    #[test]
    fn test_y_bounds_empty_points() {
        let (min, max) = y_bounds(&[Vec::new()]);
        assert_eq!((min, max), (0.0, 1.0));
    }
}
