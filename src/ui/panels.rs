//! Per-plotter panel composition.
//!
//! Each panel converts the accumulated series into display units and hands
//! the traces to the chart renderer. The frequency-estimator panel carries a
//! secondary chart for the PI accumulators, which live on a different scale
//! than the rate traces.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

use super::chart::{render_chart, Trace};
use super::theme::Theme;
use crate::plotter::{Plotter, PlotterKind};

/// Sample rate of the audio stream the tuner operates on.
const SAMPLE_RATE_HZ: f64 = 44_100.0;

/// Render the panel for one plotter into `area`.
pub fn render(frame: &mut Frame, plotter: &Plotter, theme: &Theme, area: Rect) {
    match plotter.kind() {
        PlotterKind::Jitter => render_jitter(frame, plotter, theme, area),
        PlotterKind::Latency => render_latency(frame, plotter, theme, area),
        PlotterKind::FreqEstimator => render_freq_estimator(frame, plotter, theme, area),
    }
}

fn render_jitter(frame: &mut Frame, plotter: &Plotter, theme: &Theme, area: Rect) {
    let series = plotter.series();
    let traces = vec![
        Trace::new("delta", field(plotter, "delta_ms")),
        Trace::new("jitter max", scaled(plotter, "jitter_max", 1.0 / 1e6)),
        Trace::new("jitter min", scaled(plotter, "jitter_min", 1.0 / 1e6)),
    ];
    render_chart(
        frame,
        area,
        theme,
        plotter.kind().title(),
        series.ts(),
        &traces,
        series.window_secs(),
    );
}

fn render_latency(frame: &mut Frame, plotter: &Plotter, theme: &Theme, area: Rect) {
    let series = plotter.series();
    let traces = vec![
        Trace::new("niq ms", samples_to_ms(plotter, "niq")),
        Trace::new("target ms", samples_to_ms(plotter, "target")),
    ];
    render_chart(
        frame,
        area,
        theme,
        plotter.kind().title(),
        series.ts(),
        &traces,
        series.window_secs(),
    );
}

fn render_freq_estimator(frame: &mut Frame, plotter: &Plotter, theme: &Theme, area: Rect) {
    let series = plotter.series();

    // The PI accumulators live on their own scale; they get a second chart
    // stacked inside the panel instead of an overlaid twin axis.
    let chunks =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area);

    let rate_traces = vec![
        Trace::new("filtered ms", samples_to_ms(plotter, "filtered")),
        Trace::new("target ms", samples_to_ms(plotter, "target")),
    ];
    render_chart(
        frame,
        chunks[0],
        theme,
        plotter.kind().title(),
        series.ts(),
        &rate_traces,
        series.window_secs(),
    );

    let accum_traces =
        vec![Trace::new("P", field(plotter, "p")), Trace::new("I", field(plotter, "i"))];
    render_chart(
        frame,
        chunks[1],
        theme,
        "PI accumulators",
        series.ts(),
        &accum_traces,
        series.window_secs(),
    );
}

/// A field's values as-is; empty when the field is unknown.
fn field(plotter: &Plotter, name: &str) -> Vec<f64> {
    plotter.series().field(name).map(<[f64]>::to_vec).unwrap_or_default()
}

/// A field's values with a constant factor applied.
fn scaled(plotter: &Plotter, name: &str, factor: f64) -> Vec<f64> {
    plotter
        .series()
        .field(name)
        .map(|values| values.iter().map(|v| v * factor).collect())
        .unwrap_or_default()
}

/// Convert a sample-count field to milliseconds at the stream sample rate.
fn samples_to_ms(plotter: &Plotter, name: &str) -> Vec<f64> {
    scaled(plotter, name, 1e3 / SAMPLE_RATE_HZ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Epoch, Grammar};
    use crate::plotter::Plotter;
    use crate::source::LineSource;
    use ratatui::{backend::TestBackend, Terminal};
    use std::io;

    struct OneBatch(Vec<String>);

    impl LineSource for OneBatch {
        fn read_lines(&mut self) -> io::Result<Vec<String>> {
            Ok(std::mem::take(&mut self.0))
        }

        fn description(&self) -> &str {
            "test"
        }
    }

    fn plotter_with_lines(kind: PlotterKind, grammar: Grammar, lines: &[&str]) -> Plotter {
        let source = OneBatch(lines.iter().map(|l| l.to_string()).collect());
        let mut plotter = Plotter::with_source(kind, Box::new(source), grammar, 90.0);
        plotter.drain(&Epoch::from_ns(0)).unwrap();
        plotter
    }

    #[test]
    fn test_empty_plotter_panel_draws_nothing() {
        let plotter = plotter_with_lines(PlotterKind::Jitter, Grammar::jitter(), &[]);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &plotter, &theme, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        assert!(buffer.content().iter().all(|cell| cell.symbol() == " "));
    }

    #[test]
    fn test_freq_estimator_panel_renders_both_charts() {
        let plotter = plotter_with_lines(
            PlotterKind::FreqEstimator,
            Grammar::freq_estimator(),
            &[
                "1000000000, 441.0, 440.0, 0.5, -0.1",
                "2000000000, 442.0, 440.0, 0.6, -0.2",
            ],
        );
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &plotter, &theme, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(rendered.contains("Freq estimator"));
        assert!(rendered.contains("PI accumulators"));
    }

    #[test]
    fn test_latency_panel_converts_to_ms() {
        // 44100 samples at 44.1 kHz is exactly 1000 ms.
        let plotter = plotter_with_lines(
            PlotterKind::Latency,
            Grammar::latency().with_decimation(1),
            &["1000000000, 44100, 22050.0"],
        );
        let ms = samples_to_ms(&plotter, "niq");
        assert!((ms[0] - 1000.0).abs() < 1e-9);
        let target_ms = samples_to_ms(&plotter, "target");
        assert!((target_ms[0] - 500.0).abs() < 1e-9);
    }
}
