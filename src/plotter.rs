//! Per-source plotters binding a log path, a grammar, and an accumulated series.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::{Epoch, Grammar, Series};
use crate::source::{LineSource, TailSource};

/// Which tuning log a plotter renders; drives panel composition in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotterKind {
    /// Stream jitter: delta and jitter extrema.
    Jitter,
    /// Queue latency: input-queue depth against its target.
    Latency,
    /// Frequency estimator: filtered/target rate plus PI accumulators.
    FreqEstimator,
}

impl PlotterKind {
    /// Panel title shown above the chart.
    pub fn title(&self) -> &'static str {
        match self {
            PlotterKind::Jitter => "Jitter",
            PlotterKind::Latency => "Latency",
            PlotterKind::FreqEstimator => "Freq estimator",
        }
    }
}

/// Tails one tuning log and accumulates its windowed series.
pub struct Plotter {
    kind: PlotterKind,
    source: Box<dyn LineSource>,
    grammar: Grammar,
    series: Series,
    /// Lines seen since the source was opened; drives decimation.
    line_counter: u64,
}

impl Plotter {
    /// Plotter for the jitter log (`ts, stream_ts, delta_ms, jitter_max, jitter_min`).
    pub fn jitter<P: AsRef<Path>>(path: P, window_secs: f64) -> Result<Self> {
        Self::open(PlotterKind::Jitter, path, Grammar::jitter(), window_secs)
    }

    /// Plotter for the tuner latency log (`ts, niq, target`), decimated by 8.
    pub fn latency<P: AsRef<Path>>(path: P, window_secs: f64) -> Result<Self> {
        Self::open(PlotterKind::Latency, path, Grammar::latency(), window_secs)
    }

    /// Plotter for the frequency-estimator log (`ts, filtered, target, p, i`).
    pub fn freq_estimator<P: AsRef<Path>>(path: P, window_secs: f64) -> Result<Self> {
        Self::open(PlotterKind::FreqEstimator, path, Grammar::freq_estimator(), window_secs)
    }

    fn open<P: AsRef<Path>>(
        kind: PlotterKind,
        path: P,
        grammar: Grammar,
        window_secs: f64,
    ) -> Result<Self> {
        let source = TailSource::open(&path)
            .with_context(|| format!("opening {}", path.as_ref().display()))?;
        Ok(Self::with_source(kind, Box::new(source), grammar, window_secs))
    }

    /// Build a plotter over an arbitrary source; the file constructors and
    /// tests both funnel through here.
    pub fn with_source(
        kind: PlotterKind,
        source: Box<dyn LineSource>,
        grammar: Grammar,
        window_secs: f64,
    ) -> Self {
        let series = Series::new(grammar.fields(), window_secs);
        Self { kind, source, grammar, series, line_counter: 0 }
    }

    /// Read all newly appended lines, parse and accumulate them, then
    /// truncate the series to the trailing window.
    ///
    /// Returns the number of samples retained from this round. Read errors
    /// propagate; malformed lines are skipped silently.
    pub fn drain(&mut self, epoch: &Epoch) -> io::Result<usize> {
        let lines = self.source.read_lines()?;
        let mut kept = 0;
        for line in &lines {
            self.line_counter += 1;
            if self.line_counter % self.grammar.decimation() != 0 {
                continue;
            }
            if let Some(sample) = self.grammar.parse(line) {
                self.series.push(&sample, epoch);
                kept += 1;
            }
        }
        if kept > 0 {
            self.series.truncate_to_window();
            tracing::debug!(
                plotter = self.kind.title(),
                lines = lines.len(),
                kept,
                retained = self.series.len(),
                "drained"
            );
        }
        Ok(kept)
    }

    pub fn kind(&self) -> PlotterKind {
        self.kind
    }

    /// The accumulated, windowed series.
    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Discard accumulated samples; the decimation counter keeps running.
    pub fn clear(&mut self) {
        self.series.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// In-memory source: hands out one pre-baked batch of lines per call.
    struct FakeSource {
        batches: Vec<Vec<String>>,
    }

    impl FakeSource {
        fn new(batches: Vec<Vec<&str>>) -> Self {
            Self {
                batches: batches
                    .into_iter()
                    .map(|b| b.into_iter().map(String::from).collect())
                    .collect(),
            }
        }
    }

    impl LineSource for FakeSource {
        fn read_lines(&mut self) -> io::Result<Vec<String>> {
            if self.batches.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(self.batches.remove(0))
            }
        }

        fn description(&self) -> &str {
            "fake"
        }
    }

    #[test]
    fn test_missing_log_is_fatal_at_construction() {
        assert!(Plotter::latency("/nonexistent/dir/tuner.log", 90.0).is_err());
    }

    #[test]
    fn test_latency_lines_accumulate_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        let mut plotter = Plotter::with_source(
            PlotterKind::Latency,
            Box::new(TailSource::open(file.path()).unwrap()),
            Grammar::latency().with_decimation(1),
            90.0,
        );

        write!(file, "100, 5, 1.0\n200, 6, 2.0\n").unwrap();
        file.flush().unwrap();

        let epoch = Epoch::from_ns(0);
        assert_eq!(plotter.drain(&epoch).unwrap(), 2);
        let series = plotter.series();
        assert_eq!(series.field("niq").unwrap(), &[5.0, 6.0]);
        assert_eq!(series.field("target").unwrap(), &[1.0, 2.0]);
        assert_eq!(series.ts(), &[100.0 / 1e9, 200.0 / 1e9]);
    }

    #[test]
    fn test_decimation_keeps_every_nth_line() {
        // Latency grammar decimates by 8: of 16 lines the 8th and 16th stay.
        let lines: Vec<String> =
            (1..=16).map(|n| format!("{}, {}, 1.0", n * 1_000_000, n)).collect();
        let batch: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut plotter = Plotter::with_source(
            PlotterKind::Latency,
            Box::new(FakeSource::new(vec![batch])),
            Grammar::latency(),
            90.0,
        );

        let epoch = Epoch::from_ns(0);
        assert_eq!(plotter.drain(&epoch).unwrap(), 2);
        assert_eq!(plotter.series().field("niq").unwrap(), &[8.0, 16.0]);
    }

    #[test]
    fn test_decimation_counter_spans_batches() {
        // 4 lines then 4 lines: only the 8th line overall is kept.
        let first: Vec<String> = (1..=4).map(|n| format!("{n}, {n}, 0.0")).collect();
        let second: Vec<String> = (5..=8).map(|n| format!("{n}, {n}, 0.0")).collect();
        let mut plotter = Plotter::with_source(
            PlotterKind::Latency,
            Box::new(FakeSource::new(vec![
                first.iter().map(String::as_str).collect(),
                second.iter().map(String::as_str).collect(),
            ])),
            Grammar::latency(),
            90.0,
        );

        let epoch = Epoch::from_ns(0);
        assert_eq!(plotter.drain(&epoch).unwrap(), 0);
        assert_eq!(plotter.drain(&epoch).unwrap(), 1);
        assert_eq!(plotter.series().field("niq").unwrap(), &[8.0]);
    }

    #[test]
    fn test_unmatched_lines_skipped_silently() {
        let mut plotter = Plotter::with_source(
            PlotterKind::Jitter,
            Box::new(FakeSource::new(vec![vec![
                "1000, 1, 0.5, 2.0, 1.0",
                "### tuner restarted ###",
                "2000, 2, 0.6, 2.5, 1.5",
            ]])),
            Grammar::jitter(),
            90.0,
        );

        let epoch = Epoch::from_ns(0);
        assert_eq!(plotter.drain(&epoch).unwrap(), 2);
        assert_eq!(plotter.series().field("delta_ms").unwrap(), &[0.5, 0.6]);
    }

    #[test]
    fn test_drain_truncates_to_window() {
        let lines: Vec<String> =
            (0..30).map(|sec| format!("{}, 440.0, 440.0, 0.0, 0.0", sec as u64 * 1_000_000_000)).collect();
        let batch: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut plotter = Plotter::with_source(
            PlotterKind::FreqEstimator,
            Box::new(FakeSource::new(vec![batch])),
            Grammar::freq_estimator(),
            10.0,
        );

        let epoch = Epoch::from_ns(0);
        plotter.drain(&epoch).unwrap();
        let series = plotter.series();
        let last = *series.ts().last().unwrap();
        assert!(series.ts().iter().all(|&t| t >= last - 10.0));
        assert_eq!(series.field("p").unwrap().len(), series.len());
    }
}
