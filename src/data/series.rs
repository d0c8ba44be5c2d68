//! Time-aligned series accumulation and trailing-window truncation.

use std::time::{SystemTime, UNIX_EPOCH};

use super::grammar::Sample;

/// Default trailing window retained for display, in seconds.
pub const DEFAULT_WINDOW_SECS: f64 = 90.0;

/// The immutable process-start instant, in wall-clock nanoseconds.
///
/// Captured once in `main` and passed to every plotter; log timestamps are
/// rescaled against it to elapsed seconds.
#[derive(Debug, Clone, Copy)]
pub struct Epoch {
    start_ns: u64,
}

impl Epoch {
    /// Capture the current wall-clock time as the epoch.
    pub fn now() -> Self {
        let start_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self { start_ns }
    }

    /// Build an epoch from a raw nanosecond value.
    pub fn from_ns(start_ns: u64) -> Self {
        Self { start_ns }
    }

    /// Rescale a raw log timestamp to seconds elapsed since the epoch.
    pub fn elapsed_secs(&self, ts_ns: f64) -> f64 {
        (ts_ns - self.start_ns as f64) / 1e9
    }
}

/// One named value array within a [`Series`].
#[derive(Debug, Clone)]
struct FieldSeries {
    name: &'static str,
    values: Vec<f64>,
}

/// Time-aligned value arrays sharing one timestamp axis.
///
/// Invariant: every field array has the same length as the timestamp axis.
/// [`Series::push`] appends one value to every array and
/// [`Series::truncate_to_window`] drops the same index set from all of them,
/// so the arrays cannot desynchronize.
#[derive(Debug, Clone)]
pub struct Series {
    window_secs: f64,
    ts: Vec<f64>,
    fields: Vec<FieldSeries>,
}

impl Series {
    /// Create an empty series for the given schema and window span.
    pub fn new(schema: &'static [&'static str], window_secs: f64) -> Self {
        let fields = schema
            .iter()
            .map(|&name| FieldSeries { name, values: Vec::new() })
            .collect();
        Self { window_secs, ts: Vec::new(), fields }
    }

    /// Append one sample, rescaling its timestamp to elapsed seconds.
    ///
    /// The sample must carry exactly one value per schema field; grammars
    /// guarantee this for matched lines.
    pub fn push(&mut self, sample: &Sample, epoch: &Epoch) {
        debug_assert_eq!(sample.values.len(), self.fields.len());
        self.ts.push(epoch.elapsed_secs(sample.ts_ns));
        for (field, value) in self.fields.iter_mut().zip(&sample.values) {
            field.values.push(*value);
        }
    }

    /// Drop every index whose timestamp falls before `latest − window`.
    pub fn truncate_to_window(&mut self) {
        let Some(&last) = self.ts.last() else {
            return;
        };
        let cutoff = last - self.window_secs;
        let keep_from = self.ts.partition_point(|&t| t < cutoff);
        if keep_from == 0 {
            return;
        }
        self.ts.drain(..keep_from);
        for field in &mut self.fields {
            field.values.drain(..keep_from);
        }
    }

    /// The shared timestamp axis, in elapsed seconds.
    pub fn ts(&self) -> &[f64] {
        &self.ts
    }

    /// Look up a field's value array by name.
    pub fn field(&self, name: &str) -> Option<&[f64]> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.values.as_slice())
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.ts.len()
    }

    /// True when no sample has been retained yet.
    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    /// The configured window span in seconds.
    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }

    /// Discard all accumulated samples.
    pub fn clear(&mut self) {
        self.ts.clear();
        for field in &mut self.fields {
            field.values.clear();
        }
    }
}
