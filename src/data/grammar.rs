//! Fixed line grammars for the tuning logs.
//!
//! Each grammar pairs a regex with named capture groups with a fixed field
//! schema, so every matched line yields the full set of fields and the value
//! arrays downstream can never fall out of step with the timestamp axis.

use regex::Regex;

/// One parsed log line: the raw timestamp plus one value per schema field,
/// in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Raw timestamp in nanoseconds, as written by the upstream process.
    pub ts_ns: f64,
    /// Field values aligned with [`Grammar::fields`].
    pub values: Vec<f64>,
}

/// A fixed per-source line grammar.
///
/// # Example
///
/// ```
/// use tuner_scope::data::Grammar;
///
/// let grammar = Grammar::latency();
/// let sample = grammar.parse("100, 5, 1.0").unwrap();
/// assert_eq!(sample.ts_ns, 100.0);
/// assert_eq!(sample.values, vec![5.0, 1.0]);
/// assert!(grammar.parse("not a log line").is_none());
/// ```
#[derive(Debug)]
pub struct Grammar {
    regex: Regex,
    fields: &'static [&'static str],
    decimation: u64,
}

impl Grammar {
    /// Grammar for the jitter log: `ts, stream_ts, delta_ms, jitter_max, jitter_min`.
    pub fn jitter() -> Self {
        Self::new(
            r"^(?P<ts>\d*),\s(?P<stream_ts>\d*),\s(?P<delta_ms>[\d.]*),\s(?P<jitter_max>[\d.]*),\s(?P<jitter_min>[\d.]*)$",
            &["stream_ts", "delta_ms", "jitter_max", "jitter_min"],
            1,
        )
    }

    /// Grammar for the latency/tuner log: `ts, niq, target`.
    ///
    /// The tuner writes at a high rate, so this grammar decimates by 8.
    pub fn latency() -> Self {
        Self::new(r"^(?P<ts>\d*),\s(?P<niq>\d*),\s(?P<target>[\d.]*)$", &["niq", "target"], 8)
    }

    /// Grammar for the frequency-estimator log: `ts, filtered, target, p, i`.
    ///
    /// The proportional and integral accumulators may be negative and in
    /// scientific notation.
    pub fn freq_estimator() -> Self {
        Self::new(
            r"^(?P<ts>\d*),\s*(?P<filtered>[\d.]*),\s*(?P<target>[\d.]*),\s*(?P<p>[-e\d.]*),\s*(?P<i>[-e\d.]*)$",
            &["filtered", "target", "p", "i"],
            1,
        )
    }

    fn new(pattern: &str, fields: &'static [&'static str], decimation: u64) -> Self {
        let regex = Regex::new(pattern).expect("grammar regex");
        Self { regex, fields, decimation }
    }

    /// Override the decimation factor; 1 keeps every line.
    pub fn with_decimation(mut self, decimation: u64) -> Self {
        self.decimation = decimation.max(1);
        self
    }

    /// The value-field schema (timestamp excluded), in capture order.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Keep only every Nth line; 1 keeps everything.
    pub fn decimation(&self) -> u64 {
        self.decimation
    }

    /// Parse one line against the grammar.
    ///
    /// Returns `None` for lines that do not match or whose captures do not
    /// parse as numbers; both count as malformed input and are skipped
    /// silently.
    pub fn parse(&self, line: &str) -> Option<Sample> {
        let caps = self.regex.captures(line)?;
        let ts_ns: f64 = caps.name("ts")?.as_str().parse().ok()?;
        let mut values = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            values.push(caps.name(field)?.as_str().parse().ok()?);
        }
        Some(Sample { ts_ns, values })
    }
}
