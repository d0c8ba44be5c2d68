//! Line-oriented input sources for append-only logs.
//!
//! A source produces the complete lines appended to a log since the previous
//! call. The trait seam exists so the plotting layer can be exercised with
//! in-memory doubles in tests.

mod tail;

pub use tail::TailSource;

use std::io;

/// Trait for incrementally reading complete lines from a log source.
///
/// # Example
///
/// ```no_run
/// use tuner_scope::source::{LineSource, TailSource};
///
/// let mut source = TailSource::open("/tmp/tuner.log").unwrap();
/// for line in source.read_lines().unwrap() {
///     println!("{line}");
/// }
/// ```
pub trait LineSource {
    /// Return the complete lines appended since the previous call.
    ///
    /// Returns an empty `Vec` when no new complete line exists. A trailing
    /// unterminated fragment is carried over to the next call; no bytes are
    /// lost or returned twice.
    fn read_lines(&mut self) -> io::Result<Vec<String>>;

    /// Human-readable description of the source, for the status bar.
    fn description(&self) -> &str;
}
