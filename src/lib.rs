// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # tuner-scope
//!
//! A diagnostic TUI that live-tails the append-only logs written by an
//! audio-streaming tuning process and renders rolling time-series charts of
//! jitter, queue latency, and frequency-estimator state.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌────────┐ │
//! │  │  app    │───▶│ plotter  │───▶│   ui    │───▶│Terminal│ │
//! │  │ (state) │    │ (drain)  │    │ (charts)│    │        │ │
//! │  └────┬────┘    └────┬─────┘    └─────────┘    └────────┘ │
//! │       │              │
//! │       ▼              ▼
//! │  ┌─────────┐    ┌──────────┐
//! │  │ source  │    │   data   │  TailSource reads complete
//! │  │ (tail)  │    │(parse +  │  lines; Grammar parses them;
//! │  └─────────┘    │ window)  │  Series keeps the trailing
//! │                 └──────────┘  window time-aligned.
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state and user interaction logic
//! - **[`source`]**: Append-only log tailing ([`LineSource`] trait with the
//!   file-backed [`TailSource`])
//! - **[`data`]**: Fixed line grammars producing fixed-schema samples, and
//!   windowed time-aligned series
//! - **[`plotter`]**: Per-log binding of source, grammar, decimation, and
//!   series
//! - **[`ui`]**: Terminal rendering with ratatui charts, legends, and a
//!   window-pinned x-axis
//!
//! ## Usage
//!
//! ```bash
//! # Tail the default log paths (/tmp/jitt.log, /tmp/tuner.log, /tmp/fe.log)
//! tuner-scope
//!
//! # Override a path and the window span
//! tuner-scope --tuner-log /var/log/tuner.log --window 120
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use tuner_scope::{App, Epoch, Plotter};
//!
//! let epoch = Epoch::now();
//! let plotters = vec![
//!     Plotter::jitter("/tmp/jitt.log", 90.0).unwrap(),
//!     Plotter::latency("/tmp/tuner.log", 90.0).unwrap(),
//!     Plotter::freq_estimator("/tmp/fe.log", 90.0).unwrap(),
//! ];
//! let mut app = App::new(plotters, epoch);
//! app.drain().unwrap();
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod plotter;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{Epoch, Grammar, Sample, Series};
pub use plotter::{Plotter, PlotterKind};
pub use source::{LineSource, TailSource};
