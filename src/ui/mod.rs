//! Terminal rendering with ratatui.
//!
//! - [`chart`]: the generic windowed-series chart renderer
//! - [`panels`]: per-plotter panel composition (trace selection, unit
//!   conversions, secondary axis for the frequency estimator)
//! - [`common`]: header bar, status bar, and help overlay
//! - [`theme`]: light/dark color schemes with terminal auto-detection

pub mod chart;
pub mod common;
pub mod panels;
pub mod theme;

pub use chart::Trace;
pub use theme::Theme;
