//! Data models for parsed log samples.
//!
//! ## Submodules
//!
//! - [`grammar`]: fixed per-source line grammars ([`Grammar`]) producing
//!   fixed-schema [`Sample`]s
//! - [`series`]: time-aligned value arrays ([`Series`]) with trailing-window
//!   truncation, and the process-start [`Epoch`] used to rescale timestamps
//!
//! ## Data flow
//!
//! ```text
//! log line ──▶ Grammar::parse() ──▶ Sample ──▶ Series::push()
//!                                                  │
//!                                                  ▼
//!                                    Series::truncate_to_window()
//! ```

pub mod grammar;
pub mod series;

pub use grammar::{Grammar, Sample};
pub use series::{Epoch, Series};
