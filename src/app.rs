//! Application state and user interaction logic.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;

use crate::data::Epoch;
use crate::plotter::Plotter;
use crate::ui::Theme;

/// Main application state.
///
/// Owns every plotter exclusively; the whole system is single-threaded, so
/// there is no shared state and no locking anywhere.
pub struct App {
    pub running: bool,
    /// While paused, sources are not drained; the logs keep growing and the
    /// next drain catches up.
    pub paused: bool,
    pub show_help: bool,

    pub plotters: Vec<Plotter>,
    epoch: Epoch,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

/// JSON shape of one exported series.
#[derive(Serialize)]
struct SeriesExport<'a> {
    source: &'a str,
    ts: &'a [f64],
    fields: BTreeMap<&'static str, &'a [f64]>,
}

impl App {
    /// Create a new App over the given plotters and process epoch.
    pub fn new(plotters: Vec<Plotter>, epoch: Epoch) -> Self {
        Self {
            running: true,
            paused: false,
            show_help: false,
            plotters,
            epoch,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Drain every source in turn.
    ///
    /// Read errors propagate and terminate the process; there is no retry or
    /// partial-failure policy.
    pub fn drain(&mut self) -> io::Result<()> {
        for plotter in &mut self.plotters {
            plotter.drain(&self.epoch)?;
        }
        Ok(())
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Toggle draining on and off.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Discard all accumulated series.
    pub fn clear_series(&mut self) {
        for plotter in &mut self.plotters {
            plotter.clear();
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current windowed series of every plotter to a JSON file.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        use std::io::Write;

        let mut export = BTreeMap::new();
        for plotter in &self.plotters {
            let series = plotter.series();
            let fields: BTreeMap<&'static str, &[f64]> = series
                .field_names()
                .filter_map(|name| series.field(name).map(|values| (name, values)))
                .collect();
            export.insert(
                plotter.kind().title(),
                SeriesExport {
                    source: plotter.source_description(),
                    ts: series.ts(),
                    fields,
                },
            );
        }

        let json = serde_json::to_string_pretty(&export)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}
