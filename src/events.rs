//! Keyboard event handling.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Pause/resume draining
        KeyCode::Char('p') => {
            app.toggle_pause();
            let msg = if app.paused { "paused" } else { "resumed" };
            app.set_status_message(msg.to_string());
        }

        // Clear accumulated series
        KeyCode::Char('c') => {
            app.clear_series();
            app.set_status_message("series cleared".to_string());
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("tuner_scope_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {e}"));
                }
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Epoch, Grammar};
    use crate::plotter::{Plotter, PlotterKind};
    use crate::source::LineSource;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    struct Silent;

    impl LineSource for Silent {
        fn read_lines(&mut self) -> std::io::Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn description(&self) -> &str {
            "silent"
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_app() -> App {
        let plotter = Plotter::with_source(
            PlotterKind::Jitter,
            Box::new(Silent),
            Grammar::jitter(),
            90.0,
        );
        App::new(vec![plotter], Epoch::from_ns(0))
    }

    #[test]
    fn test_q_quits() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_p_toggles_pause() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('p')));
        assert!(app.paused);
        handle_key_event(&mut app, key(KeyCode::Char('p')));
        assert!(!app.paused);
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.show_help);
        assert!(app.running);
    }
}
