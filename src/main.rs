// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod plotter;
mod source;
mod ui;

use app::App;
use data::{series::DEFAULT_WINDOW_SECS, Epoch};
use plotter::Plotter;

#[derive(Parser, Debug)]
#[command(name = "tuner-scope")]
#[command(about = "Diagnostic TUI for live-tailing audio tuning logs")]
struct Args {
    /// Path to the jitter log
    #[arg(long, default_value = "/tmp/jitt.log")]
    jitter_log: PathBuf,

    /// Path to the tuner latency log
    #[arg(long, default_value = "/tmp/tuner.log")]
    tuner_log: PathBuf,

    /// Path to the frequency-estimator log
    #[arg(long, default_value = "/tmp/fe.log")]
    fe_log: PathBuf,

    /// Trailing window span to display, in seconds
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SECS)]
    window: f64,

    /// Drain interval in milliseconds
    #[arg(short, long, default_value = "100")]
    refresh: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing()?;
    tracing::info!(?args, "starting");

    // The immutable process-start instant every timestamp is rescaled against.
    let epoch = Epoch::now();

    // A missing log file is fatal here; there is no reopen logic later.
    let plotters = vec![
        Plotter::jitter(&args.jitter_log, args.window)?,
        Plotter::latency(&args.tuner_log, args.window)?,
        Plotter::freq_estimator(&args.fe_log, args.window)?,
    ];

    run_tui(plotters, epoch, Duration::from_millis(args.refresh))
}

/// Install a file-backed tracing subscriber when `TUNER_SCOPE_LOG` names a
/// path; stdout and stderr belong to the TUI.
fn init_tracing() -> Result<()> {
    let Ok(path) = std::env::var("TUNER_SCOPE_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(&path).with_context(|| format!("creating log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI over the given plotters
fn run_tui(plotters: Vec<Plotter>, epoch: Epoch, refresh_interval: Duration) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(plotters, epoch);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_drain = Instant::now();

    // Minimum terminal size for three stacked charts
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 18;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1),     // Header bar
                Constraint::Ratio(1, 3),   // Jitter
                Constraint::Ratio(1, 3),   // Latency
                Constraint::Min(6),        // Freq estimator (two stacked charts)
                Constraint::Length(1),     // Status bar
            ])
            .split(area);

            // Render header with per-source sample counts
            ui::common::render_header(frame, app, chunks[0]);

            // Render one panel per plotter, stacked
            for (plotter, &chunk) in app.plotters.iter().zip(chunks.iter().skip(1)) {
                ui::panels::render(frame, plotter, &app.theme, chunk);
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[4]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout; this doubles as the sleep
        // between drain rounds.
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Drain sources periodically; read errors are fatal
        if !app.paused && last_drain.elapsed() >= refresh_interval {
            app.drain().context("reading tuning logs")?;
            last_drain = Instant::now();
        }
    }

    Ok(())
}
