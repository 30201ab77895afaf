use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pitdeck_core::{DeckSource, config_file};

mod action;
mod app;
mod bridge;
mod input;
mod layout;
mod model;
mod printing;
mod theme;
mod view;

use app::App;

/// pitdeck — edit a deck of racing trading cards from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of a dataset server (e.g. http://localhost:8000)
    #[arg(long)]
    server: Option<String>,

    /// Local site directory to edit in place
    #[arg(long)]
    site: Option<PathBuf>,

    /// Color theme: garage (default) or showroom
    #[arg(long)]
    theme: Option<String>,

    /// Directory print sheets are written to
    #[arg(long)]
    print_dir: Option<PathBuf>,

    /// Log file path (stdout belongs to the UI, so logs go to a file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the resolved source, theme, and print directory to the platform
    /// config file and exit
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.server.is_some() && args.site.is_some() {
        anyhow::bail!("--server and --site are mutually exclusive");
    }

    let config = config_file::load_config();

    // Resolve the deck source from CLI flags > env > config file > default
    let server_url = args
        .server
        .or_else(|| std::env::var("PITDECK_SERVER").ok())
        .or_else(|| {
            config
                .source
                .as_ref()
                .and_then(|s| s.server_url.clone())
        });
    let source = match (server_url, args.site) {
        (Some(url), _) => DeckSource::server(url),
        (None, Some(dir)) => DeckSource::dir(dir),
        (None, None) => {
            let dir = config
                .source
                .as_ref()
                .and_then(|s| s.site_dir.clone())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("site"));
            DeckSource::dir(dir)
        }
    };
    let source_label = source.describe();

    let theme_name = args
        .theme
        .or_else(|| config.display.as_ref().and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "garage".to_string());
    let theme = match theme_name.as_str() {
        "showroom" => theme::Theme::showroom(),
        _ => theme::Theme::garage(),
    };

    let print_dir = args
        .print_dir
        .or_else(|| {
            config
                .print
                .as_ref()
                .and_then(|p| p.output_dir.clone())
                .map(PathBuf::from)
        })
        .unwrap_or_else(std::env::temp_dir);

    if args.save_config {
        let (server_url, site_dir) = match &source {
            DeckSource::Server { base, .. } => (Some(base.clone()), None),
            DeckSource::Dir(dir) => (None, Some(dir.display().to_string())),
        };
        let file = config_file::ConfigFile {
            source: Some(config_file::SourceConfig { server_url, site_dir }),
            display: Some(config_file::DisplayConfig {
                theme: Some(theme_name),
            }),
            print: Some(config_file::PrintConfig {
                output_dir: Some(print_dir.display().to_string()),
            }),
        };
        match config_file::save_config(&file) {
            Ok(path) => {
                println!("Config saved to {}", path.display());
                return Ok(());
            }
            Err(e) => anyhow::bail!("config save failed: {e}"),
        }
    }

    // Logging goes to a file; the terminal itself is the UI.
    let log_path = args.log_file.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("pitdeck")
            .join("pitdeck.log")
    });
    let log_dir = log_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    let log_name = log_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "pitdeck.log".to_string());
    std::fs::create_dir_all(&log_dir).ok();
    let appender = tracing_appender::rolling::never(&log_dir, log_name);
    let (log_writer, _log_guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(log_writer)
        .with_ansi(false)
        .init();
    tracing::info!(source = %source_label, "starting pitdeck");

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let asset_base = source.asset_base();
    let mut app = App::new(theme, source_label, asset_base, print_dir);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<bridge::SourceCommand>();
    bridge::spawn_source_task(source, cmd_rx, event_tx);

    let _ = cmd_tx.send(bridge::SourceCommand::Load);
    app.source_tx = Some(cmd_tx);

    // Main event loop
    let tick_rate = Duration::from_millis(100);
    let mut clicks = input::ClickTracker::new();

    loop {
        // Draw
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Source task events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(source_event) = maybe_event {
                    app.handle_source_event(source_event);
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_source_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let mut action = input::map_event(&evt, &app.input_mode);
                        // The terminal reports single clicks only; a second
                        // quick click on the same cell becomes a double.
                        if let action::Action::ClickAt(x, y) = action {
                            action = clicks.classify(x, y);
                        }
                        app.update(action);
                    }
                }
            } => {}
        }

        // Process tick
        app.update(action::Action::Tick);

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
