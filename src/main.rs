use std::error::Error;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

mod api;
mod app;
mod config;
mod dates;
mod error;
mod forms;
mod grouping;
mod logging;
mod modals;
mod models;
mod pages;
mod router;
mod storage;
mod ui;

use api::ApiClient;
use app::App;
use config::{Overrides, Settings};
use router::Route;
use storage::ConfigStore;

#[derive(Parser, Debug)]
#[command(name = "research-assistant")]
#[command(about = "Upload, organise and read research papers from the terminal")]
struct Cli {
    /// Backend base URL (default http://localhost:8080)
    #[arg(long)]
    api_url: Option<String>,

    /// User id sent with every request
    #[arg(long)]
    user_id: Option<u64>,

    /// Page to open first: /, /login, /register, /home or /profile
    #[arg(long)]
    route: Option<Route>,

    /// Log filter for ~/.research-assistant.log, e.g. "debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.log_level.as_deref()) {
        eprintln!("Logging disabled: {err}");
    }

    let store = ConfigStore::locate();
    let overrides = Overrides {
        api_url: cli.api_url,
        user_id: cli.user_id,
        route: cli.route,
    };
    let settings = Settings::load(overrides, store.as_ref().and_then(ConfigStore::read));
    info!(api_url = %settings.api_url, user_id = settings.user_id, "starting");

    let client = ApiClient::new(&settings.api_url, settings.request_timeout)?;
    let mut app = App::new(&settings, Box::new(client), store);

    let mut stdout = std::io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    if let Err(err) = stdout.execute(EnableBracketedPaste) {
        warn!(error = %err, "bracketed paste unavailable");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        if app.should_quit {
            break;
        }

        if app.has_pending() {
            app.run_next_pending();
            continue;
        }

        if event::poll(Duration::from_millis(120))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }
    }

    let _ = terminal.backend_mut().execute(DisableBracketedPaste);
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("exiting");

    Ok(())
}
