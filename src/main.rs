//! lectern: a terminal reader for static markdown documentation pages.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use lectern::{
    app_state::AppState, code::SystemClipboard, config::Config, document::Document,
    formats::markdown::MarkdownFormat, query, section, sidebar::Sidebar, ui,
};
use ratatui::crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Longest sleep between redraws when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Read a markdown documentation page in the terminal", long_about = None)]
struct Args {
    /// Markdown page to open
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Print search results for a query as JSON and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Print the generated navigation as JSON and exit
    #[arg(long)]
    outline: bool,

    /// Append debug logs to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Config file to use instead of ./lectern.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(ref log_path) = args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %args.path.display(), "lectern log started");
    }

    let cfg = Config::load(args.config.as_deref());
    let document = Document::load(&args.path, &MarkdownFormat, cfg.section_level)
        .map_err(io::Error::other)?;

    if args.outline || args.search.is_some() {
        return print_headless(&args, document, &cfg);
    }

    run_tui(document, cfg)
}

/// Answer `--outline` and `--search` without opening the terminal UI.
fn print_headless(args: &Args, document: Document, cfg: &Config) -> io::Result<()> {
    let page = lectern::page::TerminalPage::new(document, cfg);
    let sections = section::index(&page);

    if args.outline {
        let sidebar = Sidebar::generate(&sections, cfg.narrow_width);
        let json = serde_json::to_string_pretty(sidebar.entries()).map_err(io::Error::other)?;
        println!("{json}");
    }
    if let Some(ref input) = args.search {
        let query = query::Query::new(input);
        let limits = query::SearchLimits::from(cfg);
        let results = if query.is_searchable(limits.min_query_len) {
            query::search(&query, &sections, &limits)
        } else {
            Vec::new()
        };
        let json = serde_json::to_string_pretty(&results).map_err(io::Error::other)?;
        println!("{json}");
    }
    Ok(())
}

fn run_tui(document: Document, cfg: Config) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let width = terminal.size()?.width;
    let mut app = AppState::new(document, cfg, Box::new(SystemClipboard::default()), width);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        let now = Instant::now();
        let timeout = app
            .next_deadline(now)
            .map_or(IDLE_POLL, |deadline| deadline.saturating_duration_since(now));

        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key, now),
                Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                Event::Resize(width, _) => app.handle_resize(width, now),
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
}
