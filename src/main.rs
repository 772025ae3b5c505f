use std::fs::OpenOptions;
use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use rush_console::app;
use rush_console::ui;
use rush_console::{App, AppConfig, AppEvent, QueryClient};

/// Terminal client for the RUSH assistant API.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the API service (overrides API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Ask a single question, print the result to stdout, and exit
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = AppConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let client = QueryClient::new(config.base_url.as_str(), config.timeout_ms);

    if let Some(query) = cli.query {
        return run_once(&runtime, &client, &query);
    }

    log::info!(
        "starting {} v{} against {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, runtime.handle(), client);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("exited with error: {e}");
        eprintln!("Error: {e}");
    }
    result
}

/// Logs go to a file so records never corrupt the terminal UI.
fn init_logging() {
    let target: Box<dyn io::Write + Send> = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("rush-console.log")
    {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(target))
        .init();
}

fn run_once(runtime: &tokio::runtime::Runtime, client: &QueryClient, query: &str) -> Result<()> {
    let outcome = runtime.block_on(client.ask(query));
    let failed = outcome.is_err();
    if let Err(err) = &outcome {
        log::warn!("query failed: {err}");
    }

    println!("{}", app::display_text(outcome));
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    handle: &tokio::runtime::Handle,
    client: QueryClient,
) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        while let Ok(AppEvent::Finished {
            generation,
            outcome,
        }) = rx.try_recv()
        {
            app.finish_request(generation, outcome);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, &mut app, handle, &client, &tx);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(
    key: KeyEvent,
    app: &mut App,
    handle: &tokio::runtime::Handle,
    client: &QueryClient,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        // Submission is suppressed while a request is in flight.
        KeyCode::Enter if !app.loading => {
            let generation = app.begin_request();
            let client = client.clone();
            let tx = tx.clone();
            let query = app.query.clone();
            handle.spawn(async move {
                let outcome = client.ask(&query).await;
                let _ = tx.send(AppEvent::Finished {
                    generation,
                    outcome,
                });
            });
        }
        KeyCode::Enter => {}
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Up => app.scroll_up(),
        KeyCode::Down => app.scroll_down(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}
