use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use directory_client::{ClientConfig, HttpClient};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use directory_tui::app::{Action, ApiEvent, App};
use directory_tui::{logger, requests, ui};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration (dotenv + env overrides)
    let config = ClientConfig::from_env();

    // 2. File logging; the terminal belongs to the screen
    logger::init_logger()?;
    tracing::info!("Staffdeck starting, service at {}", config.base_url);

    let client = config.build_http_client();

    // 3. Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_app(&mut terminal, &mut app, client).await;

    // 4. Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: HttpClient,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::channel::<ApiEvent>(8);

    // Initial load: one full read on mount.
    app.busy = true;
    dispatch(Action::Refresh, &client, &tx);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            && let Some(action) = app.handle_key(key)
        {
            if matches!(action, Action::Quit) {
                return Ok(());
            }
            dispatch(action, &client, &tx);
        }

        // Fold in finished request chains (non-blocking).
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        app.tick();
    }
}

/// Spawn the request chain for an action; results come back over `tx`.
fn dispatch(action: Action, client: &HttpClient, tx: &mpsc::Sender<ApiEvent>) {
    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        let event = match action {
            Action::Refresh => requests::refresh(&client).await,
            Action::Submit { mode, employee } => requests::save(&client, mode, employee).await,
            Action::Delete(id) => requests::delete(&client, id).await,
            Action::Quit => return,
        };

        if tx.send(event).await.is_err() {
            tracing::warn!("UI loop gone; dropping request result");
        }
    });
}
