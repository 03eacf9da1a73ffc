pub mod app;
pub mod editor;
pub mod input;
mod message;
pub mod pager;
mod ui;

use crate::config::Config;
use crate::store::ApiStore;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use app::{App, ModalState, View};
pub use message::Message;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Spinner advance and store-event poll cadence.
const TICK: Duration = Duration::from_millis(250);

/// Bring up the dashboard for one workspace and run it until quit.
pub async fn run(
    config: Config,
    store: Arc<dyn ApiStore>,
    workspace_uuid: String,
    language_filter: Option<String>,
) -> Result<()> {
    if !io::stdout().is_terminal() {
        anyhow::bail!("bountyboard requires an interactive terminal");
    }

    let mut terminal = init_terminal()?;

    let mut app = App::new(config, store, workspace_uuid);
    app.language_filter = language_filter;
    // First paint happens before any data arrives; the views show their
    // loading placeholders until the fetches land.
    app.refresh_all();

    let result = event_loop(&mut terminal, &mut app).await;

    restore_terminal(&mut terminal)?;
    result
}

fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    let mut input_state = input::InputState::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK.saturating_sub(last_tick.elapsed()))? {
            if let Event::Key(key) = event::read()? {
                let msg = input::dispatch(app, &mut input_state, key);
                if app.update(msg).await? {
                    return Ok(());
                }
            }
        }

        // A half-typed chord expires instead of blocking the loop
        if input_state.has_timed_out() {
            input_state.clear();
        }

        if last_tick.elapsed() >= TICK {
            app.tick_spinner();
            app.poll_store_events();
            last_tick = Instant::now();
        }
    }
}
