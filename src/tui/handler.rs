//! Terminal lifecycle and the form's event loop.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use is_terminal::IsTerminal;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::{
    app::App,
    events::TuiEvent,
    ui::render_ui,
};
use crate::client::PlaygroundClient;
use crate::config::Config;
use crate::language::Language;
use crate::session::{EditOp, Effect, SessionEvent};

/// Run the interactive playground form.
pub async fn run_tui(language: Language) -> Result<()> {
    if !io::stdout().is_terminal() {
        anyhow::bail!("the playground form requires a terminal");
    }

    // Fail on missing configuration before touching the terminal.
    let cfg = Config::load();
    let client = PlaygroundClient::from_config(&cfg)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(language);
    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    // Initial mount kicks off the first defaults fetch.
    if let Some(effect) = app.apply(SessionEvent::Started) {
        spawn_effect(effect, client.clone(), event_tx.clone());
    }

    let result = run_app(&mut terminal, &mut app, client, event_tx, event_rx).await;

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: PlaygroundClient,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Keyboard poller on a blocking task feeding the shared channel.
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || loop {
        if input_tx.is_closed() {
            break; // Receiver gone, the loop below has exited
        }
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if input_tx.send(TuiEvent::Key(key)).is_err() {
                    break; // Channel closed
                }
            }
        }
    });

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        if let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &client, &event_tx) {
                        break; // Quit requested
                    }
                }
                TuiEvent::DefaultsLoaded { language, result } => {
                    dispatch(
                        app,
                        SessionEvent::DefaultsLoaded { language, result },
                        &client,
                        &event_tx,
                    );
                }
                TuiEvent::RunFinished(outcome) => {
                    app.output_scroll = 0;
                    dispatch(app, SessionEvent::RunFinished(outcome), &client, &event_tx);
                }
            }
        }

        tokio::time::sleep(Duration::from_millis(16)).await;
    }
    Ok(())
}

/// Apply a session event and launch whatever effect it asks for.
fn dispatch(
    app: &mut App,
    event: SessionEvent,
    client: &PlaygroundClient,
    tx: &mpsc::UnboundedSender<TuiEvent>,
) {
    if let Some(effect) = app.apply(event) {
        spawn_effect(effect, client.clone(), tx.clone());
    }
}

fn spawn_effect(effect: Effect, client: PlaygroundClient, tx: mpsc::UnboundedSender<TuiEvent>) {
    tokio::spawn(async move {
        match effect {
            Effect::LoadDefaults(language) => {
                let result = client.fetch_defaults().await.map_err(|e| e.to_string());
                let _ = tx.send(TuiEvent::DefaultsLoaded { language, result });
            }
            Effect::Execute(req) => {
                let outcome = client.execute(&req).await;
                let _ = tx.send(TuiEvent::RunFinished(outcome));
            }
        }
    });
}

/// Handle one key press. Returns true when the user asked to quit.
fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    client: &PlaygroundClient,
    tx: &mpsc::UnboundedSender<TuiEvent>,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return true,
            KeyCode::Char('r') => {
                dispatch(app, SessionEvent::RunRequested, client, tx);
                return false;
            }
            _ => {}
        }
    }
    if key.code == KeyCode::F(5) {
        dispatch(app, SessionEvent::RunRequested, client, tx);
        return false;
    }

    if app.session.picker_open {
        match key.code {
            KeyCode::Up => app.picker_up(),
            KeyCode::Down => app.picker_down(),
            KeyCode::Enter => {
                let choice = app.picker_choice();
                dispatch(app, SessionEvent::LanguagePicked(choice), client, tx);
            }
            KeyCode::Esc => {
                app.apply(SessionEvent::PickerToggled);
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::BackTab => {
            app.cycle_focus();
            return false;
        }
        KeyCode::PageUp => {
            app.scroll_output_up();
            return false;
        }
        KeyCode::PageDown => {
            app.scroll_output_down();
            return false;
        }
        _ => {}
    }

    match app.focused_field() {
        None => {
            // Language selector: Tab is free to move focus here, since it
            // is not a text-entry control.
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
                app.open_picker();
            } else if key.code == KeyCode::Tab {
                app.cycle_focus();
            }
        }
        Some(field) => {
            let select = key.modifiers.contains(KeyModifiers::SHIFT);
            let op = match key.code {
                KeyCode::Tab => Some(EditOp::Indent),
                KeyCode::Enter => Some(EditOp::Newline),
                KeyCode::Backspace => Some(EditOp::Backspace),
                KeyCode::Delete => Some(EditOp::Delete),
                KeyCode::Left => Some(EditOp::Left { select }),
                KeyCode::Right => Some(EditOp::Right { select }),
                KeyCode::Up => Some(EditOp::Up { select }),
                KeyCode::Down => Some(EditOp::Down { select }),
                KeyCode::Home => Some(EditOp::Home { select }),
                KeyCode::End => Some(EditOp::End { select }),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(EditOp::Insert(c))
                }
                _ => None,
            };
            if let Some(op) = op {
                dispatch(app, SessionEvent::Edit(field, op), client, tx);
            }
        }
    }
    false
}
