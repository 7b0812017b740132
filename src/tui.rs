//! Interactive terminal front end
//!
//! Draws the latest session snapshot and forwards key presses to the runtime
//! as events. The runtime stays the single owner of the conversation.

mod input;
mod view;

use crate::chat::Event;
use crate::runtime::ChatHandle;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as TermEvent, EventStream,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use futures::StreamExt;
use input::{map_key, paste_edit, InputAction};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use view::UiState;

const TICK: Duration = Duration::from_millis(300);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the chat window until the user quits
pub async fn run(handle: ChatHandle) -> io::Result<()> {
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let mut terminal = setup_terminal(enhanced)?;

    let result = event_loop(&mut terminal, &handle).await;

    handle.shutdown();
    restore_terminal(&mut terminal, enhanced)?;
    result
}

fn setup_terminal(enhanced: bool) -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let entered = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).and_then(|()| {
        if enhanced {
            // Lets Shift+Enter be told apart from Enter
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )
        } else {
            Ok(())
        }
    });
    if let Err(e) = entered {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        return Err(e);
    }
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term, enhanced: bool) -> io::Result<()> {
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    terminal.show_cursor()
}

async fn event_loop(terminal: &mut Term, handle: &ChatHandle) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut view_rx = handle.subscribe();
    let mut ticker = tokio::time::interval(TICK);
    let mut ui = UiState::default();

    loop {
        let view = view_rx.borrow_and_update().clone();
        terminal.draw(|frame| view::render(frame, &view, &mut ui))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(TermEvent::Key(key))) => match map_key(key) {
                    Some(InputAction::Quit) => break,
                    Some(InputAction::Edit(edit)) => {
                        handle.send(Event::DraftEdited(edit)).await;
                    }
                    Some(InputAction::Submit) => {
                        handle.send(Event::Submit).await;
                    }
                    Some(InputAction::ScrollUp(lines)) => ui.scroll.scroll_up(lines),
                    Some(InputAction::ScrollDown(lines)) => ui.scroll.scroll_down(lines),
                    Some(InputAction::ScrollToBottom) => ui.scroll.to_bottom(),
                    None => {}
                },
                Some(Ok(TermEvent::Paste(text))) => {
                    if let Some(edit) = paste_edit(&text) {
                        handle.send(Event::DraftEdited(edit)).await;
                    }
                }
                // Resize and focus changes only need a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },

            changed = view_rx.changed() => {
                if changed.is_err() {
                    tracing::warn!("Session runtime stopped, closing window");
                    break;
                }
            }

            _ = ticker.tick() => {
                ui.tick = ui.tick.wrapping_add(1);
            }
        }
    }

    Ok(())
}
