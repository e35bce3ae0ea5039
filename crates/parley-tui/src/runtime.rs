use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use parley_core::HistoryBackend;
use std::time::Duration;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, Tui};

pub(crate) async fn run_app<B: HistoryBackend>(terminal: &mut Tui, app: &mut App<B>) -> Result<()> {
    let mut event_stream = EventStream::new();

    // Drives toast expiry
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                            if app.pending_quit {
                                app.quit();
                            } else {
                                app.arm_quit();
                            }
                        } else {
                            app.pending_quit = false;
                            handle_key(app, key);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "terminal event stream failed");
                        return Err(e.into());
                    }
                    None => app.quit(),
                }
            }

            // Clear-history request finished
            outcome = app.flow_mut().next_outcome() => {
                app.resolve_request(outcome);
            }

            _ = tick_interval.tick() => {
                app.tick();
            }
        }
    }

    Ok(())
}
