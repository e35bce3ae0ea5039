use crossterm::event::{KeyCode, KeyEvent};
use parley_core::HistoryBackend;

use crate::ui::App;

pub(crate) fn handle_key<B: HistoryBackend>(app: &mut App<B>, key: KeyEvent) {
    // The dialog owns the keyboard while it is open
    if let Some(view) = app.dialog_view() {
        if let Some(action) = view.action_for_key(key) {
            app.handle_dialog_action(action);
        }
        return;
    }

    match key.code {
        KeyCode::Char('n') => app.open_new_chat_dialog(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.dismiss_toast(),
        _ => {}
    }
}
