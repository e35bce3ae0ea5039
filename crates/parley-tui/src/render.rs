use parley_core::HistoryBackend;
use ratatui::{style::Style, widgets::Block, Frame};

use crate::ui;
use crate::ui::App;

pub(crate) fn render<B: HistoryBackend>(f: &mut Frame, app: &App<B>) {
    // Fill entire frame with app background (pure black)
    let bg_block = Block::default().style(Style::default().bg(ui::theme::BG_APP));
    f.render_widget(bg_block, f.area());

    ui::views::render_home(f, app, f.area());

    if let Some(view) = app.dialog_view() {
        ui::views::render_new_chat_dialog(f, f.area(), &view);
    }
}
