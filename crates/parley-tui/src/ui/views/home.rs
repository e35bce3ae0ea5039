use parley_core::HistoryBackend;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::components::render_statusbar;
use crate::ui::{layout, theme, App};

/// Hint bar entries: key + label
fn hint_line(entries: &[(&str, String)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, (key, label)) in entries.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" · ", theme::hint_text()));
        }
        spans.push(Span::styled(key.to_string(), theme::hint_key()));
        spans.push(Span::styled(format!(" {}", label), theme::hint_text()));
    }
    Line::from(spans)
}

pub fn render_home<B: HistoryBackend>(f: &mut Frame, app: &App<B>, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(layout::HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(layout::FOOTER_HEIGHT),
        Constraint::Length(layout::STATUSBAR_HEIGHT),
    ])
    .split(area);

    // Header: app title left, backend right
    let header_area = layout::with_content_padding(chunks[0]);
    let header = Layout::horizontal([Constraint::Min(0), Constraint::Min(0)]).split(header_area);
    f.render_widget(
        Paragraph::new(Span::styled(app.t("app.title"), theme::header_title())),
        header[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            app.backend_label.as_str(),
            Style::default().fg(theme::TEXT_MUTED),
        ))
        .alignment(Alignment::Right),
        header[1],
    );

    let body = Paragraph::new(app.t("app.emptyHistory"))
        .style(Style::default().fg(theme::TEXT_DIM))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let body_area = layout::with_content_padding(chunks[1]);
    let centered = Rect::new(
        body_area.x,
        body_area.y + body_area.height / 2,
        body_area.width,
        body_area.height - body_area.height / 2,
    );
    f.render_widget(body, centered);

    // The new-chat button's tooltip doubles as its hint label
    let quit_label = if app.pending_quit {
        app.t("app.quitPending")
    } else {
        app.t("app.quit")
    };
    let hints = hint_line(&[
        ("n", app.t("navigation.newChat.dialog.tooltip")),
        ("q", quit_label),
    ]);
    f.render_widget(Paragraph::new(hints), layout::with_content_padding(chunks[2]));

    let session_label = format!("{} {} ", app.t("app.session"), app.session_number());
    render_statusbar(f, chunks[3], app.current_toast(), &session_label);
}
