// Global status bar displayed at the very bottom of the app
// Shows the current toast on the left and the session number on the right

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::toast::{Toast, ToastKind};
use crate::ui::theme;

fn kind_color(kind: ToastKind) -> ratatui::style::Color {
    match kind {
        ToastKind::Success => theme::ACCENT_SUCCESS,
        ToastKind::Warning => theme::ACCENT_WARNING,
    }
}

/// Truncate to `max` display columns, adding an ellipsis when cut
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Render the status bar. `session_label` is right-aligned (e.g. "Session 2 ").
pub fn render_statusbar(
    f: &mut Frame,
    area: Rect,
    toast: Option<&Toast>,
    session_label: &str,
) {
    let label_width = (session_label.width() + 1) as u16;
    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(label_width)]).split(area);

    if let Some(toast) = toast {
        let available = chunks[0].width.saturating_sub(3) as usize;
        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!(
                    "{} {}",
                    toast.kind.icon(),
                    truncate_to_width(&toast.message, available)
                ),
                Style::default().fg(kind_color(toast.kind)),
            ),
        ]);
        f.render_widget(Paragraph::new(line), chunks[0]);
    }

    let session = Paragraph::new(Span::styled(
        session_label,
        Style::default().fg(theme::TEXT_MUTED),
    ));
    f.render_widget(session, chunks[1]);
}
