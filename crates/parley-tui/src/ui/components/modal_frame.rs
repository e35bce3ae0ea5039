//! Centered dialog chrome: dimmed backdrop, panel, title row, button row

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::{layout, theme};

/// Upper bounds for a dialog panel
#[derive(Debug, Clone, Copy)]
pub struct ModalSize {
    pub max_width: u16,
    /// Fraction of the screen height, raised to the minimum dialog height
    pub height_ratio: f32,
}

impl Default for ModalSize {
    fn default() -> Self {
        Self {
            max_width: layout::DIALOG_MAX_WIDTH,
            height_ratio: layout::DIALOG_HEIGHT_RATIO,
        }
    }
}

/// Panel rectangle centered in `screen`
pub fn modal_area(screen: Rect, size: ModalSize) -> Rect {
    let width = size
        .max_width
        .min(screen.width.saturating_sub(layout::DIALOG_MARGIN * 2));
    let height = ((f32::from(screen.height) * size.height_ratio) as u16)
        .max(layout::DIALOG_MIN_HEIGHT)
        .min(screen.height);
    Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    )
}

struct Backdrop;

impl Widget for Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, theme::backdrop());
    }
}

/// Dim `screen`, draw the panel with its title row and return the padded
/// body area below the title.
pub fn render_modal_frame(
    f: &mut Frame,
    screen: Rect,
    size: ModalSize,
    title: &str,
    corner_hint: &str,
) -> Rect {
    f.render_widget(Backdrop, screen);

    let panel = modal_area(screen, size);
    f.render_widget(Clear, panel);
    f.render_widget(Block::default().style(theme::panel()), panel);

    // One blank row above and below the content
    let inner = layout::with_dialog_padding(Rect::new(
        panel.x,
        panel.y + 1,
        panel.width,
        panel.height.saturating_sub(2),
    ));
    let [title_row, _, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    let gap = (title_row.width as usize).saturating_sub(title.width() + corner_hint.width());
    let title_line = Line::from(vec![
        Span::styled(title, theme::dialog_title()),
        Span::raw(" ".repeat(gap)),
        Span::styled(corner_hint, theme::dialog_hint()),
    ]);
    f.render_widget(Paragraph::new(title_line), title_row);

    body
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Plain,
    Primary,
    Disabled,
}

#[derive(Debug, Clone, Copy)]
pub struct Button<'a> {
    pub label: &'a str,
    pub key: &'a str,
    pub style: ButtonStyle,
}

/// Buttons right-aligned on one row, each drawn as a key cap and a label
pub fn render_button_row(f: &mut Frame, area: Rect, buttons: &[Button<'_>]) {
    let mut spans = Vec::with_capacity(buttons.len() * 3);
    for (idx, button) in buttons.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        let (key_style, label_style) = match button.style {
            ButtonStyle::Plain => (theme::button_key(), theme::button()),
            ButtonStyle::Primary => (theme::button_key_primary(), theme::button_primary()),
            ButtonStyle::Disabled => (theme::button_disabled(), theme::button_disabled()),
        };
        spans.push(Span::styled(format!(" {} ", button.key), key_style));
        spans.push(Span::styled(format!(" {}", button.label), label_style));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}
