// Spacing constants and padding helpers

use ratatui::layout::Rect;

/// Columns kept free on each side of the home screen content
pub const CONTENT_PADDING_H: u16 = 2;

/// Columns kept free on each side inside a dialog panel
pub const DIALOG_PADDING_H: u16 = 2;

pub const HEADER_HEIGHT: u16 = 2;
pub const FOOTER_HEIGHT: u16 = 1;
pub const STATUSBAR_HEIGHT: u16 = 1;

pub const DIALOG_MAX_WIDTH: u16 = 60;
/// Share of the screen height a dialog asks for
pub const DIALOG_HEIGHT_RATIO: f32 = 0.4;
pub const DIALOG_MIN_HEIGHT: u16 = 10;
/// Columns left visible on each side of a dialog on narrow screens
pub const DIALOG_MARGIN: u16 = 2;

/// Shrink `area` by `padding` columns on both sides
pub fn pad_x(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding.min(area.width),
        width: area.width.saturating_sub(padding * 2),
        ..area
    }
}

pub fn with_content_padding(area: Rect) -> Rect {
    pad_x(area, CONTENT_PADDING_H)
}

pub fn with_dialog_padding(area: Rect) -> Rect {
    pad_x(area, DIALOG_PADDING_H)
}
