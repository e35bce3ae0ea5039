// Palette and named styles shared by every view

use ratatui::style::{Color, Modifier, Style};

// Surfaces
pub const BG_APP: Color = Color::Rgb(0, 0, 0);
pub const BG_PANEL: Color = Color::Rgb(26, 27, 30);
/// Behind an open dialog
pub const BG_BACKDROP: Color = Color::Rgb(8, 8, 10);

// Text
pub const TEXT_PRIMARY: Color = Color::Rgb(222, 222, 222);
pub const TEXT_MUTED: Color = Color::Rgb(130, 132, 138);
pub const TEXT_DIM: Color = Color::Rgb(88, 90, 96);

// Accents
pub const ACCENT_PRIMARY: Color = Color::Rgb(97, 175, 239);
pub const ACCENT_SUCCESS: Color = Color::Rgb(120, 180, 110);
pub const ACCENT_WARNING: Color = Color::Rgb(229, 170, 100);
pub const ACCENT_DANGER: Color = Color::Rgb(235, 105, 105);

pub fn backdrop() -> Style {
    Style::default().bg(BG_BACKDROP).add_modifier(Modifier::DIM)
}

pub fn panel() -> Style {
    Style::default().bg(BG_PANEL)
}

pub fn dialog_title() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

/// Corner hint and the key legend under the buttons
pub fn dialog_hint() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dialog_body() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn dialog_error() -> Style {
    Style::default().fg(ACCENT_DANGER)
}

pub fn button() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn button_key() -> Style {
    Style::default().fg(TEXT_MUTED).add_modifier(Modifier::REVERSED)
}

/// The destructive action: clearing history
pub fn button_primary() -> Style {
    Style::default()
        .fg(ACCENT_DANGER)
        .add_modifier(Modifier::BOLD)
}

pub fn button_key_primary() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT_DANGER)
}

pub fn button_disabled() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
}

pub fn header_title() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn hint_key() -> Style {
    Style::default()
        .fg(ACCENT_WARNING)
        .add_modifier(Modifier::BOLD)
}

pub fn hint_text() -> Style {
    Style::default().fg(TEXT_MUTED)
}
