//! New-chat confirmation dialog
//!
//! Stateless: everything it shows comes from a [`ConfirmationSnapshot`], and
//! the only thing it produces is a [`DialogAction`] for the host to forward
//! to the flow.

use crossterm::event::{KeyCode, KeyEvent};
use parley_core::ConfirmationSnapshot;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::i18n::Translator;
use crate::ui::components::{
    render_button_row, render_modal_frame, Button, ButtonStyle, ModalSize,
};
use crate::ui::theme;

/// Events the dialog emits upward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    CloseRequested,
    ConfirmRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
}

/// Everything needed to draw the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChatDialogView {
    pub title: String,
    pub description: String,
    pub hint: String,
    pub error: Option<String>,
    pub cancel: ButtonView,
    pub confirm: ButtonView,
}

impl NewChatDialogView {
    /// `None` while the dialog is closed
    pub fn from_snapshot(snapshot: &ConfirmationSnapshot, t: &dyn Translator) -> Option<Self> {
        if !snapshot.is_open {
            return None;
        }

        let confirm_label = if snapshot.is_loading {
            t.translate("common.actions.loading")
        } else {
            t.translate("common.actions.confirm")
        };

        Some(Self {
            title: t.translate("navigation.newChat.dialog.title"),
            description: t.translate("navigation.newChat.dialog.description"),
            hint: t.translate("app.dialogHint"),
            error: snapshot.error.clone(),
            cancel: ButtonView {
                label: t.translate("common.actions.cancel"),
                disabled: snapshot.is_loading,
            },
            confirm: ButtonView {
                label: confirm_label,
                disabled: snapshot.is_loading,
            },
        })
    }

    /// Map a key press to an action; disabled buttons swallow their keys
    pub fn action_for_key(&self, key: KeyEvent) -> Option<DialogAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') if !self.cancel.disabled => {
                Some(DialogAction::CloseRequested)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') if !self.confirm.disabled => {
                Some(DialogAction::ConfirmRequested)
            }
            _ => None,
        }
    }
}

impl ButtonView {
    fn as_button<'a>(&'a self, key: &'a str, primary: bool) -> Button<'a> {
        let style = match (self.disabled, primary) {
            (true, _) => ButtonStyle::Disabled,
            (false, true) => ButtonStyle::Primary,
            (false, false) => ButtonStyle::Plain,
        };
        Button {
            label: &self.label,
            key,
            style,
        }
    }
}

/// Render the dialog on top of whatever is already in the frame
pub fn render_new_chat_dialog(f: &mut Frame, area: Rect, view: &NewChatDialogView) {
    let body = render_modal_frame(f, area, ModalSize::default(), &view.title, "esc");

    let error_height = if view.error.is_some() { 2 } else { 0 };
    let [description_area, error_area, _, buttons_area, hint_area] = Layout::vertical([
        Constraint::Min(2),
        Constraint::Length(error_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(body);

    let description = Paragraph::new(view.description.as_str())
        .style(theme::dialog_body())
        .wrap(Wrap { trim: true });
    f.render_widget(description, description_area);

    if let Some(error) = &view.error {
        let error = Paragraph::new(error.as_str())
            .style(theme::dialog_error())
            .wrap(Wrap { trim: true });
        f.render_widget(error, error_area);
    }

    let buttons = [
        view.cancel.as_button("Esc", false),
        view.confirm.as_button("Enter", true),
    ];
    render_button_row(f, buttons_area, &buttons);

    let hint = Paragraph::new(view.hint.as_str()).style(theme::dialog_hint());
    f.render_widget(hint, hint_area);
}
