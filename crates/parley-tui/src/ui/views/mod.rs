pub mod home;
pub mod new_chat_dialog;

pub use home::render_home;
pub use new_chat_dialog::{render_new_chat_dialog, DialogAction, NewChatDialogView};
