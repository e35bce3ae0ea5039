pub mod modal_frame;
pub mod statusbar;

pub use modal_frame::{render_button_row, render_modal_frame, Button, ButtonStyle, ModalSize};
pub use statusbar::render_statusbar;
