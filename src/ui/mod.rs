//! UI module for rendering the TUI

mod components;
mod editor_pane;
mod forms;
mod layout;
mod preview;

use crate::app::App;
use components::{render_error_dialog, render_receipt_dialog};
use ratatui::Frame;

pub use layout::editor_text_height;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (editor_area, preview_area) = layout::create_layout(frame.area());

    editor_pane::draw(frame, editor_area, app);
    preview::draw(frame, preview_area, app);
    layout::draw_status_bar(frame, app);

    // Dialogs draw last so they overlay everything
    if let Some(receipt) = &app.state.receipt {
        render_receipt_dialog(frame, receipt);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
