//! Submission receipt dialog

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use ratatui::{style::Color, Frame};

/// Show the submitted values after a successful submit
pub fn render_receipt_dialog(frame: &mut Frame, receipt: &str) {
    render_dialog(
        frame,
        DialogConfig {
            title: "Submitted",
            accent: Color::Green,
            message: receipt,
            hint: dismiss_hint(),
            max_width: 72,
        },
    );
}
