//! Layout components (panes and status bar)

use crate::app::App;
use crate::platform::{FOCUS_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{Focus, Phase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rows under the editor text reserved for the diagnostic
pub const DIAGNOSTIC_HEIGHT: u16 = 2;

/// Split the screen into editor and preview panes above the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    (panes[0], panes[1])
}

/// Lines of schema text visible in the editor for a terminal of `height` rows
pub fn editor_text_height(height: u16) -> usize {
    // status bar, pane borders, diagnostic
    usize::from(height.saturating_sub(1 + 2 + DIAGNOSTIC_HEIGHT))
}

fn phase_indicator(phase: Phase) -> Span<'static> {
    match phase {
        Phase::DraftValidSchema => Span::styled(" ● valid ", Style::default().fg(Color::Green)),
        Phase::DraftInvalidSchema => Span::styled(" ● invalid ", Style::default().fg(Color::Red)),
        Phase::NoSchema => Span::styled(" ○ no schema ", Style::default().fg(Color::Yellow)),
    }
}

fn focus_hints(focus: Focus) -> String {
    match focus {
        Focus::Editor => format!("type to edit  {FOCUS_SHORTCUT}:preview  {SUBMIT_SHORTCUT}:submit"),
        Focus::Preview => format!(
            "Tab:next  ←/→:choose  Enter:submit on button  {SUBMIT_SHORTCUT}:submit  Esc:editor"
        ),
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![
        phase_indicator(app.state.preview.phase()),
        Span::styled(
            format!("[{}] ", app.state.focus.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            focus_hints(app.state.focus),
            Style::default().fg(Color::Gray),
        ),
    ];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let right = format!(" → {}  ^C:quit ", app.sink_name());
    let width = u16::try_from(right.chars().count())
        .unwrap_or(u16::MAX)
        .min(area.width);
    let right_area = Rect {
        x: area.width.saturating_sub(width),
        y: status_area.y,
        width,
        height: 1,
    };
    let right = Paragraph::new(right).style(Style::default().fg(Color::White).bg(Color::DarkGray));
    frame.render_widget(right, right_area);
}
