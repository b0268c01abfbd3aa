//! Live form preview pane

use super::components::{render_button, BUTTON_HEIGHT};
use super::forms::{draw_field, field_height, first_visible};
use crate::app::App;
use crate::state::{Focus, FormState, Phase};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the submit panel on the right
const ACTION_PANEL_WIDTH: u16 = 22;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == Focus::Preview;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(" Preview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let preview = &app.state.preview;
    let Some(form) = preview.form() else {
        draw_placeholder(frame, inner, preview.phase());
        return;
    };
    let editable = !preview.is_retained();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(ACTION_PANEL_WIDTH)])
        .split(inner);

    let header_height = if editable { 3 } else { 4 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(columns[0]);

    draw_header(frame, rows[0], form, editable);
    draw_fields(frame, rows[1], form, focused && editable, editable);
    draw_action_panel(frame, columns[1], app, form, focused, editable);
}

fn draw_placeholder(frame: &mut Frame, area: Rect, phase: Phase) {
    let message = match phase {
        Phase::NoSchema => "Waiting for a valid schema.\n\nEdit the text on the left.",
        _ => "No form to show.\n\nFix the schema on the left to see the preview.",
    };
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_header(frame: &mut Frame, area: Rect, form: &FormState, editable: bool) {
    let mut lines = vec![
        Line::from(Span::styled(
            form.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            form.description.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];
    if !editable {
        lines.push(Line::from(Span::styled(
            "Showing last valid schema (read-only)",
            Style::default().fg(Color::Yellow),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &FormState, show_active: bool, enabled: bool) {
    let heights: Vec<u16> = form.fields.iter().map(field_height).collect();
    let start = first_visible(&heights, form.active_field_index, area.height);

    let mut y = area.y;
    for (index, field) in form.fields.iter().enumerate().skip(start) {
        let remaining = area.bottom().saturating_sub(y);
        if remaining == 0 {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: heights[index].min(remaining),
        };
        let is_active = show_active && index == form.active_field_index;
        draw_field(frame, field_area, field, is_active, enabled);
        y += field_area.height;
    }
}

fn draw_action_panel(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    form: &FormState,
    focused: bool,
    editable: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    render_button(
        frame,
        chunks[1],
        "Submit",
        focused && editable && form.is_submit_row_active(),
        editable,
        form.is_submittable(),
    );

    let mut summary = Vec::new();
    let invalid = form.invalid_count();
    if invalid > 0 {
        summary.push(Line::from(Span::styled(
            format!(" {invalid} invalid"),
            Style::default().fg(Color::Red),
        )));
    } else if form.is_submittable() {
        summary.push(Line::from(Span::styled(
            " Ready to submit",
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(last) = app.state.preview.last_submission() {
        summary.push(Line::from(""));
        summary.push(Line::from(Span::styled(
            format!(" Last submit: {} values", last.len()),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(summary).wrap(Wrap { trim: false }), chunks[2]);
}
