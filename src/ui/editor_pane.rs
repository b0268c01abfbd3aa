//! Schema text editor pane

use super::layout::DIAGNOSTIC_HEIGHT;
use crate::app::App;
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const GUTTER_WIDTH: u16 = 5;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == Focus::Editor;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Schema ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(DIAGNOSTIC_HEIGHT)])
        .split(inner);

    let editor = &app.state.editor;
    let (cursor_row, cursor_col) = editor.cursor();
    let offset = editor.scroll_offset;
    let height = usize::from(chunks[0].height);

    let lines: Vec<Line> = editor
        .lines()
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, text)| {
            let number_style = if i == cursor_row {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(format!("{:>4} ", i + 1), number_style),
                Span::raw(text.as_str()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[0]);

    draw_diagnostic(frame, chunks[1], app);

    let no_dialog = app.state.receipt.is_none() && !app.state.has_errors();
    if focused && no_dialog && cursor_row >= offset && cursor_row < offset + height {
        let x = chunks[0]
            .x
            .saturating_add(GUTTER_WIDTH)
            .saturating_add(u16::try_from(cursor_col).unwrap_or(u16::MAX));
        let y = chunks[0].y + (cursor_row - offset) as u16;
        if x < chunks[0].right() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn draw_diagnostic(frame: &mut Frame, area: Rect, app: &App) {
    let line = match app.state.preview.diagnostic() {
        Some(diagnostic) => Line::from(vec![
            Span::styled(
                "✗ ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(diagnostic.message(), Style::default().fg(Color::Red)),
        ]),
        None if app.state.preview.schema().is_some() => Line::from(Span::styled(
            "✓ schema is valid",
            Style::default().fg(Color::Green),
        )),
        None => Line::from(""),
    };
    let paragraph = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}
