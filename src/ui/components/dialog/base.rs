//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Used for both the title and the border
    pub accent: Color,
    /// Message content, `\n` separated. Indentation is preserved.
    pub message: &'a str,
    pub hint: Vec<Span<'a>>,
    pub max_width: u16,
}

/// "Press Enter or Esc to dismiss" hint spans
pub fn dismiss_hint<'a>() -> Vec<Span<'a>> {
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    vec![
        Span::raw("Press "),
        Span::styled("Enter", key),
        Span::raw(" or "),
        Span::styled("Esc", key),
        Span::raw(" to dismiss"),
    ]
}

/// Center a `width` x `height` box inside `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let area = frame.area();
    // borders plus one column of padding each side
    let chrome = 4u16;
    let inner_width = usize::from(config.max_width.saturating_sub(chrome)).max(1);

    let lines = hard_wrap(config.message, inner_width);
    let hint_width: usize = config.hint.iter().map(|s| s.content.chars().count()).sum();
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain([config.title.chars().count() + 2, hint_width])
        .max()
        .unwrap_or(0);

    // message + blank + hint, plus borders
    let (width, height) = dialog_size(content_width, lines.len(), chrome);
    let dialog_area = centered(area, width, height);

    frame.render_widget(Clear, dialog_area);

    let mut content: Vec<Line> = lines.into_iter().map(Line::from).collect();
    content.push(Line::from(""));
    content.push(Line::from(config.hint));

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(config.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(config.accent))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    let padded = Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(2),
        ..inner
    };
    frame.render_widget(Paragraph::new(content), padded);
}

/// Outer dialog size for the given content, saturating at `u16::MAX`
fn dialog_size(content_width: usize, line_count: usize, chrome: u16) -> (u16, u16) {
    let width = u16::try_from(content_width)
        .unwrap_or(u16::MAX)
        .saturating_add(chrome);
    let height = u16::try_from(line_count)
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    (width, height)
}

/// Split text into rows of at most `width` chars, breaking long lines
/// without touching their leading whitespace.
fn hard_wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            rows.push(chunk.iter().collect());
        }
    }
    rows
}
