//! Field rendering utilities for the form preview

use crate::schema::WidgetKind;
use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a text area shows inside its border
const TEXT_AREA_ROWS: u16 = 4;

/// Total rows a field occupies, including its error line
pub fn field_height(field: &FormField) -> u16 {
    let body = match field.widget {
        WidgetKind::TextInput | WidgetKind::EmailInput | WidgetKind::Dropdown => 1,
        WidgetKind::TextArea => TEXT_AREA_ROWS,
        WidgetKind::RadioGroup => u16::try_from(field.options().len()).unwrap_or(u16::MAX),
    };
    let error = u16::from(field.error().is_some());
    body.saturating_add(2).saturating_add(error)
}

/// First field index to draw so the active row stays visible.
///
/// `active` may point one past the last field (the submit row); the last
/// field is kept in view then.
pub fn first_visible(heights: &[u16], active: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let target = active.min(heights.len() - 1);
    let available = usize::from(available);
    let mut used: usize = heights[..=target].iter().map(|&h| usize::from(h)).sum();
    let mut start = 0;
    while start < target && used > available {
        used -= usize::from(heights[start]);
        start += 1;
    }
    start
}

fn border_style(field: &FormField, is_active: bool, enabled: bool) -> Style {
    if !enabled {
        Style::default().fg(Color::DarkGray)
    } else if field.error().is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn title(field: &FormField) -> String {
    let marker = if field.field.required() { " *" } else { "" };
    let kind = match field.widget {
        WidgetKind::EmailInput => " (email)",
        _ => "",
    };
    format!(" {}{}{} ", field.label(), marker, kind)
}

/// Draw one form field with its inline error
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, enabled: bool) {
    let error_rows = u16::from(field.error().is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(error_rows)])
        .split(area);

    let text_style = if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if is_active && enabled { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let lines: Vec<Line> = match field.widget {
        WidgetKind::TextInput | WidgetKind::EmailInput | WidgetKind::TextArea => {
            let value = field.display_value();
            if value.is_empty() {
                let placeholder = field.field.placeholder().unwrap_or("");
                vec![Line::from(vec![
                    Span::styled(cursor, cursor_style),
                    Span::styled(
                        placeholder.to_string(),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ])]
            } else {
                let mut lines: Vec<Line> = value
                    .split('\n')
                    .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
                    .collect();
                if let Some(last) = lines.last_mut() {
                    last.spans.push(Span::styled(cursor, cursor_style));
                }
                // Keep the tail of long text areas visible
                let rows = usize::from(chunks[0].height.saturating_sub(2));
                if lines.len() > rows {
                    lines.drain(..lines.len() - rows);
                }
                lines
            }
        }
        WidgetKind::Dropdown => {
            let shown = match field.display_value() {
                v if v.is_empty() => "choose…".to_string(),
                v => v,
            };
            let arrow = if is_active && enabled {
                cursor_style
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![Line::from(vec![
                Span::styled("◀ ", arrow),
                Span::styled(shown, text_style),
                Span::styled(" ▶", arrow),
            ])]
        }
        WidgetKind::RadioGroup => {
            let selected = field.selected_index();
            field
                .options()
                .iter()
                .enumerate()
                .map(|(i, option)| {
                    let mark = if selected == Some(i) { "(•) " } else { "( ) " };
                    Line::from(Span::styled(format!("{mark}{}", option.label), text_style))
                })
                .collect()
        }
    };

    let block = Block::default()
        .title(title(field))
        .borders(Borders::ALL)
        .border_style(border_style(field, is_active, enabled));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        chunks[0],
    );

    if let Some(message) = field.error() {
        let error = Paragraph::new(Line::from(Span::styled(
            format!(" ✗ {message}"),
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate;

    fn fields(text: &str) -> Vec<FormField> {
        validate(text)
            .unwrap()
            .fields()
            .iter()
            .map(FormField::new)
            .collect()
    }

    #[test]
    fn test_heights_per_widget() {
        let f = fields(
            r#"{"formTitle":"T","fields":[
                {"id":"a","type":"text","label":"A"},
                {"id":"b","type":"textarea","label":"B"},
                {"id":"c","type":"radio","label":"C","options":[{"value":"x","label":"X"},{"value":"y","label":"Y"},{"value":"z","label":"Z"}]},
                {"id":"d","type":"select","label":"D","options":[{"value":"x","label":"X"}]}
            ]}"#,
        );
        let heights: Vec<_> = f.iter().map(field_height).collect();
        assert_eq!(heights, vec![3, 6, 5, 3]);
    }

    #[test]
    fn test_error_adds_a_row() {
        let mut f = fields(r#"{"formTitle":"T","fields":[{"id":"a","type":"text","label":"A","required":true}]}"#);
        f[0].revalidate();
        assert_eq!(field_height(&f[0]), 4);
    }

    #[test]
    fn test_first_visible_starts_at_zero_when_it_fits() {
        assert_eq!(first_visible(&[3, 3, 3], 2, 9), 0);
    }

    #[test]
    fn test_first_visible_scrolls_to_active() {
        assert_eq!(first_visible(&[3, 3, 3, 3], 3, 6), 2);
        assert_eq!(first_visible(&[3, 3, 3, 3], 1, 6), 0);
    }

    #[test]
    fn test_first_visible_submit_row_keeps_last_field() {
        assert_eq!(first_visible(&[3, 3, 3], 3, 3), 2);
    }

    #[test]
    fn test_huge_radio_group_height_saturates() {
        let options: Vec<String> = (0..70_000)
            .map(|i| format!(r#"{{"value":"v{i}","label":"L{i}"}}"#))
            .collect();
        let f = fields(&format!(
            r#"{{"formTitle":"T","fields":[{{"id":"r","type":"radio","label":"R","options":[{}]}}]}}"#,
            options.join(",")
        ));
        assert_eq!(field_height(&f[0]), u16::MAX);
    }

    #[test]
    fn test_first_visible_long_form_submit_row() {
        let heights = vec![6u16; 11_000];
        assert_eq!(first_visible(&heights, 11_000, 30), 10_995);
        assert_eq!(first_visible(&[u16::MAX, u16::MAX, 3], 3, 10), 2);
    }

    #[test]
    fn test_first_visible_oversized_field_is_still_drawn() {
        assert_eq!(first_visible(&[3, 20], 1, 5), 1);
        assert_eq!(first_visible(&[], 0, 5), 0);
    }
}
