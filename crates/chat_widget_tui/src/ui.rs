use chat_widget_client::{Message, Sender};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

const SEND_LABEL: &str = "Enviar";
const SEND_BUTTON_WIDTH: u16 = 12;
/// Input rows shown before the box stops growing.
const MAX_INPUT_ROWS: u16 = 5;

/// Style for a message, built from its style classes.
pub fn message_style(message: &Message) -> Style {
    message
        .classes()
        .into_iter()
        .fold(Style::default(), |style, class| match class.as_str() {
            "user-message" => style.fg(Color::Cyan),
            "bot-message" => style.fg(Color::Yellow),
            "loading" => style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            _ => style,
        })
}

/// Word-wrap one source line to rows of at most `width` chars. Words longer
/// than a row are broken mid-word.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        for c in word.chars() {
            if current_len == width {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(c);
            current_len += 1;
        }
    }
    rows.push(current);
    rows
}

/// Transcript rows pre-wrapped to `width`: user messages right-aligned, bot
/// messages left, blank row between messages. One `Line` is one screen row.
fn transcript_lines(messages: &[&Message], width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, msg) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let style = message_style(msg);
        let alignment = match msg.sender {
            Sender::User => Alignment::Right,
            Sender::Bot => Alignment::Left,
        };
        // Text is shown verbatim; only line breaks are added.
        for text_line in msg.text.split('\n') {
            for row in wrap_line(text_line, width as usize) {
                lines.push(Line::from(Span::styled(row, style)).alignment(alignment));
            }
        }
    }
    lines
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let input_rows = (app.panel().input().split('\n').count() as u16).clamp(1, MAX_INPUT_ROWS);
    let [chat_area, bottom_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(input_rows + 2)]).areas(area);
    let [input_area, button_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SEND_BUTTON_WIDTH),
    ])
    .areas(bottom_area);

    app.send_button_area = Some(button_area);

    render_messages(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_send_button(app, frame, button_area);
}

fn render_messages(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Chat: {} ", app.client.url()));

    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2);
    app.chat_height = inner_height;

    if app.panel().is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "Faça uma pergunta...",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let messages: Vec<&Message> = app.panel().messages().collect();
    let lines = transcript_lines(&messages, inner_width);

    // Keep the newest message in view unless the user scrolled back.
    let total_rows = lines.len().min(u16::MAX as usize) as u16;
    let max_scroll = total_rows.saturating_sub(inner_height);
    app.panel_mut().clamp_scroll(max_scroll);
    let top = max_scroll - app.panel().scroll_from_bottom();

    let chat = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((top, 0));
    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus() == Focus::Input;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Mensagem (Enter envia, Shift+Enter quebra linha) ");

    let panel = app.panel();
    let input = panel.input();

    // Cursor row/column in chars.
    let before: String = input.chars().take(panel.cursor()).collect();
    let cursor_row = before.matches('\n').count() as u16;
    let cursor_col = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) as u16;

    let inner_height = area.height.saturating_sub(2);
    let first_row = (cursor_row + 1).saturating_sub(inner_height);

    let paragraph = Paragraph::new(input.to_string())
        .style(Style::default().fg(Color::Cyan))
        .block(block)
        .scroll((first_row, 0));
    frame.render_widget(paragraph, area);

    if focused {
        let max_x = area.x + area.width.saturating_sub(2);
        frame.set_cursor_position((
            (area.x + 1 + cursor_col).min(max_x),
            area.y + 1 + cursor_row - first_row,
        ));
    }
}

fn render_send_button(app: &App, frame: &mut Frame, area: Rect) {
    let enabled = app.panel().send_enabled();
    let focused = app.focus() == Focus::SendButton;

    let label_style = if enabled {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    let border_color = match (enabled, focused) {
        (false, _) => Color::DarkGray,
        (true, true) => Color::Yellow,
        (true, false) => Color::Green,
    };

    let button = Paragraph::new(Span::styled(SEND_LABEL, label_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
    frame.render_widget(button, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_follow_classes() {
        assert_eq!(message_style(&Message::user("a")).fg, Some(Color::Cyan));
        assert_eq!(message_style(&Message::bot("a")).fg, Some(Color::Yellow));
        let loading = message_style(&Message::loading("a"));
        assert_eq!(loading.fg, Some(Color::DarkGray));
        assert!(loading.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn wrap_line_breaks_at_words() {
        assert_eq!(wrap_line("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_line("aaa bbb ccc", 6), vec!["aaa", "bbb", "ccc"]);
        assert_eq!(wrap_line("", 5), vec![""]);
    }

    #[test]
    fn wrap_line_splits_long_words() {
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
    }

    #[test]
    fn word_wrap_needs_more_rows_than_char_count() {
        // 30 ten-char words plus a tail: 3 words per 38-col row, tail on its own.
        let text = format!("{} ENDMARK", vec!["aaaaaaaaaa"; 30].join(" "));
        let rows = wrap_line(&text, 38);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows.last().map(String::as_str), Some("ENDMARK"));
    }

    #[test]
    fn transcript_rows_separate_messages() {
        let user = Message::user("hi");
        let bot = Message::bot("one two three");
        let lines = transcript_lines(&[&user, &bot], 8);
        // "hi", blank, "one two", "three"
        assert_eq!(lines.len(), 4);
    }
}
