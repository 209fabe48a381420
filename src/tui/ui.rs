//! Layout and rendering for the playground form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::{App, Focus};
use crate::language::Language;
use crate::session::buffer::TextBuffer;

pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(3), // language selector
            Constraint::Min(8),    // code
            Constraint::Length(6), // input
            Constraint::Length(8), // output
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    render_title(frame, main_layout[0]);
    render_language(frame, app, main_layout[1]);
    render_textarea(frame, "Code", &app.session.code, app.focus == Focus::Code, main_layout[2]);
    render_textarea(frame, "Input", &app.session.input, app.focus == Focus::Input, main_layout[3]);
    render_output(frame, app, main_layout[4]);
    render_status_bar(frame, app, main_layout[5]);

    // Picker paints last so it sits on top of the form.
    if app.session.picker_open {
        render_picker(frame, app, main_layout[1]);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        " Playground",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, area);
}

fn render_language(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Language;
    let marker = if app.session.picker_open { "[-]" } else { "[+]" };
    let text = format!("{} {}", app.session.language.label(), marker);
    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Language")
            .border_style(border_style(focused)),
    );
    frame.render_widget(paragraph, area);
}

fn render_textarea(frame: &mut Frame, title: &str, buf: &TextBuffer, focused: bool, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let (cursor_row, cursor_col) = buf.cursor_line_col();
    // Follow the cursor vertically; no wrapping, long lines clip.
    let scroll = cursor_row.saturating_sub(inner_height.saturating_sub(1));

    let paragraph = Paragraph::new(Text::from(styled_lines(buf)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(border_style(focused)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);

    if focused {
        let line = buf.text().split('\n').nth(cursor_row).unwrap_or("");
        let x = UnicodeWidthStr::width(&line[..cursor_col]) as u16;
        let max_x = area.width.saturating_sub(2);
        frame.set_cursor_position(Position::new(
            area.x + 1 + x.min(max_x),
            area.y + 1 + (cursor_row - scroll) as u16,
        ));
    }
}

/// Buffer text as styled lines, with the selection range reversed.
fn styled_lines(buf: &TextBuffer) -> Vec<Line<'static>> {
    let text = buf.text();
    let sel = buf.selection();
    let mut lines = Vec::new();
    let mut offset = 0usize;
    for raw in text.split('\n') {
        let start = offset;
        let end = offset + raw.len();
        let line = match sel {
            Some((s, e)) if s < end && e > start => {
                let s0 = s.clamp(start, end) - start;
                let e0 = e.clamp(start, end) - start;
                let mut spans = Vec::new();
                if s0 > 0 {
                    spans.push(Span::raw(raw[..s0].to_string()));
                }
                spans.push(Span::styled(
                    raw[s0..e0].to_string(),
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
                if e0 < raw.len() {
                    spans.push(Span::raw(raw[e0..].to_string()));
                }
                Line::from(spans)
            }
            _ => Line::from(raw.to_string()),
        };
        lines.push(line);
        offset = end + 1;
    }
    lines
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let (text, style) = if session.output.is_empty() {
        (
            "// Output will appear here".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if session.has_error {
        (session.output.clone(), Style::default().fg(Color::Red))
    } else {
        (session.output.clone(), Style::default().fg(Color::Green))
    };

    let title = if session.loading { "Output (running)" } else { "Output" };
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_line())
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status, area);
}

fn render_picker(frame: &mut Frame, app: &App, selector_area: Rect) {
    let height = Language::ALL.len() as u16 + 2;
    let popup = Rect {
        x: selector_area.x,
        y: selector_area.y + selector_area.height.saturating_sub(1),
        width: selector_area.width.min(30),
        height,
    }
    .intersection(frame.area());

    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for (i, lang) in Language::ALL.iter().enumerate() {
        let mut style = Style::default();
        if i == app.picker_row {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let current = if *lang == app.session.language { "*" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("{} {}", current, lang.label()),
            style,
        )));
    }

    let list = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Select language"),
    );
    frame.render_widget(list, popup);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}
