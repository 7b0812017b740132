//! Rendering of the chat window

use crate::chat::Conversation;
use crate::message::{Message, Origin};
use crate::runtime::SessionView;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TITLE: &str = "AI Assistant";
const SUBTITLE: &str = "Always here to help";
const PLACEHOLDER: &str = "Type your message here...";
const MAX_INPUT_LINES: u16 = 5;
const TYPING_FRAMES: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];

/// UI-only state that survives between frames
#[derive(Debug, Default)]
pub struct UiState {
    pub scroll: ScrollState,
    /// Animation counter, advanced by the UI ticker
    pub tick: usize,
}

/// Scroll position, counted in lines up from the bottom
#[derive(Debug, Default)]
pub struct ScrollState {
    offset_from_bottom: u16,
    seen_generation: u64,
}

impl ScrollState {
    /// Jump back to the latest content when the session asks for it
    pub fn sync(&mut self, generation: u64) {
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.offset_from_bottom = 0;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset_from_bottom = self.offset_from_bottom.saturating_sub(lines);
    }

    pub fn to_bottom(&mut self) {
        self.offset_from_bottom = 0;
    }

    /// First visible line for a list of `total` lines in a `height` tall view
    pub fn top_line(&mut self, total: u16, height: u16) -> u16 {
        let max_scroll = total.saturating_sub(height);
        self.offset_from_bottom = self.offset_from_bottom.min(max_scroll);
        max_scroll - self.offset_from_bottom
    }

    pub fn offset_from_bottom(&self) -> u16 {
        self.offset_from_bottom
    }
}

pub fn typing_frame(tick: usize) -> &'static str {
    TYPING_FRAMES[tick % TYPING_FRAMES.len()]
}

/// Word-wrap `text` to `width` terminal columns. Explicit line breaks are
/// kept and words longer than a line are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let mut word = word;
            while word.width() > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let (head, rest) = split_at_width(word, width);
                lines.push(head.to_string());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let word_width = word.width();
            let needed = if current_width == 0 {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
        lines.push(current);
    }
    lines
}

/// Split after the last character that still fits in `width` columns.
/// Always takes at least one character.
fn split_at_width(text: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used > 0 && used + w > width {
            return text.split_at(i);
        }
        used += w;
    }
    (text, "")
}

/// Hard-wrap the draft at `width` columns, keeping every space. A full last
/// row is followed by an empty one so the cursor has a cell to sit in.
fn wrap_draft(draft: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();

    for line in draft.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if row_width > 0 && row_width + w > width {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += w;
        }
        rows.push(row);
    }
    if rows.last().is_some_and(|row| row.width() >= width) {
        rows.push(String::new());
    }
    rows
}

pub fn render(frame: &mut Frame, view: &SessionView, ui: &mut UiState) {
    let conversation = &view.conversation;
    // Bordered input: two columns go to the frame
    let input_width = frame.area().width.saturating_sub(2);
    let input_height = input_height(conversation.draft(), input_width);
    let [header_area, body_area, input_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(input_height),
    ])
    .areas(frame.area());

    render_header(frame, header_area);

    ui.scroll.sync(view.scroll_generation);
    render_messages(frame, body_area, conversation, ui);

    render_input(frame, input_area, conversation);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(SUBTITLE, Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line).block(Block::bordered()), area);
}

fn render_messages(frame: &mut Frame, area: Rect, conversation: &Conversation, ui: &mut UiState) {
    let block = Block::bordered();
    let inner = block.inner(area);
    let lines = message_lines(conversation, inner.width, ui.tick);

    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let top = ui.scroll.top_line(total, inner.height);

    let title = if ui.scroll.offset_from_bottom() > 0 {
        " History (End to jump to latest) "
    } else {
        ""
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(block.title(title))
            .scroll((top, 0)),
        area,
    );
}

fn bubble_style(origin: Origin) -> Style {
    match origin {
        Origin::Bot => Style::default().fg(Color::Black).bg(Color::Gray),
        Origin::User => Style::default().fg(Color::White).bg(Color::Blue),
    }
}

fn alignment(origin: Origin) -> Alignment {
    match origin {
        Origin::Bot => Alignment::Left,
        Origin::User => Alignment::Right,
    }
}

/// Lines for one message: a label row, then the padded bubble
fn bubble_lines(message: &Message, width: u16) -> Vec<Line<'static>> {
    let align = alignment(message.origin());
    let style = bubble_style(message.origin());
    let bubble_width = (usize::from(width) * 3 / 4).max(8);

    let mut lines = vec![Line::from(Span::styled(
        format!("{} · {}", message.origin().label(), message.display_time()),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(align)];

    let wrapped = wrap_text(message.text(), bubble_width - 2);
    let inner = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
    for text in wrapped {
        let pad = " ".repeat(inner.saturating_sub(text.width()));
        lines.push(Line::from(Span::styled(format!(" {text}{pad} "), style)).alignment(align));
    }
    lines
}

pub fn message_lines(conversation: &Conversation, width: u16, tick: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in conversation.messages() {
        lines.extend(bubble_lines(message, width));
        lines.push(Line::default());
    }
    if conversation.is_awaiting_response() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", Origin::Bot.label()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(typing_frame(tick), Style::default().fg(Color::Magenta)),
        ]));
    }
    lines
}

/// Rows the input box needs for `draft` at `width` inner columns, borders
/// included
fn input_height(draft: &str, width: u16) -> u16 {
    let rows = u16::try_from(wrap_draft(draft, width).len()).unwrap_or(MAX_INPUT_LINES);
    rows.clamp(1, MAX_INPUT_LINES) + 2
}

fn render_input(frame: &mut Frame, area: Rect, conversation: &Conversation) {
    let hint_style = if conversation.can_submit() {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title = if conversation.is_awaiting_response() {
        Line::from(Span::styled(" Waiting for an answer... ", hint_style))
    } else {
        Line::from(Span::styled(
            " Enter to send · Shift+Enter for a new line ",
            hint_style,
        ))
    };
    let block = Block::bordered().title(title);

    let inner = block.inner(area);
    let draft = conversation.draft();
    if draft.is_empty() {
        let placeholder = Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(placeholder).block(block), area);
        frame.set_cursor_position((inner.x, inner.y));
        return;
    }

    // Keep the row being typed on screen once the draft outgrows the box
    let rows = wrap_draft(draft, inner.width);
    let last = u16::try_from(rows.len().saturating_sub(1)).unwrap_or(u16::MAX);
    let top = last.saturating_add(1).saturating_sub(inner.height);
    let cursor_x = rows
        .last()
        .map_or(0, |row| u16::try_from(row.width()).unwrap_or(u16::MAX));

    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines).block(block).scroll((top, 0)), area);

    let x = inner.x + cursor_x.min(inner.width.saturating_sub(1));
    let y = inner.y + last.saturating_sub(top).min(inner.height.saturating_sub(1));
    frame.set_cursor_position((x, y));
}
