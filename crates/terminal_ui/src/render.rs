use std::str::FromStr;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};
use tips_search::{Block, HEADING_DELIMITER, Highlighter};

use crate::layout::{PageLayout, PlacedBlock};

pub const PROMPT_PREFIX: &str = "Query: ";
const SEPARATOR_FILL: char = '-';
const TAB_WIDTH: usize = 4;

/// Colors of the active block's highlight band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub active_fg: Color,
    pub active_bg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            active_fg: Color::White,
            active_bg: Color::Magenta,
        }
    }
}

impl Palette {
    /// Accepts names (`magenta`, `light-blue`), indexed (`99`) and hex (`#ff00ff`) colors.
    pub fn parse_color(value: &str) -> Option<Color> {
        Color::from_str(value.trim()).ok()
    }

    pub fn active_style(&self) -> Style {
        Style::default().fg(self.active_fg).bg(self.active_bg)
    }
}

/// Everything one frame needs.
pub struct View<'a> {
    pub blocks: &'a [Block],
    pub layout: &'a PageLayout,
    pub highlighter: &'a Highlighter,
    pub query: &'a str,
    pub palette: Palette,
}

pub fn render(frame: &mut Frame, view: &View) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    draw(frame.buffer_mut(), area, view);

    let prompt_width = (PROMPT_PREFIX.chars().count() + view.query.chars().count()) as u16;
    let cursor_x = area.x + prompt_width.min(area.width - 1);
    frame.set_cursor_position((cursor_x, area.y));
}

/// Draws the visible page into `buf`, then the prompt over the top row.
pub fn draw(buf: &mut Buffer, area: Rect, view: &View) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    Clear.render(area, buf);

    for placed in view.layout.place(area.height as usize) {
        let Some(block) = view.blocks.get(placed.block) else {
            continue;
        };
        draw_block(buf, area, view, &placed, block);
    }

    let prompt_row = Rect { height: 1, ..area };
    Clear.render(prompt_row, buf);
    buf.set_stringn(
        area.x,
        area.y,
        format!("{PROMPT_PREFIX}{}", view.query),
        area.width as usize,
        Style::default(),
    );
}

fn draw_block(buf: &mut Buffer, area: Rect, view: &View, placed: &PlacedBlock, block: &Block) {
    let width = area.width as usize;

    if let Some(y) = screen_row(area, placed.top) {
        buf.set_stringn(
            area.x,
            y,
            separator_line(&block.source, width),
            width,
            Style::default(),
        );
    }

    let base = if placed.active {
        view.palette.active_style()
    } else {
        Style::default()
    };

    for (line_idx, text) in block.lines().enumerate() {
        let Some(y) = screen_row(area, placed.top + 1 + line_idx as i64) else {
            continue;
        };

        let text = if line_idx == 0 {
            format!("{HEADING_DELIMITER}{text}")
        } else {
            text.to_string()
        };

        if placed.active {
            buf.set_style(Rect { y, height: 1, ..area }, base);
        }
        let line = highlighted_line(&text, line_idx, view.highlighter, base);
        buf.set_line(area.x, y, &line, area.width);
    }
}

fn screen_row(area: Rect, row: i64) -> Option<u16> {
    if row < 0 || row >= area.height as i64 {
        return None;
    }
    Some(area.y + row as u16)
}

/// Splits `text` into plain and emphasized spans.
pub fn highlighted_line<'a>(
    text: &str,
    line_idx: usize,
    highlighter: &Highlighter,
    base: Style,
) -> Line<'a> {
    let emphasis = base.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    let mut spans = Vec::new();
    let mut pos = 0;

    for m in highlighter.search_line(line_idx, text) {
        if m.start_col > pos {
            spans.push(Span::styled(sanitize(&text[pos..m.start_col]), base));
        }
        spans.push(Span::styled(sanitize(&text[m.start_col..m.end_col]), emphasis));
        pos = m.end_col;
    }
    if pos < text.len() || spans.is_empty() {
        spans.push(Span::styled(sanitize(&text[pos..]), base));
    }

    Line::from(spans)
}

/// `-(<source>)` followed by fill characters, exactly `width` characters long.
pub fn separator_line(source: &str, width: usize) -> String {
    let label = format!("{SEPARATOR_FILL}({source})");
    let fill = width.saturating_sub(label.chars().count());
    label
        .chars()
        .chain(std::iter::repeat_n(SEPARATOR_FILL, fill))
        .take(width)
        .collect()
}

fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
