//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{Theme, borders, symbols};
use crate::constants::SPINNER_FRAME_MS;

/// Bordered pane block with the focus highlight applied
pub fn pane_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(borders::pane(focused))
        .border_style(Theme::pane_border(focused))
        .title(title)
}

pub fn error_bar(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph =
        Paragraph::new(format!(" Error: {} ", sanitize_text(message))).style(Theme::error_bar());
    frame.render_widget(paragraph, area);
}

/// Key hints, dropping trailing ones that don't fit the width
pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let available_width = area.width as usize;

    // " key desc │ " per hint
    let hint_widths: Vec<usize> = hints
        .iter()
        .enumerate()
        .map(|(i, (key, desc))| {
            let base = format!(" {} ", key).width() + desc.width();
            if i < hints.len() - 1 { base + 3 } else { base + 1 }
        })
        .collect();

    let mut total_width = 0;
    let mut hints_to_show = 0;
    for width in &hint_widths {
        if total_width + width > available_width {
            break;
        }
        total_width += width;
        hints_to_show += 1;
    }
    hints_to_show = hints_to_show.max(1).min(hints.len());

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().take(hints_to_show).enumerate() {
        spans.push(Span::styled(format!(" {} ", key), Theme::help_key()));
        spans.push(Span::styled(desc.to_string(), Theme::help_desc()));
        if i < hints_to_show - 1 {
            spans.push(Span::styled(" │ ", Theme::help_desc()));
        }
    }
    spans.push(Span::styled(" ", Theme::help_desc()));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Theme::help_desc()),
        area,
    );
}

/// Animated spinner character for loading states
pub fn spinner_char() -> char {
    let frames = symbols::SPINNER.chars().count() as u128;
    let idx = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() / SPINNER_FRAME_MS % frames)
        .unwrap_or(0);

    symbols::SPINNER.chars().nth(idx as usize).unwrap_or('*')
}

/// Sanitize text for display: remove control characters and ANSI escape sequences
pub fn sanitize_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        // ESC [ ... <letter>
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        if c.is_control() && c != '\n' && c != '\t' {
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result
}

/// Rows `text` occupies when wrapped to `width` columns. Approximates
/// ratatui's word wrap by character width, which is enough to keep the
/// cursor line on screen.
pub fn wrapped_height(text: &str, width: u16) -> usize {
    let width = width.max(1) as usize;
    text.split('\n')
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

/// Vertical scroll offset that keeps the last line of `text` visible
pub fn tail_scroll(text: &str, area: Rect) -> u16 {
    let total = wrapped_height(text, area.width);
    total
        .saturating_sub(area.height as usize)
        .min(u16::MAX as usize) as u16
}

/// Greedy word wrap by display width. Words wider than `width` get a line
/// of their own.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
