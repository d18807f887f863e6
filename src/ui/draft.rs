use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Paragraph, Wrap},
};

use super::theme::{Theme, symbols};
use super::widgets::{pane_block, tail_scroll};

/// Editable multi-line text pane. Focused panes show a cursor at the end of
/// the text and scroll so the cursor line stays visible.
pub(super) fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    title: String,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (text, style) = if focused {
        (format!("{}{}", value, symbols::CURSOR), Theme::text())
    } else if value.is_empty() {
        (placeholder.to_string(), Theme::text_muted())
    } else {
        (value.to_string(), Theme::text_secondary())
    };

    let scroll = if focused { tail_scroll(&text, inner) } else { 0 };
    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

pub fn render_draft(frame: &mut Frame, area: Rect, email: &str, focused: bool) {
    let title = format!(" Email Draft ({} chars) ", email.chars().count());
    render_text_field(
        frame,
        area,
        title,
        email,
        "Paste or type the email you want to reflect on",
        focused,
    );
}
