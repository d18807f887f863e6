//! Right-hand column: context analysis, grouped questions, the writer's notes

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use super::draft::render_text_field;
use super::theme::{Theme, symbols};
use super::widgets::{pane_block, sanitize_text, spinner_char, wrap_words};
use crate::ai::AiStep;
use crate::app::state::{AppState, Focus, QuestionRow};

pub fn render_context(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Context;
    let title = if state.context_editable() && state.session.context.is_some() {
        " Context (editable) ".to_string()
    } else {
        " Context ".to_string()
    };

    if state.analysis.running == Some(AiStep::Context) {
        render_waiting(frame, area, title, "Analyzing context...", focused);
        return;
    }

    match &state.session.context {
        Some(context) => render_text_field(
            frame,
            area,
            title,
            &sanitize_text(context),
            "",
            focused && state.context_editable(),
        ),
        None => {
            let hint = format!("Press {} to analyze your draft", state.hints.analyze);
            render_placeholder(frame, area, title, &hint, focused);
        }
    }
}

pub fn render_questions(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Questions;

    let Some(questions) = &state.session.questions else {
        let title = " Reflection Questions ".to_string();
        if state.analysis.running == Some(AiStep::Questions) {
            render_waiting(frame, area, title, "Generating questions...", focused);
        } else {
            let hint = "Questions appear here after analysis";
            render_placeholder(frame, area, title, hint, focused);
        }
        return;
    };

    let rows = state.question_rows();
    let visible: usize = rows
        .iter()
        .map(|row| match row {
            QuestionRow::Header { visible, .. } => *visible,
            QuestionRow::Question { .. } => 0,
        })
        .sum();
    let title = format!(" Reflection Questions ({}/{}) ", visible, questions.total());

    let block = pane_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // "   ✕ " prefix on question rows
    let text_width = (inner.width as usize).saturating_sub(5);
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = focused && i == state.list.selected;
            let item = question_row_item(row, text_width);
            if selected {
                item.style(Theme::selected())
            } else {
                item
            }
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(state.list.selected));
    frame.render_stateful_widget(List::new(items), inner, &mut list_state);
}

fn question_row_item(row: &QuestionRow<'_>, text_width: usize) -> ListItem<'static> {
    match row {
        QuestionRow::Header {
            category,
            visible,
            collapsed,
        } => {
            let arrow = if *collapsed {
                symbols::GROUP_COLLAPSED
            } else {
                symbols::GROUP_EXPANDED
            };
            let style = if *visible == 0 {
                Theme::group_header_empty()
            } else {
                Theme::group_header()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{}{} Questions ({})", arrow, category, visible),
                style,
            )))
        }
        QuestionRow::Question { text, .. } => {
            let lines: Vec<Line> = wrap_words(&sanitize_text(text), text_width)
                .into_iter()
                .enumerate()
                .map(|(i, line)| {
                    let marker = if i == 0 {
                        Span::styled(format!("   {} ", symbols::DISMISS), Theme::dismiss_marker())
                    } else {
                        Span::raw("     ")
                    };
                    Line::from(vec![marker, Span::styled(line, Theme::text())])
                })
                .collect();
            ListItem::new(Text::from(lines))
        }
    }
}

pub fn render_reflection(frame: &mut Frame, area: Rect, state: &AppState) {
    render_text_field(
        frame,
        area,
        " Your Reflection ".to_string(),
        &state.session.reflection,
        "What would you change before sending?",
        state.focus == Focus::Reflection,
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: String, hint: &str, focused: bool) {
    let block = pane_block(title, focused);
    let paragraph = Paragraph::new(hint.to_string())
        .style(Theme::text_muted())
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_waiting(frame: &mut Frame, area: Rect, title: String, label: &str, focused: bool) {
    let block = pane_block(title, focused);
    let line = Line::from(vec![
        Span::styled(format!("{} ", spinner_char()), Theme::text_accent()),
        Span::styled(label.to_string(), Theme::text_secondary()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
