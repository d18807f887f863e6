use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use super::draft::render_draft;
use super::reflection::{render_context, render_questions, render_reflection};
use super::status_bar::status_bar;
use super::widgets::{error_bar, help_bar};
use crate::app::state::{AppState, Focus};
use crate::constants::{DRAFT_COLUMN_PERCENT, MIN_SIDE_BY_SIDE_WIDTH, REFLECTION_FIELD_HEIGHT};

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Draft + reflection panes
            Constraint::Length(1), // Help bar or error
        ])
        .split(frame.area());

    status_bar(frame, chunks[0], state);

    let (draft_area, side_area) = split_main(chunks[1]);
    render_draft(
        frame,
        draft_area,
        &state.session.email,
        state.focus == Focus::Draft,
    );
    render_side_column(frame, side_area, state);

    if let Some(error) = &state.status.error {
        error_bar(frame, chunks[2], error);
    } else {
        render_help(frame, chunks[2], state);
    }
}

/// Draft beside the reflection column, or above it on narrow terminals
fn split_main(area: Rect) -> (Rect, Rect) {
    let chunks = if area.width >= MIN_SIDE_BY_SIDE_WIDTH {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(DRAFT_COLUMN_PERCENT),
                Constraint::Percentage(100 - DRAFT_COLUMN_PERCENT),
            ])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area)
    };
    (chunks[0], chunks[1])
}

fn render_side_column(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut constraints = Vec::with_capacity(3);
    if state.display.show_context {
        constraints.push(Constraint::Percentage(35));
    }
    constraints.push(Constraint::Min(3));
    constraints.push(Constraint::Length(REFLECTION_FIELD_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if state.display.show_context {
        render_context(frame, chunks[0], state);
        next = 1;
    }
    render_questions(frame, chunks[next], state);
    render_reflection(frame, chunks[next + 1], state);
}

fn render_help(frame: &mut Frame, area: Rect, state: &AppState) {
    let h = &state.hints;
    let mut hints: Vec<(&str, &str)> = Vec::new();

    if state.focus == Focus::Questions && !state.question_rows().is_empty() {
        hints.push((h.dismiss.as_str(), "dismiss"));
        hints.push((h.toggle.as_str(), "fold"));
    }
    hints.push((h.analyze.as_str(), "analyze"));
    if state.session.context.is_some() {
        hints.push((h.regenerate.as_str(), "regenerate"));
    }
    hints.push((h.next_focus.as_str(), "next pane"));
    hints.push((h.reset.as_str(), "reset"));
    hints.push((h.quit.as_str(), "quit"));

    help_bar(frame, area, &hints);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::ReflectionQuestions;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn analyzed_state() -> AppState {
        let mut state = AppState::default();
        state.session.set_context("- Sender: team lead".to_string());
        state.session.set_questions(ReflectionQuestions {
            clarity: vec!["Is 3pm final?".to_string()],
            impact: vec!["Who has a conflict?".to_string()],
            process: vec![],
            access: vec!["Is there a dial-in?".to_string()],
            other: vec![],
        });
        state
    }

    #[test]
    fn test_renders_all_group_headers() {
        let screen = draw(&analyzed_state(), 120, 40);
        for header in [
            "Clarity Questions (1)",
            "Impact Questions (1)",
            "Process Questions (0)",
            "Access Questions (1)",
            "Other Questions (0)",
        ] {
            assert!(screen.contains(header), "missing {header}");
        }
        assert!(screen.contains("Is 3pm final?"));
        assert!(screen.contains("Sender: team lead"));
    }

    #[test]
    fn test_dismissed_question_not_drawn() {
        let mut state = analyzed_state();
        state
            .session
            .dismiss(crate::reflection::Category::Clarity, "Is 3pm final?");
        let screen = draw(&state, 120, 40);
        assert!(!screen.contains("Is 3pm final?"));
        assert!(screen.contains("Clarity Questions (0)"));
    }

    #[test]
    fn test_hidden_context_pane() {
        let mut state = analyzed_state();
        state.display.show_context = false;
        let screen = draw(&state, 120, 40);
        assert!(!screen.contains("Sender: team lead"));
        assert!(screen.contains("Reflection Questions"));
    }

    #[test]
    fn test_error_replaces_help_bar() {
        let mut state = AppState::default();
        state.set_error("Context analysis failed: boom");
        let screen = draw(&state, 80, 30);
        assert!(screen.contains("Error: Context analysis failed: boom"));
    }

    #[test]
    fn test_narrow_terminal_still_draws() {
        let screen = draw(&analyzed_state(), 60, 50);
        assert!(screen.contains("Email Draft"));
        assert!(screen.contains("Your Reflection"));
    }
}
