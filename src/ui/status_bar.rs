//! Top status bar: app name, analysis progress, last message and model

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use super::widgets::{spinner_char, truncate_string};
use crate::app::state::AppState;

pub fn status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut left = vec![Span::styled(" ponder ", Theme::status_bar())];

    if let Some(step) = state.analysis.running {
        let elapsed = state
            .analysis
            .started
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);
        left.push(Span::styled(
            format!(" {} {} {}s ", spinner_char(), step, elapsed),
            Theme::status_busy(),
        ));
    }

    let right = format!(" {} ", state.model_label);
    let used: usize = left.iter().map(|s| s.content.width()).sum::<usize>() + right.width();
    let room = (area.width as usize).saturating_sub(used + 1);

    if !state.status.message.is_empty() && room > 1 {
        left.push(Span::styled(
            format!(" {}", truncate_string(&state.status.message, room - 1)),
            Theme::status_muted(),
        ));
    }

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right.width());
    left.push(Span::styled(" ".repeat(padding), Theme::status_bar()));
    left.push(Span::styled(right, Theme::status_muted()));

    frame.render_widget(
        Paragraph::new(Line::from(left)).style(Theme::status_bar()),
        area,
    );
}
