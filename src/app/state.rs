//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use std::collections::HashSet;
use std::time::Instant;

use crate::ai::AiStep;
use crate::config::DisplayConfig;
use crate::constants::ERROR_TTL_SECS;
use crate::reflection::{Category, Session};

/// Pane that receives keyboard input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Draft,
    Context,
    Questions,
    Reflection,
}

impl Focus {
    /// Panes where keys type text
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Questions)
    }

    pub fn next(self, context_editable: bool) -> Self {
        match self {
            Self::Draft if context_editable => Self::Context,
            Self::Draft | Self::Context => Self::Questions,
            Self::Questions => Self::Reflection,
            Self::Reflection => Self::Draft,
        }
    }

    pub fn prev(self, context_editable: bool) -> Self {
        match self {
            Self::Draft => Self::Reflection,
            Self::Context => Self::Draft,
            Self::Questions if context_editable => Self::Context,
            Self::Questions => Self::Draft,
            Self::Reflection => Self::Questions,
        }
    }
}

/// One row of the question list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionRow<'a> {
    Header {
        category: Category,
        visible: usize,
        collapsed: bool,
    },
    Question {
        category: Category,
        text: &'a str,
    },
}

#[derive(Debug, Clone, Default)]
pub struct QuestionListState {
    /// Index into the current row list
    pub selected: usize,
    /// Groups the user folded away (all start expanded)
    pub collapsed: HashSet<Category>,
}

/// Progress of the in-flight analysis, if any
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    /// Step currently waiting on the model
    pub running: Option<AiStep>,
    pub started: Option<Instant>,
}

impl AnalysisState {
    pub fn start(&mut self, step: AiStep) {
        self.running = Some(step);
        self.started = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        self.running = None;
        self.started = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub error: Option<String>,
    pub error_time: Option<Instant>,
}

impl StatusState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.error = Some(error.to_string());
        self.error_time = Some(Instant::now());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.error_time = None;
    }

    /// Clear error if TTL expired. Returns true if error was cleared.
    pub fn clear_error_if_expired(&mut self) -> bool {
        if let Some(time) = self.error_time
            && time.elapsed().as_secs() >= ERROR_TTL_SECS
        {
            self.clear_error();
            true
        } else {
            false
        }
    }

    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }
}

/// Key labels shown in the help bar
#[derive(Debug, Clone, Default)]
pub struct KeyHints {
    pub analyze: String,
    pub regenerate: String,
    pub reset: String,
    pub next_focus: String,
    pub toggle: String,
    pub dismiss: String,
    pub quit: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub focus: Focus,
    pub analysis: AnalysisState,
    pub list: QuestionListState,
    pub status: StatusState,
    pub display: DisplayConfig,
    /// "provider · model" for the status bar
    pub model_label: String,
    pub hints: KeyHints,
}

impl AppState {
    pub fn set_error(&mut self, error: impl ToString) {
        self.status.set_error(error);
    }

    pub fn clear_error_if_expired(&mut self) -> bool {
        self.status.clear_error_if_expired()
    }

    pub fn set_status(&mut self, msg: impl ToString) {
        self.status.set_message(msg);
    }

    pub fn is_busy(&self) -> bool {
        self.analysis.running.is_some()
    }

    /// Context pane is part of the focus cycle
    pub fn context_editable(&self) -> bool {
        self.display.show_context && self.display.editable_context
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.context_editable());
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.context_editable());
    }

    /// Text buffer behind the focused pane, if it accepts typing. The context
    /// is locked while a run is in flight, since questions are built from it.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Draft => Some(&mut self.session.email),
            Focus::Context if self.context_editable() && !self.is_busy() => {
                self.session.context.as_mut()
            }
            Focus::Reflection => Some(&mut self.session.reflection),
            _ => None,
        }
    }

    /// Rows of the question list: a header per category, then its visible
    /// questions unless the group is collapsed. Empty until questions exist.
    pub fn question_rows(&self) -> Vec<QuestionRow<'_>> {
        let mut rows = Vec::new();
        if self.session.questions.is_none() {
            return rows;
        }

        for category in Category::ALL {
            let visible = self.session.visible_questions(category);
            let collapsed = self.list.collapsed.contains(&category);
            rows.push(QuestionRow::Header {
                category,
                visible: visible.len(),
                collapsed,
            });
            if !collapsed {
                rows.extend(
                    visible
                        .into_iter()
                        .map(|text| QuestionRow::Question { category, text }),
                );
            }
        }
        rows
    }

    pub fn select_up(&mut self) {
        self.list.selected = self.list.selected.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let last = self.question_rows().len().saturating_sub(1);
        self.list.selected = (self.list.selected + 1).min(last);
    }

    pub fn select_top(&mut self) {
        self.list.selected = 0;
    }

    pub fn select_bottom(&mut self) {
        self.list.selected = self.question_rows().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let last = self.question_rows().len().saturating_sub(1);
        self.list.selected = self.list.selected.min(last);
    }

    /// Collapse or expand the group of the selected row. Selection moves to
    /// the group header so it stays on screen.
    pub fn toggle_selected_group(&mut self) {
        let category = match self.question_rows().get(self.list.selected) {
            Some(QuestionRow::Header { category, .. })
            | Some(QuestionRow::Question { category, .. }) => *category,
            None => return,
        };

        if !self.list.collapsed.remove(&category) {
            self.list.collapsed.insert(category);
        }

        if let Some(index) = self.question_rows().iter().position(
            |row| matches!(row, QuestionRow::Header { category: c, .. } if *c == category),
        ) {
            self.list.selected = index;
        }
    }

    /// Dismiss the selected question. Returns what was dismissed.
    pub fn dismiss_selected(&mut self) -> Option<(Category, String)> {
        let (category, text) = match self.question_rows().get(self.list.selected) {
            Some(QuestionRow::Question { category, text }) => (*category, text.to_string()),
            _ => return None,
        };

        self.session.dismiss(category, &text);
        self.clamp_selection();
        Some((category, text))
    }

    /// New results or a reset invalidate the list layout
    pub fn reset_question_list(&mut self) {
        self.list.selected = 0;
    }
}
