//! Action handlers for user input
//!
//! - `ai`: starting analyses and applying AI actor events
//! - `input`: text input handling

mod ai;
mod input;

use crate::input::Action;

use super::App;
use super::state::Focus;

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Analyze => self.start_analysis().await,
            Action::Regenerate => self.regenerate_questions().await,
            Action::Reset => self.reset_session(),

            Action::NextFocus => self.state.focus_next(),
            Action::PrevFocus => self.state.focus_prev(),

            // Question list
            Action::Up => self.state.select_up(),
            Action::Down => self.state.select_down(),
            Action::Top => self.state.select_top(),
            Action::Bottom => self.state.select_bottom(),
            Action::ToggleGroup => self.state.toggle_selected_group(),
            Action::Dismiss => {
                if let Some((category, _)) = self.state.dismiss_selected() {
                    self.state
                        .set_status(format!("Dismissed a {} question", category));
                }
            }

            Action::Quit => {} // Handled in event loop
        }
    }

    /// Start over with a fresh session
    fn reset_session(&mut self) {
        if self.state.is_busy() {
            self.state
                .set_error("Wait for the current analysis to finish before resetting");
            return;
        }

        let had_results = self.state.session.has_results();
        self.state.session.reset();
        self.state.list.collapsed.clear();
        self.state.reset_question_list();
        self.state.focus = Focus::Draft;
        self.state.status.clear_error();
        self.state.set_status("Session reset");
        tracing::info!("Session reset (discarded results: {})", had_results);
    }
}
