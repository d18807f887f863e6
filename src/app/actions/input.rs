//! Text input handling (chars, backspace)

use crate::app::state::Focus;

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        match self.state.focused_text_mut() {
            Some(text) => text.push(c),
            None => self.explain_read_only(),
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        match self.state.focused_text_mut() {
            Some(text) => {
                text.pop();
            }
            None => self.explain_read_only(),
        }
    }

    fn explain_read_only(&mut self) {
        if self.state.focus != Focus::Context {
            return;
        }
        if self.state.is_busy() {
            self.state
                .set_status("Context is locked while questions generate");
        } else {
            self.state.set_status(format!(
                "Context appears after analysis ({})",
                self.state.hints.analyze
            ));
        }
    }
}
