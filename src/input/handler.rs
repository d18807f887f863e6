use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, Focus};

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key(key_event, state, bindings)
        }
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Global actions work from any pane
    if let Some(action) = bindings.global(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    if state.focus.is_text() {
        return handle_text_input(key);
    }

    handle_list_input(key, bindings)
}

fn handle_text_input(key: KeyEvent) -> InputResult {
    // Ignore other control chords so they don't type letters
    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
    {
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Char('\n'),
        KeyCode::Esc => InputResult::Action(Action::NextFocus),
        _ => InputResult::Continue,
    }
}

fn handle_list_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    match bindings.list(&key) {
        Some(Action::Quit) => InputResult::Quit,
        Some(action) => InputResult::Action(action),
        None => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingMode;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn state_with_focus(focus: Focus) -> AppState {
        AppState {
            focus,
            ..AppState::default()
        }
    }

    #[test]
    fn test_letters_type_in_draft() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = state_with_focus(Focus::Draft);

        let result = handle_input(press(KeyCode::Char('x'), KeyModifiers::NONE), &state, &bindings);
        assert_eq!(result, InputResult::Char('x'));

        let result = handle_input(press(KeyCode::Char('q'), KeyModifiers::NONE), &state, &bindings);
        assert_eq!(result, InputResult::Char('q'));
    }

    #[test]
    fn test_letters_are_actions_in_question_list() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = state_with_focus(Focus::Questions);

        let result = handle_input(press(KeyCode::Char('x'), KeyModifiers::NONE), &state, &bindings);
        assert_eq!(result, InputResult::Action(Action::Dismiss));

        let result = handle_input(press(KeyCode::Char('q'), KeyModifiers::NONE), &state, &bindings);
        assert_eq!(result, InputResult::Quit);
    }

    #[test]
    fn test_analyze_works_while_typing() {
        let bindings = KeyBindings::new(&KeybindingMode::Arrows);
        let state = state_with_focus(Focus::Draft);

        let ctrl_r = press(KeyCode::Char('r'), KeyModifiers::CONTROL);
        let result = handle_input(ctrl_r, &state, &bindings);
        assert_eq!(result, InputResult::Action(Action::Analyze));
    }

    #[test]
    fn test_enter_is_newline_in_text_and_toggle_in_list() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        let draft = state_with_focus(Focus::Draft);
        let result = handle_input(press(KeyCode::Enter, KeyModifiers::NONE), &draft, &bindings);
        assert_eq!(result, InputResult::Char('\n'));

        let list = state_with_focus(Focus::Questions);
        let result = handle_input(press(KeyCode::Enter, KeyModifiers::NONE), &list, &bindings);
        assert_eq!(result, InputResult::Action(Action::ToggleGroup));
    }

    #[test]
    fn test_unbound_control_chord_is_ignored_in_text() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let state = state_with_focus(Focus::Reflection);

        let ctrl_z = press(KeyCode::Char('z'), KeyModifiers::CONTROL);
        let result = handle_input(ctrl_z, &state, &bindings);
        assert_eq!(result, InputResult::Continue);
    }
}
