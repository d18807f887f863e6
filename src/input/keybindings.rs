use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Available everywhere
    Analyze,
    Regenerate,
    Reset,
    NextFocus,
    PrevFocus,
    Quit,

    // Question list
    Up,
    Down,
    Top,
    Bottom,
    ToggleGroup,
    Dismiss,
}

pub struct KeyBindings {
    /// Work in every pane, including text fields
    global: HashMap<KeyEvent, Action>,
    /// Only in the question list
    list: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let mut list = match mode {
            KeybindingMode::Vim => Self::vim_list_bindings(),
            KeybindingMode::Arrows => Self::arrow_list_bindings(),
        };

        // Shared by both modes
        list.insert(key(' '), Action::ToggleGroup);
        list.insert(key_code(KeyCode::Enter), Action::ToggleGroup);
        list.insert(key('x'), Action::Dismiss);
        list.insert(key_code(KeyCode::Delete), Action::Dismiss);
        list.insert(key('q'), Action::Quit);

        Self {
            global: Self::global_bindings(),
            list,
        }
    }

    pub fn global(&self, event: &KeyEvent) -> Option<Action> {
        self.global.get(event).copied()
    }

    pub fn list(&self, event: &KeyEvent) -> Option<Action> {
        self.list.get(event).copied()
    }

    /// Display label of the first key bound to an action (for the help bar)
    pub fn key_label(&self, action: Action) -> String {
        let mut keys: Vec<String> = self
            .global
            .iter()
            .chain(self.list.iter())
            .filter(|(_, a)| **a == action)
            .map(|(event, _)| format_key_event(event))
            .collect();
        // HashMap order is unstable; keep labels consistent between frames
        keys.sort_by_key(|k| (k.len(), k.clone()));
        keys.into_iter().next().unwrap_or_default()
    }

    fn global_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        map.insert(ctrl_key('r'), Action::Analyze);
        map.insert(ctrl_key('g'), Action::Regenerate);
        map.insert(ctrl_key('n'), Action::Reset);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(ctrl_key('c'), Action::Quit);
        map.insert(key_code(KeyCode::Tab), Action::NextFocus);
        map.insert(shift_key_code(KeyCode::BackTab), Action::PrevFocus);

        map
    }

    fn vim_list_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);
        map.insert(key('d'), Action::Dismiss);

        map
    }

    fn arrow_list_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn shift_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::SHIFT)
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            c.to_ascii_uppercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}
