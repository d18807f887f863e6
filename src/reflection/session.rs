//! Session context: everything that lives for one interactive session

use std::collections::HashSet;

use super::questions::{Category, ReflectionQuestions};
use crate::constants::DEFAULT_EMAIL;

/// Identifies one rendered question row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionKey {
    pub category: Category,
    pub text: String,
}

impl QuestionKey {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Question rows the user has hidden. Only grows until the session is reset.
#[derive(Debug, Clone, Default)]
pub struct DismissedSet {
    keys: HashSet<QuestionKey>,
}

impl DismissedSet {
    /// Returns true if the key was not already dismissed
    pub fn dismiss(&mut self, key: QuestionKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, category: Category, text: &str) -> bool {
        self.keys.contains(&QuestionKey::new(category, text))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Explicit session state handed to every handler
#[derive(Debug, Clone)]
pub struct Session {
    /// Editable email draft
    pub email: String,
    /// Cached context analysis (possibly edited by the user)
    pub context: Option<String>,
    /// Cached question set from the last successful generation
    pub questions: Option<ReflectionQuestions>,
    pub dismissed: DismissedSet,
    /// Writer's own notes; captured but never sent anywhere
    pub reflection: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            email: DEFAULT_EMAIL.to_string(),
            context: None,
            questions: None,
            dismissed: DismissedSet::default(),
            reflection: String::new(),
        }
    }

    /// Start over with the example email and nothing cached
    pub fn reset(&mut self) {
        self.email = DEFAULT_EMAIL.to_string();
        self.context = None;
        self.questions = None;
        self.dismissed.clear();
        self.reflection.clear();
    }

    /// Drop cached results before a new analysis run
    pub fn begin_analysis(&mut self) {
        self.context = None;
        self.questions = None;
    }

    pub fn set_context(&mut self, context: String) {
        self.context = Some(context);
    }

    pub fn set_questions(&mut self, questions: ReflectionQuestions) {
        self.questions = Some(questions);
    }

    pub fn has_results(&self) -> bool {
        self.context.is_some() || self.questions.is_some()
    }

    /// Non-dismissed questions of a category, in model order
    pub fn visible_questions(&self, category: Category) -> Vec<&str> {
        self.questions
            .as_ref()
            .map(|qs| {
                qs.get(category)
                    .iter()
                    .filter(|q| !self.dismissed.contains(category, q))
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Hide one question row. Returns true if it was newly hidden.
    pub fn dismiss(&mut self, category: Category, text: &str) -> bool {
        let added = self.dismissed.dismiss(QuestionKey::new(category, text));
        if added {
            tracing::debug!("Dismissed {} question: {}", category, text);
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting_questions() -> ReflectionQuestions {
        ReflectionQuestions {
            clarity: vec![
                "Is the new time finalized?".to_string(),
                "Is the room the same?".to_string(),
            ],
            impact: vec!["Who has a 3pm conflict?".to_string()],
            process: vec!["Who moved it?".to_string()],
            access: vec!["Is there a dial-in?".to_string()],
            other: vec!["Is the agenda unchanged?".to_string()],
        }
    }

    #[test]
    fn test_new_session_has_default_email() {
        let session = Session::new();
        assert_eq!(session.email, DEFAULT_EMAIL);
        assert!(!session.has_results());
        assert!(session.dismissed.is_empty());
    }

    #[test]
    fn test_dismiss_hides_only_that_question() {
        let mut session = Session::new();
        session.set_questions(meeting_questions());

        assert!(session.dismiss(Category::Clarity, "Is the new time finalized?"));

        assert_eq!(
            session.visible_questions(Category::Clarity),
            vec!["Is the room the same?"]
        );
        for category in [
            Category::Impact,
            Category::Process,
            Category::Access,
            Category::Other,
        ] {
            assert_eq!(session.visible_questions(category).len(), 1);
        }
    }

    #[test]
    fn test_dismiss_twice_is_idempotent() {
        let mut session = Session::new();
        session.set_questions(meeting_questions());

        assert!(session.dismiss(Category::Impact, "Who has a 3pm conflict?"));
        assert!(!session.dismiss(Category::Impact, "Who has a 3pm conflict?"));
        assert_eq!(session.dismissed.len(), 1);
    }

    #[test]
    fn test_same_text_in_other_category_stays_visible() {
        let mut session = Session::new();
        let mut questions = meeting_questions();
        questions.other = vec!["Who moved it?".to_string()];
        session.set_questions(questions);

        session.dismiss(Category::Process, "Who moved it?");

        assert!(session.visible_questions(Category::Process).is_empty());
        assert_eq!(
            session.visible_questions(Category::Other),
            vec!["Who moved it?"]
        );
    }

    #[test]
    fn test_begin_analysis_keeps_dismissed() {
        let mut session = Session::new();
        session.set_context("- Sender: team lead".to_string());
        session.set_questions(meeting_questions());
        session.dismiss(Category::Access, "Is there a dial-in?");

        session.begin_analysis();

        assert!(session.context.is_none());
        assert!(session.questions.is_none());
        assert_eq!(session.dismissed.len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.email = "Short note".to_string();
        session.reflection = "Add the dial-in link".to_string();
        session.set_context("- Sender: team lead".to_string());
        session.set_questions(meeting_questions());
        session.dismiss(Category::Access, "Is there a dial-in?");

        session.reset();

        assert_eq!(session.email, DEFAULT_EMAIL);
        assert!(session.reflection.is_empty());
        assert!(!session.has_results());
        assert!(session.dismissed.is_empty());
    }
}
