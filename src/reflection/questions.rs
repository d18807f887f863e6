//! Reflection question categories and the typed question record

use serde::{Deserialize, Serialize};

use crate::ai::AnalysisError;

/// Purpose a reflection question serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Clarity,
    Impact,
    Process,
    Access,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Clarity,
        Category::Impact,
        Category::Process,
        Category::Access,
        Category::Other,
    ];

    /// JSON key and display label
    pub fn name(self) -> &'static str {
        match self {
            Self::Clarity => "Clarity",
            Self::Impact => "Impact",
            Self::Process => "Process",
            Self::Access => "Access",
            Self::Other => "Other",
        }
    }

    /// What questions in this category ask about (used in the prompt)
    pub fn purpose(self) -> &'static str {
        match self {
            Self::Clarity => "Questions about what might be unclear or need more detail",
            Self::Impact => "Questions about how this might affect different stakeholders",
            Self::Process => {
                "Questions about how the decision was made or will be implemented"
            }
            Self::Access => "Questions about whether everyone can participate fully",
            Self::Other => "Any other questions that come to mind",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Questions grouped by category, exactly as the model returned them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReflectionQuestions {
    #[serde(rename = "Clarity")]
    pub clarity: Vec<String>,
    #[serde(rename = "Impact")]
    pub impact: Vec<String>,
    #[serde(rename = "Process")]
    pub process: Vec<String>,
    #[serde(rename = "Access")]
    pub access: Vec<String>,
    #[serde(rename = "Other")]
    pub other: Vec<String>,
}

impl ReflectionQuestions {
    /// Parse the model's raw JSON response.
    ///
    /// Syntax errors are reported as [`AnalysisError::Parse`]. JSON with a
    /// missing or unknown category, or a non-string question, is reported as
    /// [`AnalysisError::SchemaMismatch`]. No attempt is made to repair either.
    pub fn parse(raw: &str) -> Result<Self, AnalysisError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|source| AnalysisError::Parse {
                source,
                raw: raw.to_string(),
            })?;

        serde_json::from_value(value).map_err(|source| AnalysisError::SchemaMismatch {
            source,
            raw: raw.to_string(),
        })
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Clarity => &self.clarity,
            Category::Impact => &self.impact,
            Category::Process => &self.process,
            Category::Access => &self.access,
            Category::Other => &self.other,
        }
    }

    /// Iterate categories in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, qs)| qs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{
        "Clarity": ["Is the new time finalized?", "Which room?"],
        "Impact": ["Who has a conflict at 3pm?"],
        "Process": ["Who decided to move it?"],
        "Access": ["Can remote attendees join?"],
        "Other": []
    }"#;

    #[test]
    fn test_parse_well_formed_has_exactly_five_categories() {
        let questions = ReflectionQuestions::parse(WELL_FORMED).unwrap();
        let keys: Vec<Category> = questions.iter().map(|(c, _)| c).collect();
        assert_eq!(keys, Category::ALL.to_vec());
        assert_eq!(
            questions.get(Category::Clarity),
            ["Is the new time finalized?", "Which room?"]
        );
        assert!(questions.get(Category::Other).is_empty());
        assert_eq!(questions.total(), 5);
    }

    #[test]
    fn test_parse_missing_brace_is_parse_error() {
        let raw = r#"{"Clarity": ["Is the new time finalized?"]"#;
        let err = ReflectionQuestions::parse(raw).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
        assert_eq!(err.raw_response(), Some(raw));
    }

    #[test]
    fn test_parse_prose_is_parse_error() {
        let err = ReflectionQuestions::parse("Here are your questions:").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
    }

    #[test]
    fn test_parse_missing_category_is_schema_mismatch() {
        let raw = r#"{"Clarity": [], "Impact": [], "Process": [], "Access": []}"#;
        let err = ReflectionQuestions::parse(raw).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_parse_extra_category_is_schema_mismatch() {
        let raw = r#"{"Clarity": [], "Impact": [], "Process": [], "Access": [],
                      "Other": [], "Tone": ["Too curt?"]}"#;
        let err = ReflectionQuestions::parse(raw).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_parse_non_string_question_is_schema_mismatch() {
        let raw = r#"{"Clarity": [1], "Impact": [], "Process": [], "Access": [], "Other": []}"#;
        let err = ReflectionQuestions::parse(raw).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_category_names_match_json_keys() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.name()));
        }
    }
}
