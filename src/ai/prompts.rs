//! Prompt templates for the two analysis steps

use std::fmt::Write;

use crate::reflection::Category;

/// Step 1: ask for a bulleted description of the email's context
pub fn context_prompt(email: &str) -> String {
    format!(
        r#"Analyze this email to identify key context:
{email}

Identify and describe in plain language:
1. The sender's apparent role and position
2. The type of decision/action being communicated
3. The apparent urgency/timeline
4. Key stakeholders who might be affected
5. Relevant organizational context that can be inferred

Format as a bulleted list."#
    )
}

/// The question response is parsed as-is, so fences or prose fail
const JSON_ONLY: &str =
    "Respond with only the JSON object, with no other text and no code fences.";

/// Step 2: ask for 2-3 questions per category as a JSON object
pub fn questions_prompt(email: &str, context: &str) -> String {
    let mut purposes = String::new();
    let mut shape = String::new();
    for (i, category) in Category::ALL.iter().enumerate() {
        let _ = writeln!(purposes, "- {}: {}", category.name(), category.purpose());
        let sep = if i + 1 < Category::ALL.len() { "," } else { "" };
        let _ = writeln!(
            shape,
            "    \"{}\": [\"question 1\", \"question 2\"]{}",
            category.name(),
            sep
        );
    }

    format!(
        r#"Given this email and context analysis, generate reflection questions grouped by purpose.

Email:
{email}

Context Analysis:
{context}

Generate 2-3 questions for each of these purposes:
{purposes}
Format the output as JSON with this structure:
{{
{shape}}}

{JSON_ONLY}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prompt_embeds_email_verbatim() {
        let email = "Hi team,\n\nmeeting moved to 3pm.\n\n— Alex";
        let prompt = context_prompt(email);
        assert!(prompt.contains(email));
        assert!(prompt.contains("sender's apparent role"));
        assert!(prompt.ends_with("Format as a bulleted list."));
    }

    #[test]
    fn test_context_prompt_accepts_empty_email() {
        let prompt = context_prompt("");
        assert!(prompt.starts_with("Analyze this email"));
    }

    #[test]
    fn test_questions_prompt_lists_every_category() {
        let prompt = questions_prompt("email body", "- Sender: manager");
        assert!(prompt.contains("email body"));
        assert!(prompt.contains("- Sender: manager"));
        for category in Category::ALL {
            assert!(prompt.contains(&format!("- {}: ", category.name())));
            assert!(prompt.contains(&format!("\"{}\": [", category.name())));
        }
        assert!(prompt.contains(JSON_ONLY));
        assert!(prompt.trim_end().ends_with("no code fences."));
    }

    #[test]
    fn test_questions_prompt_shape_is_valid_json() {
        let prompt = questions_prompt("e", "c");
        let start = prompt.find('{').unwrap();
        let end = prompt.rfind('}').unwrap();
        let shape: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        assert_eq!(shape.as_object().unwrap().len(), 5);
    }
}
