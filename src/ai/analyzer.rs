//! Two-step reflection analysis: context first, then questions

use super::client::CompletionClient;
use super::error::AnalysisError;
use super::prompts;
use crate::reflection::ReflectionQuestions;

/// Result of a full analysis run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub context: String,
    pub questions: ReflectionQuestions,
}

/// Runs the analysis prompts against one client. Every step makes exactly
/// one call and nothing is retried.
pub struct Analyzer<C> {
    client: C,
    context_max_tokens: u32,
    questions_max_tokens: u32,
}

impl<C: CompletionClient> Analyzer<C> {
    pub fn new(client: C, context_max_tokens: u32, questions_max_tokens: u32) -> Self {
        Self {
            client,
            context_max_tokens,
            questions_max_tokens,
        }
    }

    /// Step 1: describe the email's context as free text
    pub async fn analyze_context(&self, email: &str) -> Result<String, AnalysisError> {
        let prompt = prompts::context_prompt(email);
        let context = self
            .client
            .complete(&prompt, self.context_max_tokens)
            .await?;
        tracing::info!("Context analysis complete ({} chars)", context.len());
        Ok(context)
    }

    /// Step 2: generate categorized questions from the email and its context
    pub async fn generate_questions(
        &self,
        email: &str,
        context: &str,
    ) -> Result<ReflectionQuestions, AnalysisError> {
        let prompt = prompts::questions_prompt(email, context);
        let raw = self
            .client
            .complete(&prompt, self.questions_max_tokens)
            .await?;

        let questions = ReflectionQuestions::parse(&raw).inspect_err(|e| {
            tracing::warn!("Question response rejected: {}", e);
        })?;
        tracing::info!("Generated {} reflection questions", questions.total());
        Ok(questions)
    }

    /// Both steps in order. Stops at the first failure.
    pub async fn run(&self, email: &str) -> Result<Analysis, AnalysisError> {
        let context = self.analyze_context(email).await?;
        let questions = self.generate_questions(email, &context).await?;
        Ok(Analysis { context, questions })
    }
}
