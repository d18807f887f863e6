//! AI actor: runs analysis off the UI loop, one command at a time

use tokio::sync::mpsc;

use super::analyzer::Analyzer;
use super::client::CompletionClient;
use crate::reflection::ReflectionQuestions;

/// Commands that can be sent to the AI actor
#[derive(Debug)]
pub enum AiCommand {
    /// Context analysis followed by question generation
    Analyze { email: String },
    /// Question generation only, from an existing (possibly edited) context
    RegenerateQuestions { email: String, context: String },
    /// Shutdown the actor
    Shutdown,
}

/// Which step of the analysis failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiStep {
    Context,
    Questions,
}

impl std::fmt::Display for AiStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Context => f.write_str("Context analysis"),
            Self::Questions => f.write_str("Question generation"),
        }
    }
}

/// Events emitted by the AI actor
#[derive(Debug, Clone)]
pub enum AiEvent {
    /// Step 1 finished; step 2 is starting
    ContextReady { context: String },
    /// Step 2 finished
    QuestionsReady { questions: ReflectionQuestions },
    /// A step failed; the run is over
    Error { step: AiStep, message: String },
}

/// Handle for communicating with the AI actor
pub struct AiActorHandle {
    pub cmd_tx: mpsc::Sender<AiCommand>,
    pub event_rx: mpsc::Receiver<AiEvent>,
}

/// Spawn the AI actor task
pub fn spawn_ai_actor<C>(analyzer: Analyzer<C>) -> AiActorHandle
where
    C: CompletionClient + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(4);
    let (event_tx, event_rx) = mpsc::channel(8);

    tokio::spawn(ai_actor_loop(analyzer, cmd_rx, event_tx));

    AiActorHandle { cmd_tx, event_rx }
}

async fn ai_actor_loop<C: CompletionClient>(
    analyzer: Analyzer<C>,
    mut cmd_rx: mpsc::Receiver<AiCommand>,
    event_tx: mpsc::Sender<AiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let events_open = match cmd {
            AiCommand::Analyze { email } => {
                match analyzer.analyze_context(&email).await {
                    Ok(context) => {
                        let sent = emit(
                            &event_tx,
                            AiEvent::ContextReady {
                                context: context.clone(),
                            },
                        )
                        .await;
                        sent && generate(&analyzer, &event_tx, &email, &context).await
                    }
                    Err(e) => {
                        tracing::warn!("Context analysis failed: {}", e);
                        emit(
                            &event_tx,
                            AiEvent::Error {
                                step: AiStep::Context,
                                message: e.to_string(),
                            },
                        )
                        .await
                    }
                }
            }

            AiCommand::RegenerateQuestions { email, context } => {
                generate(&analyzer, &event_tx, &email, &context).await
            }

            AiCommand::Shutdown => break,
        };

        if !events_open {
            tracing::warn!("AI actor: event receiver dropped");
            break;
        }
    }
}

async fn generate<C: CompletionClient>(
    analyzer: &Analyzer<C>,
    event_tx: &mpsc::Sender<AiEvent>,
    email: &str,
    context: &str,
) -> bool {
    let event = match analyzer.generate_questions(email, context).await {
        Ok(questions) => AiEvent::QuestionsReady { questions },
        Err(e) => {
            tracing::warn!("Question generation failed: {}", e);
            AiEvent::Error {
                step: AiStep::Questions,
                message: e.to_string(),
            }
        }
    };
    emit(event_tx, event).await
}

async fn emit(event_tx: &mpsc::Sender<AiEvent>, event: AiEvent) -> bool {
    event_tx.send(event).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedClient;
    use super::*;
    use crate::reflection::Category;

    const QUESTIONS: &str = r#"{"Clarity": ["Is the new time finalized?"],
        "Impact": [], "Process": [], "Access": [], "Other": []}"#;

    #[tokio::test]
    async fn test_analyze_emits_context_then_questions() {
        let client = ScriptedClient::new([Ok("- Sender: lead"), Ok(QUESTIONS)]);
        let mut handle = spawn_ai_actor(Analyzer::new(client, 10, 10));

        handle
            .cmd_tx
            .send(AiCommand::Analyze {
                email: "meeting moved".to_string(),
            })
            .await
            .unwrap();

        match handle.event_rx.recv().await.unwrap() {
            AiEvent::ContextReady { context } => assert_eq!(context, "- Sender: lead"),
            other => panic!("unexpected event: {:?}", other),
        }
        match handle.event_rx.recv().await.unwrap() {
            AiEvent::QuestionsReady { questions } => {
                assert_eq!(questions.get(Category::Clarity).len(), 1)
            }
            other => panic!("unexpected event: {:?}", other),
        }

        handle.cmd_tx.send(AiCommand::Shutdown).await.unwrap();
    }

    #[tokio::test]
    async fn test_parse_failure_reported_as_question_error() {
        let client = ScriptedClient::new([Ok("context"), Ok("not json")]);
        let mut handle = spawn_ai_actor(Analyzer::new(client, 10, 10));

        handle
            .cmd_tx
            .send(AiCommand::Analyze {
                email: "e".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(
            handle.event_rx.recv().await.unwrap(),
            AiEvent::ContextReady { .. }
        ));
        match handle.event_rx.recv().await.unwrap() {
            AiEvent::Error { step, message } => {
                assert_eq!(step, AiStep::Questions);
                assert!(message.contains("not valid JSON"));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_regenerate_runs_only_question_step() {
        let client = ScriptedClient::new([Ok(QUESTIONS)]);
        let mut handle = spawn_ai_actor(Analyzer::new(client.clone(), 10, 10));

        handle
            .cmd_tx
            .send(AiCommand::RegenerateQuestions {
                email: "e".to_string(),
                context: "edited".to_string(),
            })
            .await
            .unwrap();

        assert!(matches!(
            handle.event_rx.recv().await.unwrap(),
            AiEvent::QuestionsReady { .. }
        ));
        assert_eq!(client.calls().len(), 1);
    }
}
