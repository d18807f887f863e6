//! AI feature action handlers

use tokio::sync::mpsc::error::TryRecvError;

use crate::ai::{AiCommand, AiEvent, AiStep};

use super::super::App;

impl App {
    /// Run context analysis then question generation on the current draft
    pub(crate) async fn start_analysis(&mut self) {
        if self.state.is_busy() {
            self.state.set_error("An analysis is already running");
            return;
        }

        let email = self.state.session.email.clone();
        tracing::info!(
            "Starting analysis ({} chars) with {}",
            email.len(),
            self.config.llm.model()
        );

        self.state.session.begin_analysis();
        self.state.reset_question_list();
        self.state.status.clear_error();
        self.state.analysis.start(AiStep::Context);
        self.state.set_status("Analyzing context...");

        self.send_ai_command(AiCommand::Analyze { email }).await;
    }

    /// Generate new questions from the displayed (possibly edited) context
    pub(crate) async fn regenerate_questions(&mut self) {
        if self.state.is_busy() {
            self.state.set_error("An analysis is already running");
            return;
        }

        let Some(context) = self.state.session.context.clone() else {
            self.state.set_error(format!(
                "No context yet. Press {} to analyze first",
                self.state.hints.analyze
            ));
            return;
        };
        let email = self.state.session.email.clone();

        self.state.session.questions = None;
        self.state.reset_question_list();
        self.state.status.clear_error();
        self.state.analysis.start(AiStep::Questions);
        self.state.set_status("Generating questions...");

        self.send_ai_command(AiCommand::RegenerateQuestions { email, context })
            .await;
    }

    async fn send_ai_command(&mut self, cmd: AiCommand) {
        if self.ai_actor.cmd_tx.send(cmd).await.is_err() {
            tracing::error!("AI actor is gone");
            self.state.analysis.finish();
            self.state.set_error("AI worker stopped unexpectedly");
        }
    }

    /// Drain pending AI events. Returns true if any were processed.
    pub(crate) fn process_ai_events(&mut self) -> bool {
        let mut had_events = false;

        loop {
            match self.ai_actor.event_rx.try_recv() {
                Ok(event) => {
                    had_events = true;
                    self.apply_ai_event(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state.is_busy() {
                        self.state.analysis.finish();
                        self.state.set_error("AI worker stopped unexpectedly");
                        had_events = true;
                    }
                    break;
                }
            }
        }

        had_events
    }

    fn apply_ai_event(&mut self, event: AiEvent) {
        match event {
            AiEvent::ContextReady { context } => {
                self.state.session.set_context(context);
                self.state.analysis.start(AiStep::Questions);
                self.state.set_status("Generating questions...");
            }
            AiEvent::QuestionsReady { questions } => {
                let total = questions.total();
                self.state.session.set_questions(questions);
                self.state.analysis.finish();
                self.state.reset_question_list();
                self.state
                    .set_status(format!("{} reflection questions ready", total));
            }
            AiEvent::Error { step, message } => {
                tracing::error!("{} failed: {}", step, message);
                self.state.analysis.finish();
                self.state.set_error(format!("{} failed: {}", step, message));
                self.state.set_status(format!("{} failed", step));
            }
        }
    }
}
