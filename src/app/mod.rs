//! Application core - owns the session state and coordinates input, AI and rendering

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;

use render_thread::RenderThread;

use crate::ai::{AiActorHandle, AiCommand, Analyzer, CompletionClient, spawn_ai_actor};
use crate::config::Config;
use crate::input::{Action, KeyBindings};
use state::{AppState, KeyHints};

pub struct App {
    pub(crate) config: Config,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// Background task running the LLM calls
    pub(crate) ai_actor: AiActorHandle,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    pub fn new<C>(config: Config, analyzer: Analyzer<C>) -> Self
    where
        C: CompletionClient + 'static,
    {
        let bindings = KeyBindings::new(&config.ui.keybinding_mode);

        let hints = KeyHints {
            analyze: bindings.key_label(Action::Analyze),
            regenerate: bindings.key_label(Action::Regenerate),
            reset: bindings.key_label(Action::Reset),
            next_focus: bindings.key_label(Action::NextFocus),
            toggle: bindings.key_label(Action::ToggleGroup),
            dismiss: bindings.key_label(Action::Dismiss),
            quit: bindings.key_label(Action::Quit),
        };

        let state = AppState {
            display: config.display.clone(),
            model_label: format!("{} · {}", config.llm.provider.name(), config.llm.model()),
            hints,
            ..Default::default()
        };

        let ai_actor = spawn_ai_actor(analyzer);

        Self {
            config,
            state,
            bindings,
            ai_actor,
            dirty: true, // Start dirty for initial render
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        self.state.set_status(format!(
            "Edit your draft, then press {} to analyze",
            self.state.hints.analyze
        ));

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        self.ai_actor.cmd_tx.send(AiCommand::Shutdown).await.ok();

        tracing::info!(
            "Session ended: {} questions dismissed",
            self.state.session.dismissed.len()
        );
        result
    }
}
