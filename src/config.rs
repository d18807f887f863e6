use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// What to show of the raw model output
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Anthropic,
    OpenRouter,
}

impl LlmProvider {
    pub fn name(self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenRouter => "openrouter",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Anthropic => "claude-3-5-haiku-latest",
            Self::OpenRouter => "anthropic/claude-3.5-haiku",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenRouter => "https://openrouter.ai",
        }
    }

    /// Provider-specific environment variable holding the API key
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openrouter" => Ok(Self::OpenRouter),
            other => anyhow::bail!(
                "Unknown provider '{}' (expected anthropic or openrouter)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model identifier (default depends on provider)
    #[serde(default)]
    pub model: Option<String>,
    /// API key; environment and keyring take precedence
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override the provider's API base URL
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum tokens for the context analysis response
    #[serde(default = "default_max_tokens")]
    pub context_max_tokens: u32,
    /// Maximum tokens for the question JSON response
    #[serde(default = "default_max_tokens")]
    pub questions_max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: None,
            api_key: None,
            base_url: None,
            context_max_tokens: default_max_tokens(),
            questions_max_tokens: default_max_tokens(),
        }
    }
}

impl LlmConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show the context analysis response
    #[serde(default = "default_true")]
    pub show_context: bool,
    /// Let the writer edit the context before regenerating questions
    #[serde(default = "default_true")]
    pub editable_context: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_context: true,
            editable_context: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    #[serde(default)]
    pub theme: ThemeVariant,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

fn default_true() -> bool {
    true
}

fn default_max_tokens() -> u32 {
    1024
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("ponder");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file. A missing file yields defaults, since the API key
    /// can come from the environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = Self::config_dir()?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [llm]
            provider = "openrouter"
            model = "anthropic/claude-3-haiku"
            base_url = "http://localhost:8080"
            context_max_tokens = 300
            questions_max_tokens = 800

            [display]
            show_context = false
            editable_context = false

            [ui]
            keybinding_mode = "arrows"
            theme = "high-contrast"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.llm.provider, LlmProvider::OpenRouter);
        assert_eq!(config.llm.model(), "anthropic/claude-3-haiku");
        assert_eq!(config.llm.base_url(), "http://localhost:8080");
        assert_eq!(config.llm.context_max_tokens, 300);
        assert_eq!(config.llm.questions_max_tokens, 800);
        assert!(!config.display.show_context);
        assert!(!config.display.editable_context);
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Arrows);
        assert_eq!(config.ui.theme, ThemeVariant::HighContrast);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.llm.provider, LlmProvider::Anthropic);
        assert_eq!(config.llm.model(), "claude-3-5-haiku-latest");
        assert_eq!(config.llm.base_url(), "https://api.anthropic.com");
        assert_eq!(config.llm.context_max_tokens, 1024);
        assert!(config.display.show_context);
        assert!(config.display.editable_context);
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Vim);
        assert_eq!(config.ui.theme, ThemeVariant::Dark);
    }

    #[test]
    fn test_model_default_follows_provider() {
        let config = Config::parse("[llm]\nprovider = \"openrouter\"").unwrap();
        assert_eq!(config.llm.model(), "anthropic/claude-3.5-haiku");
        assert_eq!(config.llm.base_url(), "https://openrouter.ai");
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        assert!(Config::parse("[llm]\nprovider = \"ollama\"").is_err());
        assert!("ollama".parse::<LlmProvider>().is_err());
        assert_eq!(
            " OpenRouter ".parse::<LlmProvider>().unwrap(),
            LlmProvider::OpenRouter
        );
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = Config::default();
        config.llm.model = Some("claude-3-opus-latest".to_string());
        config.display.editable_context = false;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.llm.model(), "claude-3-opus-latest");
        assert!(!parsed.display.editable_context);
    }
}
