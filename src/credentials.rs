use anyhow::Result;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::config::LlmProvider;

const ENV_API_KEY: &str = "PONDER_API_KEY";
const KEYRING_SERVICE: &str = "ponder";

/// Where an API key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Env,
    ProviderEnv,
    Keyring,
    File,
    Config,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Env => ENV_API_KEY,
            Self::ProviderEnv => "provider environment variable",
            Self::Keyring => "keyring",
            Self::File => "key file",
            Self::Config => "config file",
        };
        f.write_str(s)
    }
}

/// Debug information about credential storage backends
#[derive(Debug, Clone)]
pub struct CredentialDebugInfo {
    pub provider: LlmProvider,
    pub keyring_available: bool,
    pub env_var_set: bool,
    pub provider_env_var_set: bool,
    pub file_path: PathBuf,
    pub file_exists: bool,
}

impl std::fmt::Display for CredentialDebugInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let set = |b: bool| if b { "set" } else { "not set" };
        writeln!(f, "API key sources for {}:", self.provider.name())?;
        writeln!(f, "  {}: {}", ENV_API_KEY, set(self.env_var_set))?;
        writeln!(
            f,
            "  {}: {}",
            self.provider.api_key_env(),
            set(self.provider_env_var_set)
        )?;
        writeln!(
            f,
            "  Keyring: {}",
            if self.keyring_available {
                "available"
            } else {
                "unavailable"
            }
        )?;
        writeln!(f, "  File fallback: {}", self.file_path.display())?;
        writeln!(f, "  File exists: {}", self.file_exists)?;
        writeln!(f, "  Config: [llm] api_key")?;
        Ok(())
    }
}

/// API key storage for one provider
pub struct CredentialStore {
    provider: LlmProvider,
    key_file: PathBuf,
}

impl CredentialStore {
    pub fn new(provider: LlmProvider) -> Self {
        let key_file = crate::config::Config::config_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(format!(".api_key_{}", provider.name()));
        Self { provider, key_file }
    }

    fn keyring_user(&self) -> String {
        format!("api:{}", self.provider.name())
    }

    /// Get diagnostic info about credential storage backend
    pub fn debug_info(&self) -> CredentialDebugInfo {
        let test_user = format!("test:{}", self.provider.name());
        let keyring_available = if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &test_user)
        {
            entry.set_password("__test__").is_ok()
                && entry.get_password().is_ok()
                && entry.delete_credential().is_ok()
        } else {
            false
        };

        CredentialDebugInfo {
            provider: self.provider,
            keyring_available,
            env_var_set: non_empty_env(ENV_API_KEY).is_some(),
            provider_env_var_set: non_empty_env(self.provider.api_key_env()).is_some(),
            file_path: self.key_file.clone(),
            file_exists: self.key_file.exists(),
        }
    }

    fn keyring_get(&self) -> Option<String> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, &self.keyring_user()).ok()?;
        entry.get_password().ok().filter(|s| !s.is_empty())
    }

    fn keyring_set(&self, key: &str) -> bool {
        keyring::Entry::new(KEYRING_SERVICE, &self.keyring_user())
            .and_then(|entry| entry.set_password(key))
            .is_ok()
    }

    /// Read key from file fallback
    fn file_get(&self) -> Option<String> {
        fs::read_to_string(&self.key_file)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Write key to file fallback (with restricted permissions)
    fn file_set(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.key_file.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create file with restricted permissions atomically to avoid TOCTOU
        #[cfg(unix)]
        {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.key_file)?;
            file.write_all(key.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.key_file, key)?;
        }

        Ok(())
    }

    /// Find the API key: env var, provider env var, keyring, key file, config.
    pub fn get_api_key(&self, config_key: Option<&str>) -> Result<(String, KeySource)> {
        let found = resolve_api_key(
            self.provider,
            non_empty_env,
            || self.keyring_get(),
            || self.file_get(),
            config_key,
        );

        match found {
            Some(found) => {
                tracing::debug!("Using {} API key from {}", self.provider.name(), found.1);
                Ok(found)
            }
            None => anyhow::bail!(
                "No API key found.\n\n{}\nSet {} or run 'ponder setup'.",
                self.debug_info(),
                ENV_API_KEY
            ),
        }
    }

    /// Store the key in the keyring, falling back to a private file
    pub fn set_api_key(&self, key: &str) -> Result<()> {
        if self.keyring_set(key) && self.keyring_get().as_deref() == Some(key) {
            return Ok(());
        }

        eprintln!("Note: Keyring unavailable, using file-based storage.");
        self.file_set(key)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn resolve_api_key(
    provider: LlmProvider,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl FnOnce() -> Option<String>,
    file: impl FnOnce() -> Option<String>,
    config_key: Option<&str>,
) -> Option<(String, KeySource)> {
    if let Some(key) = env(ENV_API_KEY) {
        return Some((key, KeySource::Env));
    }
    if let Some(key) = env(provider.api_key_env()) {
        return Some((key, KeySource::ProviderEnv));
    }
    if let Some(key) = keyring() {
        return Some((key, KeySource::Keyring));
    }
    if let Some(key) = file() {
        return Some((key, KeySource::File));
    }
    config_key
        .filter(|k| !k.trim().is_empty())
        .map(|k| (k.to_string(), KeySource::Config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_generic_env_takes_priority() {
        let env = |name: &str| match name {
            ENV_API_KEY => Some("generic".to_string()),
            "ANTHROPIC_API_KEY" => Some("provider".to_string()),
            _ => None,
        };
        let found = resolve_api_key(
            LlmProvider::Anthropic,
            env,
            || Some("keyring".to_string()),
            || None,
            Some("config"),
        );
        assert_eq!(found, Some(("generic".to_string(), KeySource::Env)));
    }

    #[test]
    fn test_provider_env_matches_provider() {
        let env = |name: &str| (name == "OPENROUTER_API_KEY").then(|| "or-key".to_string());

        let found = resolve_api_key(LlmProvider::OpenRouter, env, || None, || None, None);
        assert_eq!(found, Some(("or-key".to_string(), KeySource::ProviderEnv)));

        let found = resolve_api_key(LlmProvider::Anthropic, env, || None, || None, None);
        assert_eq!(found, None);
    }

    #[test]
    fn test_keyring_before_file_and_config() {
        let found = resolve_api_key(
            LlmProvider::Anthropic,
            no_env,
            || Some("keyring".to_string()),
            || Some("file".to_string()),
            Some("config"),
        );
        assert_eq!(found, Some(("keyring".to_string(), KeySource::Keyring)));
    }

    #[test]
    fn test_config_is_last_resort() {
        let found = resolve_api_key(LlmProvider::Anthropic, no_env, || None, || None, Some("cfg"));
        assert_eq!(found, Some(("cfg".to_string(), KeySource::Config)));

        let found = resolve_api_key(LlmProvider::Anthropic, no_env, || None, || None, Some("  "));
        assert_eq!(found, None);
    }

    #[test]
    fn test_file_fallback_roundtrip() {
        let key_file = env::temp_dir().join(format!("ponder_key_test_{}", std::process::id()));
        let store = CredentialStore {
            provider: LlmProvider::Anthropic,
            key_file: key_file.clone(),
        };
        let _ = fs::remove_file(&key_file);

        assert_eq!(store.file_get(), None);
        store.file_set("sk-ant-test\n").unwrap();
        assert_eq!(store.file_get(), Some("sk-ant-test".to_string()));

        let _ = fs::remove_file(&key_file);
    }

    #[test]
    fn test_key_files_are_per_provider() {
        let anthropic = CredentialStore::new(LlmProvider::Anthropic);
        let openrouter = CredentialStore::new(LlmProvider::OpenRouter);
        assert_ne!(anthropic.key_file, openrouter.key_file);
        assert!(
            openrouter
                .key_file
                .to_string_lossy()
                .ends_with(".api_key_openrouter")
        );
    }
}
