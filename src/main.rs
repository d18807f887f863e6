mod ai;
mod app;
mod config;
mod constants;
mod credentials;
mod input;
mod reflection;
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::io::{self, Write};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::{Analyzer, LlmClient};
use crate::app::App;
use crate::config::{Config, LlmProvider};
use crate::credentials::CredentialStore;

fn setup_logging() {
    use std::fs::OpenOptions;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,ponder=debug"));

    // The TUI owns the terminal, so prefer a log file
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| std::fs::create_dir_all(&dir).ok().map(|_| dir))
        .map(|dir| dir.join("ponder.log"))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"ponder - Reflect on an email draft before you send it

Usage: ponder [command]

Commands:
    (none)          Start the interactive reflection assistant
    analyze [FILE]  Analyze FILE (or stdin) and print context and questions
    setup           Choose a provider and store the API key
    help            Show this help message

Configuration file: ~/.config/ponder/config.toml
API key: PONDER_API_KEY, ANTHROPIC_API_KEY / OPENROUTER_API_KEY, or 'ponder setup'
"#
    );
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

async fn run_setup() -> Result<()> {
    println!("Ponder Setup");
    println!("============\n");

    let mut config = Config::load()?;

    let provider = loop {
        let input = prompt_line(&format!(
            "Provider [anthropic/openrouter] ({}): ",
            config.llm.provider.name()
        ))?;
        if input.is_empty() {
            break config.llm.provider;
        }
        match input.parse::<LlmProvider>() {
            Ok(provider) => break provider,
            Err(e) => println!("{}", e),
        }
    };
    if provider != config.llm.provider {
        // A model name from another provider won't resolve
        config.llm.model = None;
        config.llm.base_url = None;
    }
    config.llm.provider = provider;

    let model = prompt_line(&format!("Model ({}): ", config.llm.model()))?;
    if !model.is_empty() {
        config.llm.model = Some(model);
    }

    let key = loop {
        print!("API key: ");
        io::stdout().flush()?;
        let key = read_secret()?;
        println!();
        if !key.is_empty() {
            break key;
        }
        println!("The API key cannot be empty.");
    };

    config.ensure_dirs()?;
    config.save()?;
    println!("Configuration saved to {}", Config::config_path()?.display());

    let creds = CredentialStore::new(provider);
    creds.set_api_key(&key)?;
    match creds.get_api_key(None) {
        Ok((_, source)) => println!("API key stored in {}.", source),
        Err(e) => {
            eprintln!("Warning: Failed to store the API key.");
            return Err(e);
        }
    }

    println!("\nSetup complete! Run 'ponder' to start.");
    Ok(())
}

fn read_secret() -> Result<String> {
    let _guard = DisableEcho::new()?;

    let mut secret = String::new();
    io::stdin().read_line(&mut secret)?;
    Ok(secret.trim().to_string())
}

struct DisableEcho {
    #[cfg(unix)]
    original: libc::termios,
}

impl DisableEcho {
    #[cfg(unix)]
    fn new() -> Result<Self> {
        use std::mem::MaybeUninit;
        use std::os::unix::io::AsRawFd;

        let fd = std::io::stdin().as_raw_fd();
        let mut termios = MaybeUninit::<libc::termios>::uninit();

        // SAFETY: tcgetattr initializes termios on success, and tcsetattr
        // only reads the struct we pass.
        unsafe {
            if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
                anyhow::bail!("Failed to get terminal attributes");
            }
            let original = termios.assume_init();
            let mut quiet = original;
            quiet.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &quiet) != 0 {
                anyhow::bail!("Failed to set terminal attributes");
            }
            Ok(Self { original })
        }
    }

    #[cfg(not(unix))]
    fn new() -> Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for DisableEcho {
    fn drop(&mut self) {
        use std::os::unix::io::AsRawFd;
        let fd = std::io::stdin().as_raw_fd();
        // SAFETY: restores the attributes captured in new()
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &self.original);
        }
    }
}

/// Load config and resolve the API key into a ready analyzer
fn build_analyzer(config: &Config) -> Result<Analyzer<LlmClient>> {
    let creds = CredentialStore::new(config.llm.provider);
    let (api_key, source) = creds.get_api_key(config.llm.api_key.as_deref())?;
    tracing::info!(
        "Using {} model {} (key from {})",
        config.llm.provider.name(),
        config.llm.model(),
        source
    );

    let client = LlmClient::from_config(&config.llm, api_key);
    Ok(Analyzer::new(
        client,
        config.llm.context_max_tokens,
        config.llm.questions_max_tokens,
    ))
}

async fn read_email(path: Option<&str>) -> Result<String> {
    let email = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut email = String::new();
            tokio::io::stdin()
                .read_to_string(&mut email)
                .await
                .context("Failed to read email from stdin")?;
            email
        }
    };

    if email.trim().is_empty() {
        tracing::warn!("Analyzing an empty email");
    }
    Ok(email)
}

async fn run_analyze(path: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let analyzer = build_analyzer(&config)?;
    let email = read_email(path).await?;

    let analysis = match analyzer.run(&email).await {
        Ok(analysis) => analysis,
        Err(e) => {
            if let Some(raw) = e.raw_response() {
                eprintln!("Raw model response:\n{}\n", raw);
            }
            return Err(e.into());
        }
    };

    println!("Context\n=======\n{}\n", analysis.context.trim());
    for (category, questions) in analysis.questions.iter() {
        println!("{} Questions ({})", category, category.purpose());
        if questions.is_empty() {
            println!("  (none)");
        }
        for question in questions {
            println!("  - {}", question);
        }
        println!();
    }
    Ok(())
}

async fn run_tui() -> Result<()> {
    let config = Config::load()?;
    config.ensure_dirs()?;

    crate::ui::theme::init_theme(config.ui.theme);

    let analyzer = match build_analyzer(&config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("{:#}", e);
            eprintln!("\nRun 'ponder setup' to store an API key, or set one:");
            eprintln!("  export {}='your-key'", config.llm.provider.api_key_env());
            std::process::exit(1);
        }
    };

    let mut app = App::new(config, analyzer);
    app.run().await
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("setup") => run_setup().await,
        Some("analyze") => {
            setup_logging();
            run_analyze(args.get(2).map(|s| s.as_str())).await
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();
            run_tui().await
        }
    }
}
