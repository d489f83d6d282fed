mod audit;
mod cli;
mod commands;
mod repl;
mod tools;

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use evo_ai::{GeminiClient, GeminiConfig, RetryPolicy, Session, SessionStore};
use evo_config::Settings;

use audit::AuditLog;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let candidates = [
        // Current directory
        PathBuf::from(".env"),
        // Workspace root when run via `cargo run` from a member crate
        PathBuf::from("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    load_dotenv();

    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("evo=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "evo=info".parse().expect("default directive")),
            ),
        )
        .init();

    tracing::info!("Evo v{} starting...", env!("CARGO_PKG_VERSION"));

    // The credential is the one fatal startup condition.
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY is not set.");
            eprintln!();
            eprintln!("Fix:");
            eprintln!("1) Create a .env file next to the binary:");
            eprintln!("   GEMINI_API_KEY=your_key");
            eprintln!("2) Or export it in your shell:");
            eprintln!("   export GEMINI_API_KEY=your_key");
            std::process::exit(1);
        }
    };

    let settings_path = args.config.as_ref().map(PathBuf::from);
    let settings = match &settings_path {
        Some(path) => Settings::load_from_path(path),
        None => evo_config::load_settings(),
    };

    // CLI override wins for this run; the saved model is untouched.
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| settings.model.clone());
    tracing::info!(model = %model, "session configured");

    let client = GeminiClient::new(GeminiConfig::new(api_key).with_model(model.clone()));
    let session = Session::new(&settings.role, model);

    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("evo"))
        .unwrap_or_else(|| PathBuf::from("."));
    let store = SessionStore::new(data_dir.join("sessions"));
    let audit = AuditLog::create(data_dir.join("logs"));

    let app = repl::App {
        settings,
        settings_path,
        session,
        client,
        store,
        audit,
        retry: RetryPolicy::default(),
        loaded_doc: None,
        streaming: !args.no_stream,
    };

    if let Err(e) = repl::run(app).await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}
