//! MindMate application binary - composition root.
//!
//! Ties together all MindMate crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Build the Groq language-model client from the environment
//! 3. Assemble the dialogue orchestrator (classifier, selector, prompt)
//! 4. Run a line-oriented console loop: one line in, one turn out
//!
//! Speech input and audible output have no console backend here, so the
//! no-op collaborators are wired in; a UI shell would inject real ones.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use mindmate_core::config::MindmateConfig;
use mindmate_core::types::Session;

use mindmate_engine::collaborator::{NullSpeechSink, NullSpeechToText};
use mindmate_engine::orchestrator::DialogueOrchestrator;
use mindmate_llm::GroqClient;

/// Resolve the config file path (MINDMATE_CONFIG env, or ~/.mindmate/config.toml).
fn config_path() -> PathBuf {
    if let Ok(p) = std::env::var("MINDMATE_CONFIG") {
        return PathBuf::from(p);
    }
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".mindmate").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".mindmate").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting MindMate v{}", env!("CARGO_PKG_VERSION"));

    // Config.
    let config_file = config_path();
    let config = MindmateConfig::load_or_default(&config_file);
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Language model.
    let llm = match GroqClient::from_env(&config.llm) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Cannot build the language-model client");
            tracing::error!("Set {} and try again", config.llm.api_key_env);
            return Err(e.into());
        }
    };
    tracing::info!(model = %config.llm.model, "Groq client ready");

    // Orchestrator with console-appropriate collaborators.
    let orchestrator = DialogueOrchestrator::new(
        &config,
        Arc::new(llm),
        Arc::new(NullSpeechToText),
        Arc::new(NullSpeechSink),
    )?;
    let mut session = Session::new();

    println!("MindMate is listening. Type a message, or an empty line to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        if line.trim().is_empty() {
            break;
        }

        match orchestrator.handle_text(&mut session, &line).await {
            Ok(turn) => {
                println!("[{}] {}", turn.theme, turn.reply_text);
                println!("suggestion: {}", turn.suggestion);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Turn failed");
            }
        }
    }

    tracing::info!(turns = session.len(), "Session ended");
    Ok(())
}
