mod agent;
mod config;
mod errors;
mod llm_client;
mod models;
mod persona;
mod profile;
mod report;
mod routes;
mod speech;
mod state;
mod sync;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agent::Agent;
use crate::config::Config;
use crate::llm_client::{LlmClient, ModelBackend};
use crate::models::profile::ProfileSnapshot;
use crate::persona::{Mode, Seniority};
use crate::profile::{load_resume_text, load_snapshot, ResumeText};
use crate::report::ReportCompiler;
use crate::routes::build_router;
use crate::speech::SpeechClient;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "persona-api", version, about = "AI persona chat service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve,
    /// Refresh the portfolio snapshot from GitHub
    Sync,
    /// Chat with the persona from the terminal
    Chat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Chat => chat(config).await,
        Command::Sync => {
            let snapshot = sync::run_from_config(&config).await?;
            info!(
                "Snapshot written to {} ({} projects)",
                config.snapshot_path().display(),
                snapshot.total_projects
            );
            Ok(())
        }
    }
}

/// Reads the snapshot and resume once; a sync run takes effect on the next restart.
async fn load_profile(config: &Config) -> (Arc<ProfileSnapshot>, ResumeText) {
    let snapshot = Arc::new(load_snapshot(&config.snapshot_path()).await);
    let resume = load_resume_text(&config.resume_path()).await;
    info!(
        "Profile loaded: {} projects, resume {} chars",
        snapshot.projects.len(),
        resume.as_str().chars().count()
    );
    (snapshot, resume)
}

fn model_backend(config: &Config) -> Option<Arc<dyn ModelBackend>> {
    config.gemini_api_key.clone().map(|key| {
        let llm = LlmClient::new(key, config.gemini_model.clone());
        info!("LLM client initialized (model: {})", llm.model());
        Arc::new(llm) as Arc<dyn ModelBackend>
    })
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting Persona API v{}", env!("CARGO_PKG_VERSION"));

    let (snapshot, resume) = load_profile(&config).await;
    let backend = model_backend(&config);

    let agent = Agent::new(
        backend.clone(),
        config.candidate.clone(),
        &resume,
        snapshot,
    );
    let reports = ReportCompiler::new(backend, config.candidate.clone(), resume);
    let speech = SpeechClient::new(config.tts_api_key.clone());

    let state = AppState {
        agent: Arc::new(agent),
        reports: Arc::new(reports),
        speech,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Terminal chat with the persona, wired the same way as `serve`.
/// `exit`, `quit`, end of input or Ctrl-C end the loop.
async fn chat(config: Config) -> Result<()> {
    let (snapshot, resume) = load_profile(&config).await;
    let agent = Agent::new(
        model_backend(&config),
        config.candidate.clone(),
        &resume,
        snapshot,
    );

    let persona = format!("{}'s Agent", config.candidate.name);
    println!("\n{persona} ({}) is Online.", config.gemini_model);
    println!("{}", "-".repeat(50));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"Recruiter > ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                None
            }
        };
        let Some(line) = line else {
            println!("Shutting down...");
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_command(input) {
            println!("Shutting down...");
            break;
        }

        let answer = match agent.ask(input, Mode::Hr, Seniority::default()).await {
            Ok(reply) => reply,
            Err(e) => e.user_message(),
        };
        println!("\n{persona} > {answer}\n");
        println!("{}", "-".repeat(50));
    }

    Ok(())
}

fn is_exit_command(input: &str) -> bool {
    matches!(input.to_ascii_lowercase().as_str(), "exit" | "quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands_are_case_insensitive() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("QUIT"));
        assert!(!is_exit_command("exit please"));
    }

    #[test]
    fn test_subcommands_parse() {
        assert!(Cli::try_parse_from(["persona-api"]).unwrap().command.is_none());
        assert!(matches!(
            Cli::try_parse_from(["persona-api", "chat"]).unwrap().command,
            Some(Command::Chat)
        ));
        assert!(matches!(
            Cli::try_parse_from(["persona-api", "sync"]).unwrap().command,
            Some(Command::Sync)
        ));
    }
}
