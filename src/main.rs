use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use clap::{Parser, Subcommand};
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

use nlqa::chat;
use nlqa::config::{Settings, API_KEY_VAR};
use nlqa::llm::GeminiClient;
use nlqa::models;
use nlqa::server::{ApiServer, AppState};
use nlqa::text::Normalizer;

/// Ask a hosted LLM questions from the terminal or a web form
#[derive(Parser, Debug)]
#[command(name = "nlqa", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive question loop (default)
    Chat,
    /// Serve the question form and the /ask endpoint
    Serve {
        /// Overrides server.host
        #[arg(long)]
        host: Option<String>,
        /// Overrides server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write the available remote models to a file
    Models {
        #[arg(short, long, default_value = models::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
}

/// Main entry point for nlqa
///
/// Loads settings, starts file logging, prepares the normalizer and the
/// answer client, then runs the selected frontend.
///
/// # Errors
/// Returns an error if configuration is invalid, the server cannot bind,
/// or terminal IO fails during the chat session
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    // Load settings first
    let settings = Settings::new()?;

    // Logs go to a file so the terminal stays free for the chat
    let file_appender = tracing_appender::rolling::RollingFileAppender::new(
        tracing_appender::rolling::Rotation::DAILY,
        settings.log_dir(),
        "nlqa",
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.to_lowercase()));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        // Disable ANSI colors for cleaner log files
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(false)
        .with_env_filter(filter)
        .init();

    info!("nlqa starting up...");
    info!("Log directory: {}", settings.log_dir().display());
    info!("Model: {}", settings.gemini.model);

    let client = GeminiClient::new(&settings.gemini)?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            if let Err(e) = settings.require_api_key() {
                eprintln!("Error: {}", e);
                error!("Missing {}, exiting", API_KEY_VAR);
                drop(guard);
                std::process::exit(1);
            }
            let normalizer = Normalizer::new()?;
            chat::chat_loop(&normalizer, &client).await?;
        }
        Command::Serve { host, port } => {
            if settings.api_key().is_none() {
                // Passed through: every /ask will report the missing key
                warn!("No API key configured; answers will contain an error message");
            }
            let normalizer = Normalizer::new()?;
            let state = AppState {
                normalizer,
                client: Arc::new(client),
            };
            let server = ApiServer::new(
                state,
                host.unwrap_or_else(|| settings.server.host.clone()),
                port.unwrap_or(settings.server.port),
            );
            server.start().await?;
        }
        Command::Models { output } => {
            println!("Listing available models...");
            match models::list_models_to_file(&client, &output).await {
                Ok(list) => {
                    println!("{}", models::models_table(&list));
                    println!("Models written to {}", output.display());
                }
                Err(e) => {
                    error!("Model listing failed: {:#}", e);
                    println!("Error: {:#}", e);
                    drop(guard);
                    std::process::exit(1);
                }
            }
        }
    }

    info!("nlqa shutting down");
    drop(guard);
    Ok(())
}
