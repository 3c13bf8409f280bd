//! Lexis — text analysis service: summaries, metadata, keywords, search.

use std::path::PathBuf;
use std::sync::Arc;

use lexis_core::LexisConfig;
use lexis_llm::{create_analyzer, LlmConfig};
use lexis_runtime::{AnalysisOrchestrator, OrchestratorSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LEXIS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn build_orchestrator(config: &LexisConfig) -> anyhow::Result<AnalysisOrchestrator> {
    let llm_config = LlmConfig::from_env()?;
    let analyzer = create_analyzer(&llm_config);
    Ok(AnalysisOrchestrator::new(
        analyzer,
        OrchestratorSettings::from_config(config),
    ))
}

fn print_help() {
    println!("Lexis — text analysis service");
    println!();
    println!("Usage: lexis [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  analyze <text>           Analyze text once and print the result as JSON");
    println!("  help                     Show this help message");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY           Language-model credential (mock analyzer when unset)");
    println!("  HOST, PORT               Listen address (default 0.0.0.0:8000)");
    println!("  LEXIS_DATA_DIR           Data directory (default ./data)");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "analyze" => {
                let text = args[2..].join(" ");
                if text.trim().is_empty() {
                    eprintln!("Usage: lexis analyze <text>");
                    std::process::exit(1);
                }
                let config = LexisConfig::from_env(resolve_data_dir())?;
                let orchestrator = build_orchestrator(&config)?;
                let result = orchestrator.analyze_text(&text).await?;
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'lexis help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let data_dir = resolve_data_dir();

    info!("Data directory: {}", data_dir.display());

    let config = LexisConfig::from_env(&data_dir)?;

    let store = lexis_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let orchestrator = build_orchestrator(&config)?;

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(store, orchestrator));

    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Lexis server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
