/*
claimlens - single-binary main.rs
This binary starts the Rocket HTTP server that serves the browser frontend
and the JSON API for the topic listing, summarization and fact-checking.
*/

use chrono::Utc;
use clap::Parser;
use common::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use claimlens::llm::remote::RemoteLlmProvider;
use claimlens::llm::LlmProvider;
use claimlens::news::NewsClient;
use claimlens::server::{launch_rocket, AppState};
use claimlens::state::SessionState;

#[derive(Parser, Debug)]
#[command(name = "claimlens", about = "Claimlens single-binary news tracker server")]
struct Args {
    /// Path to config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override log level (info, debug, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI args
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    // Resolve config paths
    let default_path = PathBuf::from("config.default.toml");

    let override_path = if let Some(p) = args.config {
        if !p.exists() {
            error!(path = ?p, "specified config file not found");
            return Err(anyhow::anyhow!("Config file not found: {}", p.display()));
        }
        Some(p)
    } else {
        let p = PathBuf::from("config.toml");
        if p.exists() {
            Some(p)
        } else {
            None
        }
    };

    // Load configuration with defaults
    let config = match Config::load_with_defaults(
        if default_path.exists() {
            Some(&default_path)
        } else {
            None
        },
        override_path.as_deref(),
    )
    .await
    {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(%e, "failed to load configuration");
            return Err(e);
        }
    };
    info!(default = ?default_path, override_file = ?override_path, "configuration loaded");

    let config = Arc::new(config);

    // News search client. The API key is read from the environment variable
    // named in config; an absent key is sent anyway and rejected upstream.
    let news_cfg = &config.news;
    let api_url = news_cfg
        .api_url
        .clone()
        .unwrap_or_else(|| "https://api.currentsapi.services/v1/search".to_string());
    let api_key_env = news_cfg
        .api_key_env
        .clone()
        .unwrap_or_else(|| "CURRENTS_API_KEY".to_string());
    let api_key = std::env::var(&api_key_env).unwrap_or_else(|_| {
        warn!("news API key env var '{}' not set", api_key_env);
        String::new()
    });
    let language = news_cfg
        .language
        .clone()
        .unwrap_or_else(|| "en".to_string());
    let topic = news_cfg.topic.clone().unwrap_or_else(|| "news".to_string());

    let news = Arc::new(NewsClient::new(api_url, api_key, language));
    info!("news client initialized for topic '{}'", topic);

    // Initialize LLM providers (dual mode: summarization + fact-check)
    let summarizer: Option<Arc<dyn LlmProvider>> = if let Some(ref llm_config) = config.llm {
        match create_llm_provider(llm_config, LlmTask::Summarization) {
            Ok(provider) => {
                info!("Summarization LLM provider initialized");
                Some(Arc::from(provider))
            }
            Err(e) => {
                error!("Failed to initialize summarization LLM provider: {}", e);
                None
            }
        }
    } else {
        None
    };

    let fact_checker: Option<Arc<dyn LlmProvider>> = if let Some(ref llm_config) = config.llm {
        match create_llm_provider(llm_config, LlmTask::FactCheck) {
            Ok(provider) => {
                info!("Fact-check LLM provider initialized");
                Some(Arc::from(provider))
            }
            Err(e) => {
                error!("Failed to initialize fact-check LLM provider: {}", e);
                None
            }
        }
    } else {
        None
    };

    if summarizer.is_none() || fact_checker.is_none() {
        warn!("running without a full LLM configuration; AI actions will return 503");
    }

    let state = AppState {
        started_at: Utc::now(),
        config: config.clone(),
        topic,
        news,
        session: Arc::new(SessionState::new()),
        summarizer,
        fact_checker,
    };

    // Launch the Rocket server (blocking until Rocket shuts down)
    info!("Launching Rocket HTTP server");
    launch_rocket(state).await?;

    info!("Shutdown complete");
    Ok(())
}

/// LLM task for selecting appropriate configuration
#[derive(Debug, Clone, Copy)]
enum LlmTask {
    Summarization, // Article synopsis (150 tokens @ 0.7 by default)
    FactCheck,     // Claim adjudication (150 tokens @ 0.5 by default)
}

/// Create an LLM provider based on configuration and task.
/// Task-specific sections fall back to the shared `remote` section.
fn create_llm_provider(
    llm_config: &common::LlmConfig,
    task: LlmTask,
) -> anyhow::Result<Box<dyn LlmProvider>> {
    let adapter = llm_config.adapter.as_deref().unwrap_or("none");
    match adapter {
        "remote" => {
            let endpoint_config = match task {
                LlmTask::Summarization => llm_config
                    .summarization
                    .as_ref()
                    .or(llm_config.remote.as_ref()),
                LlmTask::FactCheck => llm_config.factcheck.as_ref().or(llm_config.remote.as_ref()),
            };

            let remote_config = endpoint_config
                .ok_or_else(|| anyhow::anyhow!("No LLM config found for task {:?}", task))?;

            // Fetch API key from env var. Absence is not a local error: the
            // request goes out with an empty key and fails upstream.
            let api_key_env = remote_config
                .api_key_env
                .as_deref()
                .unwrap_or("OPENAI_API_KEY");
            let api_key = std::env::var(api_key_env).unwrap_or_else(|_| {
                warn!("LLM API key env var '{}' not set", api_key_env);
                String::new()
            });

            let model = remote_config
                .model
                .clone()
                .unwrap_or_else(|| "gpt-4o".to_string());
            let api_url = remote_config
                .api_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());
            let timeout_secs = remote_config.timeout_seconds.unwrap_or(30);
            let max_tokens = remote_config.max_tokens.unwrap_or(150);
            let temperature = remote_config.temperature.unwrap_or(match task {
                LlmTask::Summarization => 0.7,
                LlmTask::FactCheck => 0.5,
            });

            let provider = RemoteLlmProvider::new(api_url, api_key, model).with_defaults(
                timeout_secs,
                max_tokens,
                temperature,
            );
            Ok(Box::new(provider))
        }
        "none" => anyhow::bail!("LLM adapter 'none': AI actions disabled"),
        _ => anyhow::bail!("Unknown LLM adapter type: {}", adapter),
    }
}
