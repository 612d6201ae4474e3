use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rocket::fs::FileServer;
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{get, post, routes, State};
use serde::{Deserialize, Serialize};

use common::Config;

use crate::llm::LlmProvider;
use crate::news::{Article, NewsClient};
use crate::state::{SessionState, StateSnapshot};
use crate::verification;

/// Application state stored inside Rocket managed state.
#[derive(Clone)]
pub struct AppState {
    pub started_at: DateTime<Utc>,
    pub config: Arc<Config>,
    pub topic: String,
    pub news: Arc<NewsClient>,
    pub session: Arc<SessionState>,
    pub summarizer: Option<Arc<dyn LlmProvider>>,
    pub fact_checker: Option<Arc<dyn LlmProvider>>,
}

/// Response structure for `/api/v1/status`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    uptime_seconds: i64,
    topic: String,
    llm_configured: bool,
}

/// Request body for triggering a summarization. `content` is the article
/// description as rendered; the server does not re-fetch the listing.
#[derive(Deserialize)]
struct SummarizeRequest {
    article_id: String,
    content: String,
}

/// Request body for triggering a fact-check. The claim is the article
/// description; the headline seeds the secondary search.
#[derive(Deserialize)]
struct FactCheckRequest {
    article_id: String,
    claim: String,
    headline: String,
}

/// Redirect root to static index.html
#[get("/")]
async fn index_redirect() -> Redirect {
    Redirect::to("/static/index.html")
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

/// Status endpoint returning simple JSON with uptime and basic config info.
#[get("/api/v1/status")]
async fn status(state: &State<AppState>) -> Json<StatusResponse> {
    let now = Utc::now();
    let uptime = (now - state.started_at).num_seconds();

    Json(StatusResponse {
        status: "ok",
        uptime_seconds: uptime,
        topic: state.topic.clone(),
        llm_configured: state.summarizer.is_some() && state.fact_checker.is_some(),
    })
}

/// Main listing: search the news service for the configured topic.
/// Upstream failures map to 502; an empty list is a normal response.
#[get("/api/v1/news")]
async fn list_news(state: &State<AppState>) -> Result<Json<Vec<Article>>, Status> {
    state
        .news
        .search(&state.topic)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("topic listing failed: {}", e);
            Status::BadGateway
        })
}

/// Trigger a summarization for one article. The work runs in a spawned
/// task; progress and the result are observed via the state snapshot.
#[post("/api/v1/articles/summarize", data = "<body>")]
async fn summarize(state: &State<AppState>, body: Json<SummarizeRequest>) -> Status {
    let provider = match &state.summarizer {
        Some(p) => p.clone(),
        None => {
            tracing::warn!("summarize requested but no LLM provider configured");
            return Status::ServiceUnavailable;
        }
    };

    let session = state.session.clone();
    let topic = state.topic.clone();
    let req = body.into_inner();

    tokio::spawn(async move {
        verification::run_summarize(&session, &*provider, &topic, &req.article_id, &req.content)
            .await;
    });

    Status::Accepted
}

/// Trigger a fact-check for one article. Repeated triggers on the same
/// article are not deduplicated; the run that settles last wins.
#[post("/api/v1/articles/fact-check", data = "<body>")]
async fn fact_check(state: &State<AppState>, body: Json<FactCheckRequest>) -> Status {
    let provider = match &state.fact_checker {
        Some(p) => p.clone(),
        None => {
            tracing::warn!("fact-check requested but no LLM provider configured");
            return Status::ServiceUnavailable;
        }
    };

    let session = state.session.clone();
    let news = state.news.clone();
    let req = body.into_inner();

    tokio::spawn(async move {
        verification::run_fact_check(
            &session,
            &news,
            &*provider,
            &req.article_id,
            &req.claim,
            &req.headline,
        )
        .await;
    });

    Status::Accepted
}

/// Snapshot of all per-article state, polled by the frontend.
#[get("/api/v1/articles/state")]
async fn article_state(state: &State<AppState>) -> Json<StateSnapshot> {
    Json(state.session.snapshot())
}

/// Build and launch a Rocket server.
///
/// Bind address and port come from the `[server]` config section when
/// present, otherwise Rocket's defaults apply. This function blocks until
/// the server shuts down and returns an error if Rocket fails to start.
pub async fn launch_rocket(state: AppState) -> Result<()> {
    let mut fig = rocket::Config::figment();
    if let Some(server_cfg) = &state.config.server {
        if let Some(bind) = &server_cfg.bind {
            fig = fig.merge(("address", bind.clone()));
        }
        if let Some(port) = server_cfg.port {
            fig = fig.merge(("port", port));
        }
    }

    let rocket = rocket::custom(fig)
        .manage(state)
        .mount(
            "/",
            routes![
                index_redirect,
                health,
                status,
                list_news,
                summarize,
                fact_check,
                article_state,
            ],
        )
        .mount("/static", FileServer::from("claimlens/static"));

    tracing::info!("Starting Rocket HTTP server");
    rocket
        .launch()
        .await
        .map_err(|e| anyhow!("Rocket failed: {}", e))?;

    tracing::info!("Rocket HTTP server has shut down");
    Ok(())
}
