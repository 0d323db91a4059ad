mod audit;
mod config;
mod documents;
mod embedding;
mod errors;
mod explanation;
mod extraction;
mod llm_client;
mod matching;
mod routes;
mod shortlist;
mod state;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::audit::AuditLog;
use crate::config::Config;
use crate::embedding::build_embedder;
use crate::explanation::{ExplanationGenerator, GeminiExplainer};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::shortlist::Shortlister;
use crate::state::AppState;
use crate::taxonomy::SkillTaxonomy;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shortlist API v{}", env!("CARGO_PKG_VERSION"));

    // Embedding model: built once, shared by every request. Failure is fatal.
    let backend = config.embedding_backend;
    let dimension = config.embedding_dimension;
    let embedder = tokio::task::spawn_blocking(move || build_embedder(backend, dimension))
        .await?
        .context("Failed to initialize embedding model")?;

    let taxonomy = SkillTaxonomy::builtin().with_custom_skills(&config.custom_skills);
    info!(
        terms = taxonomy.len(),
        custom = config.custom_skills.len(),
        "Skill taxonomy loaded"
    );

    let shortlister = Shortlister::new(
        Arc::new(taxonomy),
        embedder,
        config.skill_match_threshold,
    );

    let explainer: Option<Arc<dyn ExplanationGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone()).context("Failed to build Gemini client")?;
            info!("Explanation generator initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(GeminiExplainer::new(llm)))
        }
        None => {
            warn!("GEMINI_API_KEY not set; explanations will use the deterministic fallback");
            None
        }
    };

    let audit = AuditLog::open(&config.audit_log_path).with_context(|| {
        format!(
            "Failed to open audit log at {}",
            config.audit_log_path.display()
        )
    })?;
    info!("Audit log: {}", audit.path().display());

    // Build app state
    let state = AppState {
        shortlister,
        explainer,
        audit: Arc::new(audit),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
