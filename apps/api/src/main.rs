mod config;
mod errors;
mod extraction;
mod models;
mod nlp;
mod parsing;
mod routes;
mod scoring;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::nlp::{RuleBasedAnalyzer, TextAnalyzer};
use crate::parsing::{ResumeParser, Vocabulary};
use crate::routes::build_router;
use crate::scoring::{AtsScorer, KeywordAtsScorer};
use crate::screening::batch::Pipeline;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Load the matching vocabulary once; shared read-only from here on
    let vocabulary = match &config.vocabulary_path {
        Some(path) => Vocabulary::load(path)
            .with_context(|| format!("Failed to load vocabulary from {}", path.display()))?,
        None => Vocabulary::builtin(),
    };
    info!(
        "Vocabulary loaded: {} categories, {} skills, {} degree keywords",
        vocabulary.categories().len(),
        vocabulary.skills().len(),
        vocabulary.degree_keywords().len()
    );

    // Text-analysis provider and ATS scorer (swap implementations here)
    let analyzer: Arc<dyn TextAnalyzer> = Arc::new(RuleBasedAnalyzer::new());
    let scorer: Arc<dyn AtsScorer> = Arc::new(KeywordAtsScorer);
    info!(
        "Text analysis: {}, ATS scorer: {}",
        analyzer.backend_id(),
        scorer.backend_id()
    );

    let parser = ResumeParser::new(Arc::new(vocabulary), analyzer);
    let state = AppState {
        config: config.clone(),
        pipeline: Pipeline::new(parser, scorer),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
