use crate::config::Config;
use crate::screening::batch::Pipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Parser (vocabulary + text-analysis provider) and pluggable ATS scorer.
    /// Default scorer: KeywordAtsScorer.
    pub pipeline: Pipeline,
}
