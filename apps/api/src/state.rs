use crate::config::Config;
use crate::recommendation::pipeline::SubmissionPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Store, completion client and renderer behind trait objects.
    pub pipeline: SubmissionPipeline,
    pub config: Config,
}
