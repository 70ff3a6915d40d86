use std::sync::Arc;

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::reviews::generator::ReviewGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-batch data: every request builds and discards its own batch.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generator. Default: LlmReviewGenerator over the chat-completions client.
    pub generator: Arc<dyn ReviewGenerator>,
    /// Pluggable document extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn DocumentExtractor>,
    pub config: Config,
}
