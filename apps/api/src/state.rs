use std::sync::Arc;

use crate::audit::AuditLog;
use crate::explanation::ExplanationGenerator;
use crate::shortlist::Shortlister;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Taxonomy, embedder and matcher, built once at startup.
    pub shortlister: Shortlister,
    /// `None` when no Gemini key is configured.
    pub explainer: Option<Arc<dyn ExplanationGenerator>>,
    pub audit: Arc<AuditLog>,
}
