use std::sync::Arc;

use crate::{db::ProfileRepository, services::RecommendationGenerator};

/// Shared application state
///
/// Holds the injected pipeline collaborators. Both are safe to share across
/// concurrent requests and carry no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub generator: Arc<dyn RecommendationGenerator>,
}

impl AppState {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        generator: Arc<dyn RecommendationGenerator>,
    ) -> Self {
        Self {
            profiles,
            generator,
        }
    }
}
