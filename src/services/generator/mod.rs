//! Generative model abstraction
//!
//! The offer pipeline only needs "prompt in, text out". Hosted providers sit
//! behind this trait so handlers and tests never depend on a concrete API.

use crate::models::{Prompt, Recommendation};

pub mod openai;

pub use openai::{GeneratorSettings, OpenAiGenerator};

/// Failure of a single model call, with the underlying cause attached
#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model rejected credentials ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("model rate limit or quota exceeded: {0}")]
    RateLimited(String),

    #[error("model API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Trait for recommendation generators
///
/// One prompt, one completion. Implementations must not retry and must not
/// keep conversation state between calls.
#[async_trait::async_trait]
pub trait RecommendationGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<Recommendation, GenerationError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
