pub mod generator;
pub mod offers;
pub mod prompt;

pub use generator::{GenerationError, OpenAiGenerator, RecommendationGenerator};
pub use offers::personalized_offer;
pub use prompt::compose_prompt;
