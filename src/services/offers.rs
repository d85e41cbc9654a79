use crate::{
    db::ProfileRepository,
    error::{AppError, AppResult},
    models::Recommendation,
    services::{generator::RecommendationGenerator, prompt::compose_prompt},
};

/// Produces a personalized cross-sell offer for one customer
///
/// Runs the pipeline in strict order: fetch the joined profile, compose the
/// prompt, then call the model. The model is never called for an unknown
/// customer, and nothing is retried.
pub async fn personalized_offer(
    profiles: &dyn ProfileRepository,
    generator: &dyn RecommendationGenerator,
    customer_id: &str,
) -> AppResult<Recommendation> {
    let profile = profiles
        .fetch_profile(customer_id)
        .await?
        .ok_or_else(|| AppError::CustomerNotFound(customer_id.to_string()))?;

    tracing::debug!(
        customer_id = %profile.customer_id(),
        rows = profile.rows().len(),
        "Profile loaded"
    );

    let prompt = compose_prompt(&profile.to_prompt_text());
    drop(profile);

    let recommendation = generator.generate(&prompt).await?;

    tracing::info!(
        customer_id = %customer_id,
        provider = generator.name(),
        success_probability = ?recommendation.success_probability(),
        "Personalized offer generated"
    );

    Ok(recommendation)
}
