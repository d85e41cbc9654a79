use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::OfferResponse,
    services::personalized_offer,
};

use super::AppState;

const MAX_CUSTOMER_ID_LEN: usize = 64;

const LANDING_PAGE: &str = include_str!("../../static/index.html");

/// Rejects identifiers that cannot be customer keys
fn validate_customer_id(customer_id: &str) -> AppResult<()> {
    if customer_id.is_empty() {
        return Err(AppError::InvalidInput(
            "Customer ID cannot be empty".to_string(),
        ));
    }

    if customer_id.len() > MAX_CUSTOMER_ID_LEN {
        return Err(AppError::InvalidInput(format!(
            "Customer ID must be at most {} characters",
            MAX_CUSTOMER_ID_LEN
        )));
    }

    if !customer_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::InvalidInput(
            "Customer ID may only contain letters, digits, '-' and '_'".to_string(),
        ));
    }

    Ok(())
}

/// Landing page
pub async fn index() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generates a personalized cross-sell offer for a customer
pub async fn get_customer_offer(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<OfferResponse>> {
    validate_customer_id(&customer_id)?;

    tracing::info!(
        request_id = %request_id,
        customer_id = %customer_id,
        "Processing offer request"
    );

    let recommendation = personalized_offer(
        state.profiles.as_ref(),
        state.generator.as_ref(),
        &customer_id,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        customer_id = %customer_id,
        "Offer request completed"
    );

    Ok(Json(OfferResponse::from(recommendation)))
}
