use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use mockall::mock;
use serde_json::Value;

use offer_api::{
    api::{create_router, AppState},
    db::ProfileRepository,
    error::{AppError, AppResult},
    models::{CustomerProfile, ProfileRow, Prompt, Recommendation},
    services::{GenerationError, RecommendationGenerator},
};

mock! {
    pub Profiles {}

    #[async_trait]
    impl ProfileRepository for Profiles {
        async fn fetch_profile(&self, customer_id: &str) -> AppResult<Option<CustomerProfile>>;
    }
}

mock! {
    pub Generator {}

    #[async_trait]
    impl RecommendationGenerator for Generator {
        async fn generate(&self, prompt: &Prompt) -> Result<Recommendation, GenerationError>;
        fn name(&self) -> &'static str;
    }
}

const OFFER_TEXT: &str = "**Recommended Product/Service:** Premium travel credit card\n\
**Why this is a good fit:** Strong credit score and high digital engagement.\n\
**Estimated success probability:** 78%";

fn complete_profile(customer_id: &str) -> CustomerProfile {
    let row = ProfileRow {
        customer_id: customer_id.to_string(),
        first_name: Some("Ananya".to_string()),
        last_name: Some("Sharma".to_string()),
        age: Some("34".to_string()),
        annual_income: Some("1850000.00".to_string()),
        credit_score: Some("782".to_string()),
        risk_profile: Some("Moderate".to_string()),
        app_logins_last_month: Some("27".to_string()),
        last_login: Some("2024-05-28 09:14:00+00".to_string()),
        average_balance: Some("425000.00".to_string()),
        personal_loan_status: Some("Closed".to_string()),
        home_loan_status: Some("Active".to_string()),
        loan_amount: Some("6500000.00".to_string()),
        insurance_type: Some("Health".to_string()),
        insurance_status: Some("Active".to_string()),
    };
    CustomerProfile::from_rows(vec![row]).unwrap()
}

fn generator_returning_offer() -> MockGenerator {
    let mut generator = MockGenerator::new();
    generator.expect_name().return_const("mock");
    generator
        .expect_generate()
        .returning(|_| Ok(Recommendation::new(OFFER_TEXT)));
    generator
}

fn create_test_server(profiles: MockProfiles, generator: MockGenerator) -> TestServer {
    let state = AppState::new(Arc::new(profiles), Arc::new(generator));
    TestServer::new(create_router(state)).unwrap()
}

fn has_probability_token(text: &str) -> bool {
    text.split_whitespace()
        .any(|word| word.trim_end_matches(['.', ',']).ends_with('%'))
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(MockProfiles::new(), MockGenerator::new());
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_landing_page_served() {
    let server = create_test_server(MockProfiles::new(), MockGenerator::new());
    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("Personalized Cross-Sell Offers"));
}

#[tokio::test]
async fn test_offer_for_seeded_customer() {
    let mut profiles = MockProfiles::new();
    profiles
        .expect_fetch_profile()
        .withf(|customer_id: &str| customer_id == "GC000001")
        .times(1)
        .returning(|customer_id| Ok(Some(complete_profile(customer_id))));

    let mut generator = MockGenerator::new();
    generator.expect_name().return_const("mock");
    generator
        .expect_generate()
        .withf(|prompt: &Prompt| {
            prompt.as_str().contains("customer_id: GC000001")
                && prompt.as_str().contains("credit_score: 782")
                && prompt.as_str().contains("insurance_type: Health")
        })
        .times(1)
        .returning(|_| Ok(Recommendation::new(OFFER_TEXT)));

    let server = create_test_server(profiles, generator);
    let response = server.get("/customer/GC000001").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let offer = body["personalized_offer"].as_str().unwrap();
    assert!(!offer.is_empty());
    assert!(offer.contains("Recommended Product/Service"));
    assert!(offer.contains("Why this is a good fit"));
    assert!(has_probability_token(offer));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_unknown_customer_never_calls_model() {
    let mut profiles = MockProfiles::new();
    profiles
        .expect_fetch_profile()
        .withf(|customer_id: &str| customer_id == "ZZ000000")
        .times(1)
        .returning(|_| Ok(None));

    let mut generator = MockGenerator::new();
    generator.expect_generate().never();

    let server = create_test_server(profiles, generator);
    let response = server.get("/customer/ZZ000000").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("not found"));
    assert!(error.contains("ZZ000000"));
    assert!(body.get("personalized_offer").is_none());
}

#[tokio::test]
async fn test_database_failure_keeps_serving() {
    let mut profiles = MockProfiles::new();
    profiles
        .expect_fetch_profile()
        .withf(|customer_id: &str| customer_id == "GC000001")
        .times(1)
        .returning(|_| Err(AppError::DataAccess(sqlx::Error::PoolTimedOut)));
    profiles
        .expect_fetch_profile()
        .withf(|customer_id: &str| customer_id == "GC000002")
        .times(1)
        .returning(|customer_id| Ok(Some(complete_profile(customer_id))));

    let server = create_test_server(profiles, generator_returning_offer());

    let failed = server.get("/customer/GC000001").await;
    failed.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = failed.json();
    assert!(body["error"].as_str().unwrap().starts_with("Database error"));

    let recovered = server.get("/customer/GC000002").await;
    recovered.assert_status_ok();
    let body: Value = recovered.json();
    assert!(has_probability_token(
        body["personalized_offer"].as_str().unwrap()
    ));
}

#[tokio::test]
async fn test_generation_failure_returns_bad_gateway() {
    let mut profiles = MockProfiles::new();
    profiles
        .expect_fetch_profile()
        .returning(|customer_id| Ok(Some(complete_profile(customer_id))));

    let mut generator = MockGenerator::new();
    generator.expect_name().return_const("mock");
    generator.expect_generate().times(1).returning(|_| {
        Err(GenerationError::Authentication {
            status: 401,
            body: "invalid api key".to_string(),
        })
    });

    let server = create_test_server(profiles, generator);
    let response = server.get("/customer/GC000001").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Recommendation generation failed"));
}

#[tokio::test]
async fn test_invalid_customer_id_rejected_before_query() {
    let mut profiles = MockProfiles::new();
    profiles.expect_fetch_profile().never();
    let mut generator = MockGenerator::new();
    generator.expect_generate().never();

    let server = create_test_server(profiles, generator);
    let response = server.get("/customer/GC0001%27%20OR%201=1").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn test_request_id_echoed() {
    let mut profiles = MockProfiles::new();
    profiles.expect_fetch_profile().returning(|_| Ok(None));

    let server = create_test_server(profiles, MockGenerator::new());
    let response = server
        .get("/customer/ZZ000000")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("7f3c2a4e-1b6d-4c8e-9a0f-2d5b6e7c8a91"),
        )
        .await;

    assert_eq!(
        response.header("x-request-id"),
        "7f3c2a4e-1b6d-4c8e-9a0f-2d5b6e7c8a91"
    );
}
