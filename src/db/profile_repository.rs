use std::time::Instant;

use sqlx::PgPool;

use crate::{db::profile_query::build_profile_query, error::AppResult, models::CustomerProfile};

/// Source of joined customer profiles
///
/// `Ok(None)` means the base `customers` row does not exist. Connection and
/// query failures come back as `AppError::DataAccess`.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn fetch_profile(&self, customer_id: &str) -> AppResult<Option<CustomerProfile>>;
}

/// Profile repository backed by a read-only PostgreSQL pool
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn fetch_profile(&self, customer_id: &str) -> AppResult<Option<CustomerProfile>> {
        let start = Instant::now();
        let query = build_profile_query(customer_id);

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!(
                customer_id = %customer_id,
                error = %e,
                "Profile query failed"
            );
            e
        })?;

        tracing::debug!(
            customer_id = %customer_id,
            rows = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Profile query completed"
        );

        Ok(CustomerProfile::from_rows(rows))
    }
}
