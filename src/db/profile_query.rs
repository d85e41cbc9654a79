use sqlx::PgPool;

use crate::models::ProfileRow;

/// Joined customer profile, one row per combination of dependent records.
///
/// The identifier is bound as `$1`; columns are cast to text so the row shape
/// does not depend on the numeric and date types of the underlying schema.
const PROFILE_SQL: &str = r#"
SELECT
  c.customer_id,
  c.first_name,
  c.last_name,
  c.age::text AS age,
  c.annual_income::text AS annual_income,
  f.credit_score::text AS credit_score,
  f.risk_profile,
  d.app_logins_last_month::text AS app_logins_last_month,
  d.last_login::text AS last_login,
  s.average_balance::text AS average_balance,
  pl.status AS personal_loan_status,
  hl.status AS home_loan_status,
  hl.loan_amount::text AS loan_amount,
  i.type AS insurance_type,
  i.status AS insurance_status
FROM customers c
LEFT JOIN financial_behavior f ON c.customer_id = f.customer_id
LEFT JOIN digital_engagement d ON c.customer_id = d.customer_id
LEFT JOIN savings_accounts s ON c.customer_id = s.customer_id
LEFT JOIN personal_loans pl ON c.customer_id = pl.customer_id
LEFT JOIN home_loans hl ON c.customer_id = hl.customer_id
LEFT JOIN insurances i ON c.customer_id = i.customer_id
WHERE c.customer_id = $1
ORDER BY
  credit_score NULLS LAST,
  last_login NULLS LAST,
  average_balance NULLS LAST,
  personal_loan_status NULLS LAST,
  home_loan_status NULLS LAST,
  loan_amount NULLS LAST,
  insurance_type NULLS LAST,
  insurance_status NULLS LAST
"#;

/// A read-only profile query bound to one customer identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileQuery {
    customer_id: String,
}

/// Builds the profile query for `customer_id`
///
/// No validation happens here; the identifier only ever travels as a bound
/// parameter.
pub fn build_profile_query(customer_id: &str) -> ProfileQuery {
    ProfileQuery {
        customer_id: customer_id.to_string(),
    }
}

impl ProfileQuery {
    pub fn sql(&self) -> &'static str {
        PROFILE_SQL
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Executes the query and returns every joined row
    pub async fn fetch_all(&self, pool: &PgPool) -> Result<Vec<ProfileRow>, sqlx::Error> {
        sqlx::query_as::<_, ProfileRow>(self.sql())
            .bind(self.customer_id())
            .fetch_all(pool)
            .await
    }
}
