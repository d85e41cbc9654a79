//! Loads a customer fixture document into the profile tables.
//!
//! The fixture mirrors the export format used by the data team: a single
//! `customer_profile` object with one section per table. Seeding replaces any
//! existing rows for the same customer, so it can be re-run safely.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureDocument {
    pub customer_profile: CustomerFixture,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerFixture {
    pub personal_info: PersonalInfo,
    pub contact_info: Option<ContactInfo>,
    pub financial_behavior: Option<FinancialBehavior>,
    pub digital_engagement: Option<DigitalEngagement>,
    #[serde(default)]
    pub savings_accounts: Vec<SavingsAccount>,
    #[serde(default)]
    pub personal_loans: Vec<Loan>,
    #[serde(default)]
    pub home_loans: Vec<Loan>,
    #[serde(default)]
    pub insurances: Vec<Insurance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonalInfo {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub marital_status: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub employment_status: Option<String>,
    pub occupation: Option<String>,
    pub annual_income: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinancialBehavior {
    pub credit_score: Option<i32>,
    pub risk_profile: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigitalEngagement {
    pub app_logins_last_month: Option<i32>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavingsAccount {
    pub account_number: Option<String>,
    pub average_balance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Loan {
    pub loan_id: Option<String>,
    pub status: Option<String>,
    pub loan_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Insurance {
    pub policy_id: Option<String>,
    #[serde(rename = "type")]
    pub insurance_type: Option<String>,
    pub status: Option<String>,
}

/// Parses a fixture document
pub fn parse_fixture(json: &str) -> Result<CustomerFixture, serde_json::Error> {
    serde_json::from_str::<FixtureDocument>(json).map(|doc| doc.customer_profile)
}

/// Inserts one customer and all dependent records in a single transaction
pub async fn seed_customer(pool: &PgPool, fixture: &CustomerFixture) -> Result<(), sqlx::Error> {
    let personal = &fixture.personal_info;
    let customer_id = personal.customer_id.as_str();
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM customers WHERE customer_id = $1")
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO customers (customer_id, first_name, last_name, gender, date_of_birth, age,
            marital_status, city, state, employment_status, occupation, annual_income)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12::numeric)
        "#,
    )
    .bind(customer_id)
    .bind(&personal.first_name)
    .bind(&personal.last_name)
    .bind(&personal.gender)
    .bind(personal.date_of_birth)
    .bind(personal.age)
    .bind(&personal.marital_status)
    .bind(&personal.city)
    .bind(&personal.state)
    .bind(&personal.employment_status)
    .bind(&personal.occupation)
    .bind(personal.annual_income)
    .execute(&mut *tx)
    .await?;

    if let Some(contact) = &fixture.contact_info {
        sqlx::query(
            "INSERT INTO contact_info (customer_id, email, phone_number) VALUES ($1, $2, $3)",
        )
        .bind(customer_id)
        .bind(&contact.email)
        .bind(&contact.phone_number)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(financial) = &fixture.financial_behavior {
        sqlx::query(
            "INSERT INTO financial_behavior (customer_id, credit_score, risk_profile) VALUES ($1, $2, $3)",
        )
        .bind(customer_id)
        .bind(financial.credit_score)
        .bind(&financial.risk_profile)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(digital) = &fixture.digital_engagement {
        sqlx::query(
            "INSERT INTO digital_engagement (customer_id, app_logins_last_month, last_login) VALUES ($1, $2, $3)",
        )
        .bind(customer_id)
        .bind(digital.app_logins_last_month)
        .bind(digital.last_login)
        .execute(&mut *tx)
        .await?;
    }

    for account in &fixture.savings_accounts {
        sqlx::query(
            "INSERT INTO savings_accounts (customer_id, account_number, average_balance) VALUES ($1, $2, $3::numeric)",
        )
        .bind(customer_id)
        .bind(&account.account_number)
        .bind(account.average_balance)
        .execute(&mut *tx)
        .await?;
    }

    for (table, loans) in [
        ("personal_loans", &fixture.personal_loans),
        ("home_loans", &fixture.home_loans),
    ] {
        let sql = format!(
            "INSERT INTO {} (customer_id, loan_id, status, loan_amount) VALUES ($1, $2, $3, $4::numeric)",
            table
        );
        for loan in loans {
            sqlx::query(&sql)
                .bind(customer_id)
                .bind(&loan.loan_id)
                .bind(&loan.status)
                .bind(loan.loan_amount)
                .execute(&mut *tx)
                .await?;
        }
    }

    for insurance in &fixture.insurances {
        sqlx::query(
            "INSERT INTO insurances (customer_id, policy_id, type, status) VALUES ($1, $2, $3, $4)",
        )
        .bind(customer_id)
        .bind(&insurance.policy_id)
        .bind(&insurance.insurance_type)
        .bind(&insurance.status)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        customer_id = %customer_id,
        savings_accounts = fixture.savings_accounts.len(),
        personal_loans = fixture.personal_loans.len(),
        home_loans = fixture.home_loans.len(),
        insurances = fixture.insurances.len(),
        "Customer seeded"
    );

    Ok(())
}
