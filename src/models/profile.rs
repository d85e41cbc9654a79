/// Column names of a profile row, in the order they are selected and rendered
pub const PROFILE_COLUMNS: [&str; 15] = [
    "customer_id",
    "first_name",
    "last_name",
    "age",
    "annual_income",
    "credit_score",
    "risk_profile",
    "app_logins_last_month",
    "last_login",
    "average_balance",
    "personal_loan_status",
    "home_loan_status",
    "loan_amount",
    "insurance_type",
    "insurance_status",
];

const MISSING_VALUE: &str = "N/A";

/// One joined row across the customer tables
///
/// Every dependent column is optional because the dependent tables are
/// left-joined: a customer without a home loan still yields a row, with the
/// home loan columns empty.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ProfileRow {
    pub customer_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<String>,
    pub annual_income: Option<String>,
    pub credit_score: Option<String>,
    pub risk_profile: Option<String>,
    pub app_logins_last_month: Option<String>,
    pub last_login: Option<String>,
    pub average_balance: Option<String>,
    pub personal_loan_status: Option<String>,
    pub home_loan_status: Option<String>,
    pub loan_amount: Option<String>,
    pub insurance_type: Option<String>,
    pub insurance_status: Option<String>,
}

impl ProfileRow {
    /// Column/value pairs in `PROFILE_COLUMNS` order
    pub fn fields(&self) -> [(&'static str, Option<&str>); 15] {
        [
            (PROFILE_COLUMNS[0], Some(self.customer_id.as_str())),
            (PROFILE_COLUMNS[1], self.first_name.as_deref()),
            (PROFILE_COLUMNS[2], self.last_name.as_deref()),
            (PROFILE_COLUMNS[3], self.age.as_deref()),
            (PROFILE_COLUMNS[4], self.annual_income.as_deref()),
            (PROFILE_COLUMNS[5], self.credit_score.as_deref()),
            (PROFILE_COLUMNS[6], self.risk_profile.as_deref()),
            (PROFILE_COLUMNS[7], self.app_logins_last_month.as_deref()),
            (PROFILE_COLUMNS[8], self.last_login.as_deref()),
            (PROFILE_COLUMNS[9], self.average_balance.as_deref()),
            (PROFILE_COLUMNS[10], self.personal_loan_status.as_deref()),
            (PROFILE_COLUMNS[11], self.home_loan_status.as_deref()),
            (PROFILE_COLUMNS[12], self.loan_amount.as_deref()),
            (PROFILE_COLUMNS[13], self.insurance_type.as_deref()),
            (PROFILE_COLUMNS[14], self.insurance_status.as_deref()),
        ]
    }

    /// Creates a row with only the identifier set
    pub fn empty(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            first_name: None,
            last_name: None,
            age: None,
            annual_income: None,
            credit_score: None,
            risk_profile: None,
            app_logins_last_month: None,
            last_login: None,
            average_balance: None,
            personal_loan_status: None,
            home_loan_status: None,
            loan_amount: None,
            insurance_type: None,
            insurance_status: None,
        }
    }
}

/// The joined record for one customer
///
/// Holds every row the join produced (a customer with two insurance policies
/// yields two rows). Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    customer_id: String,
    rows: Vec<ProfileRow>,
}

impl CustomerProfile {
    /// Builds a profile from query rows, or `None` when the join returned nothing
    pub fn from_rows(rows: Vec<ProfileRow>) -> Option<Self> {
        let customer_id = rows.first()?.customer_id.clone();
        Some(Self { customer_id, rows })
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn rows(&self) -> &[ProfileRow] {
        &self.rows
    }

    /// Renders the profile as `column: value` lines for prompt embedding
    ///
    /// Output is deterministic for a given row set: columns follow
    /// `PROFILE_COLUMNS`, nulls render as `N/A`, and a `Record i of n` header
    /// separates rows when the join produced more than one.
    pub fn to_prompt_text(&self) -> String {
        let total = self.rows.len();
        let mut blocks = Vec::with_capacity(total);

        for (index, row) in self.rows.iter().enumerate() {
            let mut lines = Vec::with_capacity(PROFILE_COLUMNS.len() + 1);
            if total > 1 {
                lines.push(format!("Record {} of {}", index + 1, total));
            }
            for (column, value) in row.fields() {
                lines.push(format!("{}: {}", column, value.unwrap_or(MISSING_VALUE)));
            }
            blocks.push(lines.join("\n"));
        }

        blocks.join("\n\n")
    }
}
