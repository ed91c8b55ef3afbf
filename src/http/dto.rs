use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub tax_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct StatementDateQuery {
    /// Missing `?date=` deserializes to an empty string, which the service
    /// rejects as an invalid date.
    #[serde(default)]
    pub date: String,
}
