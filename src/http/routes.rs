use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};

use crate::application::LedgerService;
use crate::domain::format_cents;

use super::{dto, errors};

/// Header carrying the tax id on every per-customer route.
pub const TAX_ID_HEADER: &str = "tax-id";

pub fn router() -> Router {
    Router::new()
        .route(
            "/accounts",
            post(create_account)
                .get(list_accounts)
                .put(update_account)
                .delete(delete_account),
        )
        .route("/statements", get(statements))
        .route("/statement/date", get(statement_by_date))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/balance", get(balance))
}

/// Pull the tax id from the request headers. Per-customer routes resolve the
/// customer through the service; a missing or blank header behaves like an
/// unknown customer and yields the same 404.
fn extract_tax_id(headers: &HeaderMap) -> Result<&str, axum::response::Response> {
    let value = headers
        .get(TAX_ID_HEADER)
        .ok_or_else(missing_tax_id)?
        .to_str()
        .map_err(|_| missing_tax_id())?
        .trim();

    if value.is_empty() {
        return Err(missing_tax_id());
    }

    Ok(value)
}

fn missing_tax_id() -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "customer_not_found",
        "Customer not found",
    )
}

pub async fn create_account(
    Extension(service): Extension<Arc<LedgerService>>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    match service.register_customer(&body.tax_id, &body.name) {
        Ok(_) => StatusCode::CREATED.into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn list_accounts(
    Extension(service): Extension<Arc<LedgerService>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(service.list_customers())).into_response()
}

pub async fn update_account(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
    Json(body): Json<dto::UpdateAccountRequest>,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.rename_customer(tax_id, &body.name) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn delete_account(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.remove_customer(tax_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn statements(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.statement(tax_id) {
        Ok(operations) => (StatusCode::OK, Json(operations)).into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn statement_by_date(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
    Query(query): Query<dto::StatementDateQuery>,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.statement_on(tax_id, &query.date) {
        Ok(operations) => (StatusCode::OK, Json(operations)).into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn deposit(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
    Json(body): Json<dto::DepositRequest>,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.deposit(tax_id, &body.amount, body.description) {
        Ok(_) => StatusCode::CREATED.into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn withdraw(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
    Json(body): Json<dto::WithdrawRequest>,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.withdraw(tax_id, &body.amount) {
        Ok(_) => StatusCode::CREATED.into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}

pub async fn balance(
    Extension(service): Extension<Arc<LedgerService>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let tax_id = match extract_tax_id(&headers) {
        Ok(tax_id) => tax_id,
        Err(resp) => return resp,
    };

    match service.balance(tax_id) {
        Ok(balance) => (StatusCode::OK, Json(format_cents(balance))).into_response(),
        Err(err) => errors::app_error_to_response(err),
    }
}
