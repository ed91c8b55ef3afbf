//! HTTP boundary: a thin axum surface over the ledger service.
//!
//! - `routes.rs`: routes + handlers
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Router, extract::Extension};

use crate::application::LedgerService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests). The service is shared by every handler.
pub fn build_router(service: Arc<LedgerService>) -> Router {
    routes::router().layer(Extension(service))
}
