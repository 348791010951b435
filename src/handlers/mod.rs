//! HTTP request handlers (route handlers).
//!
//! Handlers extract request data, call the transaction service and map the
//! result to JSON. Errors are returned as `AppError` and rendered by its
//! `IntoResponse` implementation.

/// 404 and 405 responses for unmatched requests
pub mod fallback;
/// Service health endpoint
pub mod health;
/// Transaction endpoints under `/transacao/v1`
pub mod transacoes;
