//! Router fallbacks, so unmatched requests get the standard error body.

use crate::error::{AppError, ERRO_404_RECURSO_NAO_ENCONTRADO};

/// No route matches the request path.
pub async fn not_found() -> AppError {
    AppError::NotFound(ERRO_404_RECURSO_NAO_ENCONTRADO.to_string())
}

/// The path matches a route that does not accept the request method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
