//! Error types and HTTP error response handling.
//!
//! Every failure the service can report is one of three kinds: the
//! requested resource is absent (404), the request is invalid or breaks a
//! business rule (400), or something unexpected happened (500). The mapping
//! to HTTP is done once, in `IntoResponse for AppError`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::repository::RepositoryError;

pub const ERRO_404_TRANSACAO_NAO_ENCONTRADA: &str = "Transação não encontrada";
pub const ERRO_404_NENHUMA_TRANSACAO_ENCONTRADA: &str = "Nenhuma transação encontrada";
pub const ERRO_404_RECURSO_NAO_ENCONTRADO: &str = "Recurso não encontrado";
pub const ERRO_405_METODO_NAO_PERMITIDO: &str = "Método não permitido";
pub const ERRO_500_SERVIDOR_INTERNO: &str = "Erro interno do servidor";

/// Application-wide error type.
///
/// Handlers and services return `Result<T, AppError>` and propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Requested transaction does not exist, or a listing came back empty.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// Malformed input or a business rule rejection.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    BadRequest(String),

    /// The path exists but does not accept the request method.
    ///
    /// Returns HTTP 405 Method Not Allowed.
    #[error("{}", ERRO_405_METODO_NAO_PERMITIDO)]
    MethodNotAllowed,

    /// Request fields failed validation.
    ///
    /// Returns HTTP 400 Bad Request with one `field: message` per failure.
    #[error("{}", format_validation_errors(.0))]
    Validation(#[from] ValidationErrors),

    /// Storage failure. Details are logged, never returned to the client.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Body of every non-2xx response.
///
/// ```json
/// { "status": 404, "error": "Not Found", "message": "Transação não encontrada" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageErrorResponseDto {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::Repository(source) => {
                tracing::error!(error = %source, "request failed with storage error");
                ERRO_500_SERVIDOR_INTERNO.to_string()
            }
            other => other.to_string(),
        };

        let body = MessageErrorResponseDto {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Flatten validation errors into `path: message` entries joined by `; `.
///
/// Paths use the camelCase names from the JSON body, with nested structs
/// joined by dots, e.g. `formaPagamento.parcelas: deve ser maior que 0`.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut entries = Vec::new();
    collect_errors("", errors, &mut entries);
    entries.sort();

    if entries.is_empty() {
        "Campos preenchidos incorretamente".to_string()
    } else {
        entries.join("; ")
    }
}

fn collect_errors(prefix: &str, errors: &ValidationErrors, entries: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    entries.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_errors(&path, nested, entries),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_errors(&format!("{path}[{index}]"), nested, entries);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for (i, part) in field.split('_').filter(|p| !p.is_empty()).enumerate() {
        let mut chars = part.chars();
        match chars.next() {
            Some(first) if i > 0 => {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
            _ => out.push_str(part),
        }
    }
    out
}
