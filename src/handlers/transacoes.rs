//! Transaction HTTP handlers.
//!
//! This module implements the endpoints under `/transacao/v1`:
//! - GET /buscar/{id} - Fetch one transaction
//! - GET /listar - List every transaction
//! - POST /pagar - Record a payment
//! - PUT /estornar/{id} - Reverse an authorized transaction
//!
//! Extractor rejections (non-numeric id, malformed JSON, unknown enum value)
//! are taken as `Result` and turned into `AppError::BadRequest`, so every
//! failure shares the same error body.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    AppState,
    converter,
    error::AppError,
    models::dto::{TransacaoRequestDto, TransacaoResponseDto},
};

/// Fetch a transaction by id.
///
/// # Response
///
/// - **200 OK**: the transaction
/// - **400**: id is not an integer
/// - **404**: no transaction with this id
pub async fn buscar_transacao(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransacaoResponseDto>, AppError> {
    let Path(id) = id?;

    let dto = state.transacao_service.buscar_transacao(id).await?;

    Ok(Json(converter::dto_to_response(dto)?))
}

/// List all transactions, ordered by id.
///
/// # Response
///
/// - **200 OK**: non-empty array of transactions
/// - **404**: no transaction recorded yet (never an empty array)
pub async fn listar_transacoes(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransacaoResponseDto>>, AppError> {
    let dtos = state.transacao_service.listar_transacoes().await?;

    let responses = dtos
        .into_iter()
        .map(converter::dto_to_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

/// Record a payment.
///
/// # Request Body
///
/// ```json
/// {
///   "cartao": "4444********1234",
///   "descricao": {
///     "valor": 500.5,
///     "dataHora": "2021-05-01T18:30:00",
///     "estabelecimento": "PetShop Mundo cão",
///     "nsu": "1234567890",
///     "codigoAutorizacao": "147258369"
///   },
///   "formaPagamento": { "tipo": "AVISTA", "parcelas": 1 }
/// }
/// ```
///
/// # Response
///
/// - **200 OK**: the created transaction, status `AUTORIZADO`
/// - **400**: malformed JSON, missing or invalid fields
pub async fn pagar(
    State(state): State<AppState>,
    request: Result<Json<TransacaoRequestDto>, JsonRejection>,
) -> Result<Json<TransacaoResponseDto>, AppError> {
    let Json(request) = request?;

    let dto = state.transacao_service.pagar(request).await?;

    Ok(Json(converter::dto_to_response(dto)?))
}

/// Reverse a transaction.
///
/// # Response
///
/// - **200 OK**: the transaction with status `NEGADO`
/// - **400**: id is not an integer, or the transaction is not `AUTORIZADO`
/// - **404**: no transaction with this id
pub async fn estornar(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransacaoResponseDto>, AppError> {
    let Path(id) = id?;

    let dto = state.transacao_service.estornar(id).await?;

    Ok(Json(converter::dto_to_response(dto)?))
}
