//! API request/response types and the internal transfer object.
//!
//! This module defines:
//! - `TransacaoRequestDto`: body of `POST /transacao/v1/pagar`
//! - `TransacaoDto`: validated, storage-independent representation used
//!   between the converter and the services
//! - `TransacaoResponseDto`: body returned by every transaction endpoint
//!
//! All JSON field names are camelCase.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::enums::{StatusTransacao, TipoPagamento};

/// Request to pay (create a transaction).
///
/// # JSON Example
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
/// Every field is optional at the serde level so that a missing field is
/// reported through validation with its name, instead of as a JSON error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransacaoRequestDto {
    #[validate(
        required(message = "é obrigatório"),
        custom(function = "not_blank"),
        length(max = 64, message = "deve ter no máximo 64 caracteres")
    )]
    pub cartao: Option<String>,

    #[validate(required(message = "é obrigatório"), nested)]
    pub descricao: Option<DescricaoRequestDto>,

    #[validate(required(message = "é obrigatório"), nested)]
    pub forma_pagamento: Option<FormaPagamentoRequestDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DescricaoRequestDto {
    #[validate(
        required(message = "é obrigatório"),
        range(exclusive_min = 0.0, message = "deve ser maior que 0")
    )]
    pub valor: Option<f64>,

    #[validate(required(message = "é obrigatório"))]
    pub data_hora: Option<NaiveDateTime>,

    #[validate(
        required(message = "é obrigatório"),
        custom(function = "not_blank"),
        length(max = 255, message = "deve ter no máximo 255 caracteres")
    )]
    pub estabelecimento: Option<String>,

    #[validate(
        required(message = "é obrigatório"),
        custom(function = "not_blank"),
        length(max = 64, message = "deve ter no máximo 64 caracteres")
    )]
    pub nsu: Option<String>,

    #[validate(
        required(message = "é obrigatório"),
        custom(function = "not_blank"),
        length(max = 64, message = "deve ter no máximo 64 caracteres")
    )]
    pub codigo_autorizacao: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FormaPagamentoRequestDto {
    #[validate(required(message = "é obrigatório"))]
    pub tipo: Option<TipoPagamento>,

    #[validate(
        required(message = "é obrigatório"),
        range(min = 1, message = "deve ser maior que 0")
    )]
    pub parcelas: Option<i32>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("não pode estar em branco".into());
        return Err(error);
    }

    Ok(())
}

/// Internal representation of a transaction, independent of HTTP and storage.
///
/// `id` is `None` until the transaction has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransacaoDto {
    pub id: Option<i64>,
    pub cartao: String,
    pub descricao: DescricaoDto,
    pub forma_pagamento: FormaPagamentoDto,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescricaoDto {
    pub valor: f64,
    pub data_hora: NaiveDateTime,
    pub estabelecimento: String,
    pub nsu: String,
    pub codigo_autorizacao: String,
    pub status: StatusTransacao,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormaPagamentoDto {
    pub tipo: TipoPagamento,
    pub parcelas: i32,
}

/// Response returned for transaction operations.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "cartao": "4444********1234",
///   "descricao": {
///     "valor": 500.5,
///     "dataHora": "2021-05-01T18:30:00",
///     "estabelecimento": "PetShop Mundo cão",
///     "nsu": "1234567890",
///     "codigoAutorizacao": "147258369",
///     "status": "AUTORIZADO"
///   },
///   "formaPagamento": { "tipo": "AVISTA", "parcelas": 1 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransacaoResponseDto {
    pub id: i64,
    pub cartao: String,
    pub descricao: DescricaoResponseDto,
    pub forma_pagamento: FormaPagamentoResponseDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescricaoResponseDto {
    pub valor: f64,
    pub data_hora: NaiveDateTime,
    pub estabelecimento: String,
    pub nsu: String,
    pub codigo_autorizacao: String,
    pub status: StatusTransacao,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormaPagamentoResponseDto {
    pub tipo: TipoPagamento,
    pub parcelas: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::ValidationErrorsKind;

    fn valid_request() -> TransacaoRequestDto {
        serde_json::from_value(json!({
            "cartao": "4444********1234",
            "descricao": {
                "valor": 500.5,
                "dataHora": "2021-05-01T18:30:00",
                "estabelecimento": "PetShop Mundo cão",
                "nsu": "1234567890",
                "codigoAutorizacao": "147258369"
            },
            "formaPagamento": { "tipo": "AVISTA", "parcelas": 1 }
        }))
        .unwrap()
    }

    #[test]
    fn well_formed_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn missing_estabelecimento_is_a_field_error() {
        let mut request = valid_request();
        if let Some(descricao) = request.descricao.as_mut() {
            descricao.estabelecimento = None;
        }

        let errors = request.validate().unwrap_err();
        match errors.errors().get("descricao") {
            Some(ValidationErrorsKind::Struct(nested)) => {
                assert!(nested.field_errors().contains_key("estabelecimento"));
            }
            other => panic!("expected nested descricao errors, got {other:?}"),
        }
    }

    #[test]
    fn zero_installments_are_rejected() {
        let mut request = valid_request();
        if let Some(forma) = request.forma_pagamento.as_mut() {
            forma.parcelas = Some(0);
        }

        assert!(request.validate().is_err());
    }

    #[test]
    fn blank_cartao_is_rejected() {
        let mut request = valid_request();
        request.cartao = Some("   ".to_string());

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cartao"));
    }

    #[test]
    fn non_positive_valor_is_rejected() {
        let mut request = valid_request();
        if let Some(descricao) = request.descricao.as_mut() {
            descricao.valor = Some(0.0);
        }

        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_nested_objects_are_rejected() {
        let request: TransacaoRequestDto =
            serde_json::from_value(json!({ "cartao": "4444********1234" })).unwrap();

        let errors = request.validate().unwrap_err();
        assert_eq!(
            crate::error::format_validation_errors(&errors),
            "descricao: é obrigatório; formaPagamento: é obrigatório"
        );
    }
}
