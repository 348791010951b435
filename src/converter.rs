//! Mapping between request DTOs, the internal `TransacaoDto`, persisted
//! entities and response DTOs.
//!
//! All functions are pure. Ids flow from entity to DTO only; building an
//! entity always leaves ids unset for the storage layer to assign.

use crate::{
    error::AppError,
    models::{
        dto::{
            DescricaoDto, DescricaoResponseDto, FormaPagamentoDto, FormaPagamentoResponseDto,
            TransacaoDto, TransacaoRequestDto, TransacaoResponseDto,
        },
        enums::StatusTransacao,
        transacao::{DescricaoTransacao, FormaPagamento, Transacao},
    },
    repository::RepositoryError,
};

/// Copy a validated request into a `TransacaoDto` with status `AUTORIZADO`.
///
/// Validation runs before this; a missing field here still yields
/// `BadRequest` rather than a panic.
pub fn request_to_dto(request: TransacaoRequestDto) -> Result<TransacaoDto, AppError> {
    let descricao = request.descricao.ok_or_else(|| missing("descricao"))?;
    let forma = request
        .forma_pagamento
        .ok_or_else(|| missing("formaPagamento"))?;

    Ok(TransacaoDto {
        id: None,
        cartao: request.cartao.ok_or_else(|| missing("cartao"))?,
        descricao: DescricaoDto {
            valor: descricao.valor.ok_or_else(|| missing("descricao.valor"))?,
            data_hora: descricao
                .data_hora
                .ok_or_else(|| missing("descricao.dataHora"))?,
            estabelecimento: descricao
                .estabelecimento
                .ok_or_else(|| missing("descricao.estabelecimento"))?,
            nsu: descricao.nsu.ok_or_else(|| missing("descricao.nsu"))?,
            codigo_autorizacao: descricao
                .codigo_autorizacao
                .ok_or_else(|| missing("descricao.codigoAutorizacao"))?,
            status: StatusTransacao::Autorizado,
        },
        forma_pagamento: FormaPagamentoDto {
            tipo: forma.tipo.ok_or_else(|| missing("formaPagamento.tipo"))?,
            parcelas: forma
                .parcelas
                .ok_or_else(|| missing("formaPagamento.parcelas"))?,
        },
    })
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("{field}: é obrigatório"))
}

/// Build a persistable entity graph; every id is left `None`.
pub fn dto_to_model(dto: &TransacaoDto) -> Transacao {
    Transacao {
        id: None,
        cartao: dto.cartao.clone(),
        descricao: DescricaoTransacao {
            id: None,
            valor: dto.descricao.valor,
            data_hora: dto.descricao.data_hora,
            estabelecimento: dto.descricao.estabelecimento.clone(),
            nsu: dto.descricao.nsu.clone(),
            codigo_autorizacao: dto.descricao.codigo_autorizacao.clone(),
            status: dto.descricao.status,
        },
        forma_pagamento: FormaPagamento {
            id: None,
            tipo: dto.forma_pagamento.tipo,
            parcelas: dto.forma_pagamento.parcelas,
        },
    }
}

pub fn model_to_dto(transacao: Transacao) -> TransacaoDto {
    TransacaoDto {
        id: transacao.id,
        cartao: transacao.cartao,
        descricao: DescricaoDto {
            valor: transacao.descricao.valor,
            data_hora: transacao.descricao.data_hora,
            estabelecimento: transacao.descricao.estabelecimento,
            nsu: transacao.descricao.nsu,
            codigo_autorizacao: transacao.descricao.codigo_autorizacao,
            status: transacao.descricao.status,
        },
        forma_pagamento: FormaPagamentoDto {
            tipo: transacao.forma_pagamento.tipo,
            parcelas: transacao.forma_pagamento.parcelas,
        },
    }
}

/// Map a persisted `TransacaoDto` to the response body.
///
/// # Errors
///
/// A DTO that was never persisted has no id; that is an internal
/// inconsistency and surfaces as a 500.
pub fn dto_to_response(dto: TransacaoDto) -> Result<TransacaoResponseDto, AppError> {
    let id = dto.id.ok_or_else(|| {
        AppError::Repository(RepositoryError::Corrupted(
            "transaction has no id".to_string(),
        ))
    })?;

    Ok(TransacaoResponseDto {
        id,
        cartao: dto.cartao,
        descricao: DescricaoResponseDto {
            valor: dto.descricao.valor,
            data_hora: dto.descricao.data_hora,
            estabelecimento: dto.descricao.estabelecimento,
            nsu: dto.descricao.nsu,
            codigo_autorizacao: dto.descricao.codigo_autorizacao,
            status: dto.descricao.status,
        },
        forma_pagamento: FormaPagamentoResponseDto {
            tipo: dto.forma_pagamento.tipo,
            parcelas: dto.forma_pagamento.parcelas,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::TipoPagamento;
    use serde_json::json;

    fn request() -> TransacaoRequestDto {
        serde_json::from_value(json!({
            "cartao": "4444********1234",
            "descricao": {
                "valor": 500.5,
                "dataHora": "2021-05-01T18:30:00",
                "estabelecimento": "PetShop Mundo cão",
                "nsu": "1234567890",
                "codigoAutorizacao": "147258369"
            },
            "formaPagamento": { "tipo": "PARCELADO_EMISSOR", "parcelas": 3 }
        }))
        .unwrap()
    }

    #[test]
    fn request_becomes_authorized_dto_without_id() {
        let dto = request_to_dto(request()).unwrap();

        assert_eq!(dto.id, None);
        assert_eq!(dto.cartao, "4444********1234");
        assert_eq!(dto.descricao.valor, 500.5);
        assert_eq!(dto.descricao.estabelecimento, "PetShop Mundo cão");
        assert_eq!(dto.descricao.status, StatusTransacao::Autorizado);
        assert_eq!(dto.forma_pagamento.tipo, TipoPagamento::ParceladoEmissor);
        assert_eq!(dto.forma_pagamento.parcelas, 3);
    }

    #[test]
    fn missing_field_is_bad_request() {
        let mut incomplete = request();
        incomplete.cartao = None;

        assert!(matches!(
            request_to_dto(incomplete),
            Err(AppError::BadRequest(msg)) if msg.starts_with("cartao")
        ));
    }

    #[test]
    fn model_leaves_ids_unset() {
        let mut dto = request_to_dto(request()).unwrap();
        dto.id = Some(10);

        let model = dto_to_model(&dto);

        assert_eq!(model.id, None);
        assert_eq!(model.descricao.id, None);
        assert_eq!(model.forma_pagamento.id, None);
        assert_eq!(model.descricao.nsu, "1234567890");
        assert_eq!(model.descricao.codigo_autorizacao, "147258369");
    }

    #[test]
    fn stored_model_maps_to_response() {
        let dto = request_to_dto(request()).unwrap();
        let mut model = dto_to_model(&dto);
        model.id = Some(42);
        model.descricao.id = Some(1);

        let response = dto_to_response(model_to_dto(model)).unwrap();

        assert_eq!(response.id, 42);
        assert_eq!(response.descricao.status, StatusTransacao::Autorizado);
        assert_eq!(response.forma_pagamento.parcelas, 3);
    }

    #[test]
    fn response_requires_id() {
        let dto = request_to_dto(request()).unwrap();
        assert!(matches!(dto_to_response(dto), Err(AppError::Repository(_))));
    }
}
