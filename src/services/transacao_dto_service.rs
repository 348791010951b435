//! Transaction use cases: pay, fetch, list and reverse.
//!
//! Works in `TransacaoDto` terms on top of [`TransacaoModelService`] and the
//! description repository.
//!
//! # Status lifecycle
//!
//! `pagar` always stores `AUTORIZADO`. `estornar` moves `AUTORIZADO` to
//! `NEGADO` and refuses any other status. `CANCELADO` is never set.

use validator::Validate;

use crate::{
    converter,
    error::AppError,
    models::{
        dto::{TransacaoDto, TransacaoRequestDto},
        enums::{StatusTransacao, TipoPagamento},
    },
    repository::{DynDescricaoRepository, RepositoryError},
    services::transacao_model_service::TransacaoModelService,
};

pub const ERRO_400_AVISTA_PARCELA_UNICA: &str =
    "formaPagamento.parcelas: pagamento AVISTA deve ter exatamente 1 parcela";
pub const ERRO_400_TRANSACAO_JA_ESTORNADA: &str = "Transação já estornada";
pub const ERRO_400_TRANSACAO_CANCELADA: &str = "Transação cancelada não pode ser estornada";

#[derive(Clone)]
pub struct TransacaoDtoService {
    model_service: TransacaoModelService,
    descricao_repository: DynDescricaoRepository,
}

impl TransacaoDtoService {
    pub fn new(
        model_service: TransacaoModelService,
        descricao_repository: DynDescricaoRepository,
    ) -> Self {
        Self {
            model_service,
            descricao_repository,
        }
    }

    /// Record a payment.
    ///
    /// # Process
    ///
    /// 1. Validate request fields
    /// 2. Apply payment method rules
    /// 3. Convert request -> DTO -> entity and persist
    /// 4. Stamp the generated id on the DTO
    ///
    /// No duplicate check is made: every valid request creates a new
    /// transaction.
    ///
    /// # Errors
    ///
    /// - `Validation`: missing or malformed fields
    /// - `BadRequest`: `AVISTA` with more than one installment
    pub async fn pagar(&self, request: TransacaoRequestDto) -> Result<TransacaoDto, AppError> {
        request.validate()?;

        let mut dto = converter::request_to_dto(request)?;

        if dto.forma_pagamento.tipo == TipoPagamento::Avista && dto.forma_pagamento.parcelas != 1 {
            return Err(AppError::BadRequest(ERRO_400_AVISTA_PARCELA_UNICA.to_string()));
        }

        let transacao = converter::dto_to_model(&dto);
        let id = self.model_service.salvar_transacao(&transacao).await?;
        dto.id = Some(id);

        tracing::info!(
            id,
            nsu = %dto.descricao.nsu,
            tipo = %dto.forma_pagamento.tipo,
            "transaction authorized"
        );

        Ok(dto)
    }

    pub async fn buscar_transacao(&self, id: i64) -> Result<TransacaoDto, AppError> {
        let transacao = self.model_service.buscar_transacao(id).await?;
        Ok(converter::model_to_dto(transacao))
    }

    /// # Errors
    ///
    /// - `NotFound`: no transaction recorded yet
    pub async fn listar_transacoes(&self) -> Result<Vec<TransacaoDto>, AppError> {
        let transacoes = self.model_service.listar_transacoes().await?;
        Ok(transacoes.into_iter().map(converter::model_to_dto).collect())
    }

    /// Reverse an authorized transaction.
    ///
    /// Only the description status changes; every other field is returned
    /// as stored.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no transaction with this id
    /// - `BadRequest`: status is not `AUTORIZADO`, including when a
    ///   concurrent reversal won the race
    pub async fn estornar(&self, id: i64) -> Result<TransacaoDto, AppError> {
        let mut transacao = self.model_service.buscar_transacao(id).await?;

        match transacao.descricao.status {
            StatusTransacao::Autorizado => {}
            StatusTransacao::Negado => {
                tracing::warn!(id, "reversal refused: already reversed");
                return Err(AppError::BadRequest(ERRO_400_TRANSACAO_JA_ESTORNADA.to_string()));
            }
            StatusTransacao::Cancelado => {
                tracing::warn!(id, "reversal refused: transaction cancelled");
                return Err(AppError::BadRequest(ERRO_400_TRANSACAO_CANCELADA.to_string()));
            }
        }

        let descricao_id = transacao.descricao.id.ok_or_else(|| {
            AppError::Repository(RepositoryError::Corrupted(format!(
                "transaction {id} has a description without id"
            )))
        })?;

        let updated = self
            .descricao_repository
            .update_status(descricao_id, StatusTransacao::Autorizado, StatusTransacao::Negado)
            .await?;

        if !updated {
            tracing::warn!(id, "reversal refused: status changed concurrently");
            return Err(AppError::BadRequest(ERRO_400_TRANSACAO_JA_ESTORNADA.to_string()));
        }

        transacao.descricao.status = StatusTransacao::Negado;
        tracing::info!(id, "transaction reversed");

        Ok(converter::model_to_dto(transacao))
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.model_service.ping().await
    }
}
