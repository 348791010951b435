//! Entity-level access to transactions.
//!
//! Turns "absent" results from the repository into `NotFound` errors. Storage
//! errors propagate unchanged.

use crate::{
    error::{AppError, ERRO_404_NENHUMA_TRANSACAO_ENCONTRADA, ERRO_404_TRANSACAO_NAO_ENCONTRADA},
    models::transacao::Transacao,
    repository::{DynTransacaoRepository, RepositoryError},
};

#[derive(Clone)]
pub struct TransacaoModelService {
    repository: DynTransacaoRepository,
}

impl TransacaoModelService {
    pub fn new(repository: DynTransacaoRepository) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `NotFound`: no transaction with this id
    pub async fn buscar_transacao(&self, id: i64) -> Result<Transacao, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERRO_404_TRANSACAO_NAO_ENCONTRADA.to_string()))
    }

    /// All transactions ordered by id.
    ///
    /// An empty store is an error here, not an empty list.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no transaction has been recorded yet
    pub async fn listar_transacoes(&self) -> Result<Vec<Transacao>, AppError> {
        let transacoes = self.repository.find_all().await?;

        if transacoes.is_empty() {
            return Err(AppError::NotFound(
                ERRO_404_NENHUMA_TRANSACAO_ENCONTRADA.to_string(),
            ));
        }

        Ok(transacoes)
    }

    /// Insert the transaction and return its generated id.
    pub async fn salvar_transacao(&self, transacao: &Transacao) -> Result<i64, AppError> {
        let saved = self.repository.save(transacao).await?;

        saved.id.ok_or_else(|| {
            AppError::Repository(RepositoryError::Corrupted(
                "storage returned a transaction without id".to_string(),
            ))
        })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            enums::{StatusTransacao, TipoPagamento},
            transacao::{DescricaoTransacao, FormaPagamento},
        },
        repository::InMemoryTransacaoRepository,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn service() -> TransacaoModelService {
        TransacaoModelService::new(Arc::new(InMemoryTransacaoRepository::new()))
    }

    fn transacao() -> Transacao {
        Transacao {
            id: None,
            cartao: "4444********1234".to_string(),
            descricao: DescricaoTransacao {
                id: None,
                valor: 10.0,
                data_hora: NaiveDate::from_ymd_opt(2024, 1, 2)
                    .and_then(|d| d.and_hms_opt(9, 0, 0))
                    .unwrap(),
                estabelecimento: "Mercado".to_string(),
                nsu: "1".to_string(),
                codigo_autorizacao: "2".to_string(),
                status: StatusTransacao::Autorizado,
            },
            forma_pagamento: FormaPagamento {
                id: None,
                tipo: TipoPagamento::Avista,
                parcelas: 1,
            },
        }
    }

    #[tokio::test]
    async fn buscar_missing_id_is_not_found() {
        let result = service().buscar_transacao(999_999).await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == ERRO_404_TRANSACAO_NAO_ENCONTRADA));
    }

    #[tokio::test]
    async fn listar_empty_store_is_not_found() {
        let result = service().listar_transacoes().await;
        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == ERRO_404_NENHUMA_TRANSACAO_ENCONTRADA));
    }

    #[tokio::test]
    async fn salvar_returns_id_usable_by_buscar() {
        let service = service();

        let id = service.salvar_transacao(&transacao()).await.unwrap();
        let found = service.buscar_transacao(id).await.unwrap();

        assert_eq!(found.id, Some(id));
        assert_eq!(found.descricao.estabelecimento, "Mercado");
        assert_eq!(service.listar_transacoes().await.unwrap().len(), 1);
    }
}
