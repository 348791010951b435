//! In-memory implementation of the transaction ports.
//!
//! Ids come from three counters that mirror the database sequences, one per
//! table, each starting at 1.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    models::{enums::StatusTransacao, transacao::Transacao},
    repository::{DescricaoRepository, RepositoryResult, TransacaoRepository},
};

#[derive(Debug, Default)]
struct Store {
    transacoes: BTreeMap<i64, Transacao>,
    seq_transacao: i64,
    seq_descricao: i64,
    seq_forma_pagamento: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryTransacaoRepository {
    store: RwLock<Store>,
}

impl InMemoryTransacaoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.store.read().await.transacoes.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TransacaoRepository for InMemoryTransacaoRepository {
    async fn save(&self, transacao: &Transacao) -> RepositoryResult<Transacao> {
        let mut guard = self.store.write().await;
        let store = &mut *guard;

        store.seq_transacao += 1;
        store.seq_descricao += 1;
        store.seq_forma_pagamento += 1;

        let mut saved = transacao.clone();
        saved.id = Some(store.seq_transacao);
        saved.descricao.id = Some(store.seq_descricao);
        saved.forma_pagamento.id = Some(store.seq_forma_pagamento);

        store.transacoes.insert(store.seq_transacao, saved.clone());

        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Transacao>> {
        Ok(self.store.read().await.transacoes.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transacao>> {
        Ok(self.store.read().await.transacoes.values().cloned().collect())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}

#[async_trait]
impl DescricaoRepository for InMemoryTransacaoRepository {
    async fn update_status(
        &self,
        descricao_id: i64,
        from: StatusTransacao,
        to: StatusTransacao,
    ) -> RepositoryResult<bool> {
        let mut store = self.store.write().await;

        let descricao = store
            .transacoes
            .values_mut()
            .map(|t| &mut t.descricao)
            .find(|d| d.id == Some(descricao_id) && d.status == from);

        match descricao {
            Some(descricao) => {
                descricao.status = to;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
