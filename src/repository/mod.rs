//! Storage ports for transactions.
//!
//! Services depend on these traits only. Two adapters implement them:
//! - [`postgres::PgTransacaoRepository`] over a sqlx pool
//! - [`memory::InMemoryTransacaoRepository`] for runs without a database and
//!   for tests

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{enums::StatusTransacao, transacao::Transacao};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTransacaoRepository;
pub use postgres::PgTransacaoRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be decoded into the domain model.
    #[error("Corrupted row: {0}")]
    Corrupted(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Access to whole transactions (parent row plus both children).
#[async_trait]
pub trait TransacaoRepository: Send + Sync {
    /// Insert the transaction and its children; returns the stored copy with
    /// every id assigned.
    async fn save(&self, transacao: &Transacao) -> RepositoryResult<Transacao>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Transacao>>;

    /// All transactions ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Transacao>>;

    /// Cheap round-trip to the backing store, used by the health check.
    async fn ping(&self) -> RepositoryResult<()>;
}

/// Access to the description row of a transaction.
#[async_trait]
pub trait DescricaoRepository: Send + Sync {
    /// Set `status` to `to` only if it currently equals `from`.
    ///
    /// Returns `false` when no row matched, either because the description
    /// does not exist or because its status already changed.
    async fn update_status(
        &self,
        descricao_id: i64,
        from: StatusTransacao,
        to: StatusTransacao,
    ) -> RepositoryResult<bool>;
}

pub type DynTransacaoRepository = Arc<dyn TransacaoRepository>;
pub type DynDescricaoRepository = Arc<dyn DescricaoRepository>;
