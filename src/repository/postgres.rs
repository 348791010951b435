//! PostgreSQL implementation of the transaction ports.
//!
//! `save` writes the three rows inside one database transaction, so a
//! failure at any step leaves nothing behind.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::{
    db::DbPool,
    models::{
        enums::{StatusTransacao, TipoPagamento},
        transacao::{DescricaoTransacao, FormaPagamento, Transacao},
    },
    repository::{
        DescricaoRepository, RepositoryError, RepositoryResult, TransacaoRepository,
    },
};

const SELECT_TRANSACAO: &str = r#"
    SELECT
        t.id,
        t.cartao,
        d.id AS descricao_id,
        d.valor,
        d.data_hora,
        d.estabelecimento,
        d.nsu,
        d.codigo_autorizacao,
        d.status,
        f.id AS forma_pagamento_id,
        f.tipo,
        f.parcelas
    FROM transacao t
    JOIN descricao_transacao d ON d.id = t.descricao_id
    JOIN forma_pagamento_transacao f ON f.id = t.forma_pagamento_id
"#;

#[derive(Clone)]
pub struct PgTransacaoRepository {
    pool: DbPool,
}

impl PgTransacaoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransacaoRepository for PgTransacaoRepository {
    async fn save(&self, transacao: &Transacao) -> RepositoryResult<Transacao> {
        let descricao = &transacao.descricao;
        let forma = &transacao.forma_pagamento;

        let mut tx = self.pool.begin().await?;

        let descricao_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO descricao_transacao (
                valor,
                data_hora,
                estabelecimento,
                nsu,
                codigo_autorizacao,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(descricao.valor)
        .bind(descricao.data_hora)
        .bind(&descricao.estabelecimento)
        .bind(&descricao.nsu)
        .bind(&descricao.codigo_autorizacao)
        .bind(descricao.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let forma_pagamento_id: i64 = sqlx::query_scalar(
            "INSERT INTO forma_pagamento_transacao (tipo, parcelas) VALUES ($1, $2) RETURNING id",
        )
        .bind(forma.tipo.as_str())
        .bind(forma.parcelas)
        .fetch_one(&mut *tx)
        .await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transacao (cartao, descricao_id, forma_pagamento_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&transacao.cartao)
        .bind(descricao_id)
        .bind(forma_pagamento_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut saved = transacao.clone();
        saved.id = Some(id);
        saved.descricao.id = Some(descricao_id);
        saved.forma_pagamento.id = Some(forma_pagamento_id);

        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Transacao>> {
        let row = sqlx::query_as::<_, TransacaoRow>(&format!("{SELECT_TRANSACAO} WHERE t.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TransacaoRow::into_domain).transpose()
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Transacao>> {
        let rows = sqlx::query_as::<_, TransacaoRow>(&format!("{SELECT_TRANSACAO} ORDER BY t.id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TransacaoRow::into_domain).collect()
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DescricaoRepository for PgTransacaoRepository {
    async fn update_status(
        &self,
        descricao_id: i64,
        from: StatusTransacao,
        to: StatusTransacao,
    ) -> RepositoryResult<bool> {
        // Conditional update: concurrent reversals of one id cannot both win
        let updated = sqlx::query(
            "UPDATE descricao_transacao SET status = $1 WHERE id = $2 AND status = $3",
        )
        .bind(to.as_str())
        .bind(descricao_id)
        .bind(from.as_str())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }
}

/// Flat row of the three joined tables. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransacaoRow {
    id: i64,
    cartao: String,
    descricao_id: i64,
    valor: f64,
    data_hora: NaiveDateTime,
    estabelecimento: String,
    nsu: String,
    codigo_autorizacao: String,
    status: String,
    forma_pagamento_id: i64,
    tipo: String,
    parcelas: i32,
}

impl TransacaoRow {
    fn into_domain(self) -> RepositoryResult<Transacao> {
        let status = self
            .status
            .parse::<StatusTransacao>()
            .map_err(RepositoryError::Corrupted)?;
        let tipo = self
            .tipo
            .parse::<TipoPagamento>()
            .map_err(RepositoryError::Corrupted)?;

        Ok(Transacao {
            id: Some(self.id),
            cartao: self.cartao,
            descricao: DescricaoTransacao {
                id: Some(self.descricao_id),
                valor: self.valor,
                data_hora: self.data_hora,
                estabelecimento: self.estabelecimento,
                nsu: self.nsu,
                codigo_autorizacao: self.codigo_autorizacao,
                status,
            },
            forma_pagamento: FormaPagamento {
                id: Some(self.forma_pagamento_id),
                tipo,
                parcelas: self.parcelas,
            },
        })
    }
}
