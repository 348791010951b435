//! Persisted transaction entities.
//!
//! This module defines:
//! - `Transacao`: aggregate root stored in the `transacao` table
//! - `DescricaoTransacao`: amount/merchant/status details (`descricao_transacao`)
//! - `FormaPagamento`: payment method and installments (`forma_pagamento_transacao`)
//!
//! Ids are `None` until the storage layer assigns them from its sequences.

use chrono::NaiveDateTime;

use crate::models::enums::{StatusTransacao, TipoPagamento};

/// A payment transaction with its owned description and payment method.
///
/// Both children are created together with the parent and are never shared
/// between transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Transacao {
    pub id: Option<i64>,

    /// Card reference as supplied by the client (usually masked)
    pub cartao: String,

    pub descricao: DescricaoTransacao,

    pub forma_pagamento: FormaPagamento,
}

/// Financial details and status of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DescricaoTransacao {
    pub id: Option<i64>,

    /// Amount in the service's single implicit currency
    pub valor: f64,

    pub data_hora: NaiveDateTime,

    /// Merchant name
    pub estabelecimento: String,

    pub nsu: String,

    pub codigo_autorizacao: String,

    pub status: StatusTransacao,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormaPagamento {
    pub id: Option<i64>,
    pub tipo: TipoPagamento,

    /// Number of installments, at least 1
    pub parcelas: i32,
}
