//! Closed value sets for payment status and payment method.
//!
//! Both enums are encoded as upper-case strings, on the wire (serde) and in
//! the database (`VARCHAR` columns). `FromStr` is the decoding path used by
//! the repository when reading rows back.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Status of a transaction description.
///
/// - `Autorizado`: set on creation by `pagar`
/// - `Negado`: set by `estornar`
/// - `Cancelado`: readable from storage but never set by any operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTransacao {
    Autorizado,
    Negado,
    Cancelado,
}

impl StatusTransacao {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTransacao::Autorizado => "AUTORIZADO",
            StatusTransacao::Negado => "NEGADO",
            StatusTransacao::Cancelado => "CANCELADO",
        }
    }

    /// Whether `estornar` may move this status to `Negado`.
    pub fn is_reversible(&self) -> bool {
        matches!(self, StatusTransacao::Autorizado)
    }
}

impl fmt::Display for StatusTransacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTransacao {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTORIZADO" => Ok(StatusTransacao::Autorizado),
            "NEGADO" => Ok(StatusTransacao::Negado),
            "CANCELADO" => Ok(StatusTransacao::Cancelado),
            other => Err(format!("unknown transaction status '{other}'")),
        }
    }
}

/// Payment method.
///
/// `Avista` is a single payment; the two `Parcelado*` variants split the
/// amount into installments financed by the merchant or the card issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoPagamento {
    Avista,
    ParceladoLoja,
    ParceladoEmissor,
}

impl TipoPagamento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoPagamento::Avista => "AVISTA",
            TipoPagamento::ParceladoLoja => "PARCELADO_LOJA",
            TipoPagamento::ParceladoEmissor => "PARCELADO_EMISSOR",
        }
    }
}

impl fmt::Display for TipoPagamento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TipoPagamento {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVISTA" => Ok(TipoPagamento::Avista),
            "PARCELADO_LOJA" => Ok(TipoPagamento::ParceladoLoja),
            "PARCELADO_EMISSOR" => Ok(TipoPagamento::ParceladoEmissor),
            other => Err(format!("unknown payment type '{other}'")),
        }
    }
}
