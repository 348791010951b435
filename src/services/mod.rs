//! Business logic services.
//!
//! Services sit between the HTTP handlers and the repositories. They own
//! the not-found rules, validation and the status lifecycle.

pub mod transacao_dto_service;
pub mod transacao_model_service;

pub use transacao_dto_service::TransacaoDtoService;
pub use transacao_model_service::TransacaoModelService;
