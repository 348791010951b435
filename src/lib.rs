//! Payment transaction service.
//!
//! A REST API that records card payments (`pagar`), looks them up by id
//! (`buscar`), lists them (`listar`) and reverses them (`estornar`).
//!
//! # Architecture
//!
//! - **Web Framework**: Axum, routes under `/transacao/v1`
//! - **Storage**: PostgreSQL through sqlx, or an in-memory store when no
//!   `DATABASE_URL` is configured
//! - **Format**: JSON requests/responses with camelCase fields
//!
//! Request flow: handler -> `TransacaoDtoService` -> converter ->
//! `TransacaoModelService` -> repository.

pub mod config;
pub mod converter;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::{
    repository::{DescricaoRepository, TransacaoRepository},
    services::{TransacaoDtoService, TransacaoModelService},
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub transacao_service: TransacaoDtoService,
}

impl AppState {
    /// Wire the services on top of a single storage backend implementing both
    /// repository ports.
    pub fn new<R>(repository: Arc<R>) -> Self
    where
        R: TransacaoRepository + DescricaoRepository + 'static,
    {
        let model_service = TransacaoModelService::new(repository.clone());

        Self {
            transacao_service: TransacaoDtoService::new(model_service, repository),
        }
    }
}

/// Build the HTTP router.
pub fn create_app(state: AppState) -> Router {
    let transacao_routes = Router::new()
        .route(
            "/buscar/{id}",
            get(handlers::transacoes::buscar_transacao),
        )
        .route("/listar", get(handlers::transacoes::listar_transacoes))
        .route("/pagar", post(handlers::transacoes::pagar))
        .route("/estornar/{id}", put(handlers::transacoes::estornar));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/transacao/v1", transacao_routes)
        // Must follow every route: it only applies to routes already added
        .method_not_allowed_fallback(handlers::fallback::method_not_allowed)
        .fallback(handlers::fallback::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
