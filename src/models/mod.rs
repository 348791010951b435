//! Data models.
//!
//! Entities map to database tables; DTOs are what crosses the HTTP boundary.

/// API request/response types and the internal transfer object
pub mod dto;
/// Payment status and payment method
pub mod enums;
/// Persisted transaction entities
pub mod transacao;
