//! Presentation Layer
//!
//! HTTP surface: request/response DTOs, axum handlers, router.

pub mod dto;
pub mod handlers;
pub mod router;
