//! HTTP server module for the operations backend.
//!
//! This module exposes the analytics and the operations store as a REST API
//! for the dashboard frontend. Handlers stay thin: they parse and validate
//! the request, take a snapshot from the store, and delegate to the service
//! layer.

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
