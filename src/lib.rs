//! # Space-Weather Operations Support Backend
//!
//! This crate provides the Rust backend for a space-weather operations
//! dashboard used by air-wing units: GNSS error forecasts, equipment alerting
//! thresholds, mission feedback analytics, and mission-window recommendation.
//! The backend exposes a REST API via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Feed Ingestion**: Parse the upstream space-weather forecast CSV into a
//!   typed, ordered time series
//! - **Window Search**: Find the contiguous forecast window with the lowest
//!   cumulative predicted error for a required mission duration
//! - **Auto Thresholds**: Derive per-equipment alerting thresholds from
//!   degraded-mission statistics
//! - **Advisory & Prediction**: 24-hour risk outlook and heuristic mission
//!   success scoring
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and DTO re-exports for API responses
//! - [`models`]: Domain types, time handling, and feed parsing
//! - [`services`]: Pure analytics over store snapshots
//! - [`store`]: In-memory operations state (profile, mission log, forecast)
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! All analytics are pure functions of the snapshots they are handed;
//! invoking any of them twice with the same inputs yields identical results.

pub mod api;

pub mod config;
pub mod models;

pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
