//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Storage (MongoDB, plus an in-memory store for tests and local runs)
//! - Configuration (connection string resolution, timeouts)
//! - HTTP API (axum router, controllers, CORS)

pub mod adapter;
pub mod api;
pub mod config;

pub use adapter::*;
pub use api::{build_router, ApiError, Container, ContainerConfig};
pub use config::{ConnectionSettings, OperationTimeouts};
