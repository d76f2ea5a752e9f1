//! # Domain Layer
//!
//! Snapshot models, the lookup filter builder, and record resolution.
//! This layer is independent of the HTTP framework and the document store.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
