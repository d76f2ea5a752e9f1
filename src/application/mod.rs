//! # Application Layer
//!
//! Store capability traits, the shared store connector, and one use case per
//! API operation.

mod connection;
pub mod interfaces;
pub mod use_cases;

pub use connection::*;
pub use interfaces::*;
pub use use_cases::*;
