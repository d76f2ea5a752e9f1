pub mod container;
pub mod controller;
mod cors;
pub mod error;
pub mod router;

pub use container::{Container, ContainerConfig};
pub use error::{ApiError, ApiResult};
pub use router::{build_router, ROUTES};
