mod filter_builder;
mod id_filter;
mod record_resolver;

pub use filter_builder::*;
pub use id_filter::*;
pub use record_resolver::*;
