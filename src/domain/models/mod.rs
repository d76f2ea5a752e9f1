mod filter;
mod lookup;
mod outcome;
mod snapshot;

pub use filter::*;
pub use lookup::*;
pub use outcome::*;
pub use snapshot::*;
