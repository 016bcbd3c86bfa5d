//! CLI command implementations.

mod clean;
mod optimize;
mod scan;

pub use clean::clean;
pub use optimize::{alphabet, optimize, subset};
pub use scan::scan;
