//! Shared utilities.

mod hash;
mod nested;
mod timeout;

pub use hash::value_hash;
pub use nested::{flatten_nested, structure_depth};
pub use timeout::{run_with_timeout, try_with_timeout};
