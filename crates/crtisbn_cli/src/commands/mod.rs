//! CLI command implementations.

pub mod batch;
pub mod generate;
pub mod list;
pub mod scan;
pub mod validate;
