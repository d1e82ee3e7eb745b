//! Library side of the `catalog-validator` binary.

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
