//! Main configuration module.
//!
//! Re-exports submodules for grid and server configuration.
pub mod grid;
pub mod server;
