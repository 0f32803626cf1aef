//! HTTP server configuration.

pub const BIND_ADDRESS: &str = "127.0.0.1";
pub const BIND_PORT: u16 = 8080;
