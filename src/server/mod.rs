// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components, including:
//! - Application state management
//! - HTTP/WebSocket routing and REST handlers
//! - The grid allocator actor and its layout subscription sessions
//! - Error response formatting

pub mod state;
pub mod router;
pub mod handlers;
pub mod allocator;
pub mod http_error;
pub mod tests;
