// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the grid allocator actor, shared between the HTTP and
//! WebSocket handlers.

use actix::Addr;
use crate::server::allocator::server::GridAllocator;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the grid allocator actor (single writer of the layout).
    pub allocator_addr: Addr<GridAllocator>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(allocator_addr: Addr<GridAllocator>) -> Self {
        AppState { allocator_addr }
    }
}
