//! Main entry point for the cubicle grid server.
//!
//! Initializes the logger, starts the grid allocator actor, and launches the HTTP
//! server with the REST endpoints and the layout WebSocket.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::allocator::server::GridAllocator;

pub mod config;
mod server;
mod grid;

use config::server::{BIND_ADDRESS, BIND_PORT};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from RUST_LOG (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Start the GridAllocator actor (sole owner of the layout).
    let allocator_addr = GridAllocator::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(allocator_addr));

    info!("[Server] Listening on {}:{}", BIND_ADDRESS, BIND_PORT);

    HttpServer::new(move || {
        App::new()
            .wrap(crate::server::router::cors())
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_ADDRESS, BIND_PORT))?
    .run()
    .await
}
