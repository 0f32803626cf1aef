//! HTTP and WebSocket routing configuration.
//!
//! REST endpoints for the grid and its spaces, plus the layout subscription socket.

use actix_cors::Cors;
use actix_web::web;
use crate::server::handlers;
use crate::server::allocator::session::ws_layout;

/// Cross-origin policy for the browser UIs. Answers OPTIONS preflights for
/// every route and allows any origin, method and header.
pub fn cors() -> Cors {
    Cors::permissive()
}

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/grid")
            .route(web::get().to(handlers::get_layout))
    )
    .service(
        web::resource("/grid/frontier")
            .route(web::get().to(handlers::get_frontier))
    )
    .service(
        web::resource("/grid/capacity")
            .route(web::post().to(handlers::ensure_capacity))
    )
    .service(
        web::resource("/spaces")
            .route(web::get().to(handlers::list_spaces))
            .route(web::post().to(handlers::place_space))
    )
    .service(
        web::resource("/spaces/{id}")
            .route(web::get().to(handlers::get_space))
            .route(web::patch().to(handlers::update_space))
            .route(web::delete().to(handlers::remove_space))
    )
    .service(
        web::resource("/spaces/{id}/position")
            .route(web::put().to(handlers::relocate_space))
    )
    .service(
        web::resource("/ws/grid")
            .to(ws_layout)
    );
}
