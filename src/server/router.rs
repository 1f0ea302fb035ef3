//! HTTP and WebSocket routing configuration.

use actix_web::web;

use crate::server::session::ws_arena;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/arena").to(ws_arena));
}
