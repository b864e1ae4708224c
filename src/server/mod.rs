//! Servidor HTTP.
//!
//! ## Rotas
//!
//! - `GET /feed?user_id=<id>` - feed ranqueado do usuário (`guest` quando omitido)
//! - `GET /health` - liveness, sempre `{"status": "ok"}`

mod listener;
mod middleware;
mod routes;

pub use listener::{serve, serve_with_shutdown};
pub use routes::build_router;
