//! API Module
//!
//! Operational HTTP endpoints plus the middleware hooks the request
//! pipeline mounts around its own routes.

mod handlers;
mod middleware;
mod routes;

pub use handlers::{
    clean_handler, health_handler, invalidate_handler, stats_handler, AppState,
};
pub use middleware::{
    cache_aside, invalidate_on_write, InvalidationScope, CACHE_KEY_HEADER, CACHE_STATUS_HEADER,
};
pub use routes::create_router;
