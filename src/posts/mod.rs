//! The post domain: record types, the in-memory registry, and the HTTP
//! handlers that expose it.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`handlers::root`] |
//! | GET | `/posts` | [`handlers::list_posts`] |
//! | POST | `/posts` | [`handlers::create_post`] |
//! | GET | `/posts/{id}` | [`handlers::get_post`] |
//! | PUT | `/posts/{id}` | [`handlers::update_post`] |
//! | DELETE | `/posts/{id}` | [`handlers::delete_post`] |

mod error;
pub mod handlers;
mod model;
mod registry;

use std::sync::Arc;

use crate::health;
use crate::router::Router;

pub use error::{ApiError, RegistryError};
pub use model::{Post, PostInput};
pub use registry::{ID_RANGE, PostRegistry, seed_posts};

/// The full service: post routes plus health probes, sharing `registry`.
pub fn app(registry: Arc<PostRegistry>) -> Router<Arc<PostRegistry>> {
    Router::with_state(registry)
        .get("/", handlers::root)
        .get("/posts", handlers::list_posts)
        .post("/posts", handlers::create_post)
        .get("/posts/{id}", handlers::get_post)
        .put("/posts/{id}", handlers::update_post)
        .delete("/posts/{id}", handlers::delete_post)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}
