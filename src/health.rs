//! Liveness and readiness probe handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can the service use its state? |
//!
//! Both are generic over the router state, so they register on any router:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use posts_api::{Router, health, posts::PostRegistry};
//!
//! let app = Router::with_state(Arc::new(PostRegistry::empty()))
//!     .get("/healthz", health::liveness)
//!     .get("/readyz", health::readiness);
//! ```

use std::sync::Arc;

use crate::{Request, Response, Status};

/// State that can report whether it is able to serve traffic.
pub trait Ready {
    fn is_ready(&self) -> bool;
}

impl<T: Ready + ?Sized> Ready for Arc<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Always `200 OK` with body `"ok"`. Deliberately independent of state.
pub async fn liveness<S>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"` while `state` is ready, else `503`.
pub async fn readiness<S: Ready>(_req: Request, state: S) -> Response {
    if state.is_ready() {
        Response::text("ready")
    } else {
        Response::status(Status::ServiceUnavailable)
    }
}
