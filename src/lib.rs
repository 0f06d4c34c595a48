//! # posts-api
//!
//! A small HTTP service exposing create/read/update/delete over an in-memory
//! collection of posts, built on a thin hyper-based routing layer.
//!
//! Nothing is persisted: the collection starts with two seed posts and is
//! discarded when the process exits.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use posts_api::{Server, posts::{self, PostRegistry}};
//! use rand::SeedableRng;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), posts_api::Error> {
//!     let registry = PostRegistry::with_seed_posts(rand::rngs::StdRng::from_entropy());
//!     Server::bind("127.0.0.1:8000")
//!         .await?
//!         .serve(posts::app(Arc::new(registry)))
//!         .await
//! }
//! ```
//!
//! ## Layout
//!
//! - [`posts`]: the post model, the registry and the route handlers
//! - [`Router`], [`Request`], [`Response`], [`Server`]: the HTTP layer
//! - [`middleware::trace`]: per-request tracing span and outcome event
//! - [`health`]: liveness and readiness probes
//! - [`Config`]: flags and environment

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod middleware;
pub mod posts;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::{FieldError, Rejection, Request};
pub use response::{IntoResponse, Json, Response, ResponseBuilder, WithStatus};
pub use router::Router;
pub use server::Server;
pub use status::Status;
