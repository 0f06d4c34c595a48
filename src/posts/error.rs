//! Registry errors and their HTTP mapping.

use thiserror::Error;
use tracing::error;

use crate::request::Rejection;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Errors returned by [`PostRegistry`](super::PostRegistry) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No post has the given id.
    #[error("post with ID: {0} was not found")]
    NotFound(i64),

    /// Every id drawn for a new post was already taken.
    #[error("no free post id after {0} attempts")]
    IdSpaceExhausted(usize),

    /// A thread panicked while holding the registry lock.
    #[error("post registry lock poisoned")]
    Poisoned,
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => Response::detail(Status::NotFound, self.to_string()),
            Self::IdSpaceExhausted(_) | Self::Poisoned => {
                error!("registry failure: {self}");
                Response::detail(Status::InternalServerError, "Internal Server Error")
            }
        }
    }
}

/// Everything a post handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(r) => r.into_response(),
            Self::Registry(e) => e.into_response(),
        }
    }
}
