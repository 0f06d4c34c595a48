//! HTTP handlers for the post routes.
//!
//! Bodies are validated before any registry lookup, so an invalid body on a
//! missing id is a 422 rather than a 404.

use std::sync::Arc;

use serde::Serialize;

use super::{ApiError, Post, PostInput, PostRegistry};
use crate::request::Request;
use crate::response::{Json, WithStatus};
use crate::status::Status;

/// `{"data": ...}` envelope used by list and create.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

/// `{"message": ...}` envelope used by the root, fetch and update.
#[derive(Debug, Serialize)]
pub struct Message<T> {
    pub message: T,
}

type Registry = Arc<PostRegistry>;

/// `GET /`
pub async fn root(_req: Request, _registry: Registry) -> Json<Message<&'static str>> {
    Json(Message { message: "Hello World!" })
}

/// `GET /posts`
pub async fn list_posts(_req: Request, registry: Registry) -> Result<Json<Data<Vec<Post>>>, ApiError> {
    Ok(Json(Data { data: registry.list()? }))
}

/// `POST /posts` → 201
pub async fn create_post(req: Request, registry: Registry) -> Result<WithStatus<Data<Post>>, ApiError> {
    let input: PostInput = req.validated_json()?;
    let post = registry.create(input)?;
    Ok(Json::with_status(Status::Created, Data { data: post }))
}

/// `GET /posts/{id}`
pub async fn get_post(req: Request, registry: Registry) -> Result<Json<Message<Post>>, ApiError> {
    let id: i64 = req.param_as("id")?;
    Ok(Json(Message { message: registry.get(id)? }))
}

/// `PUT /posts/{id}`
pub async fn update_post(req: Request, registry: Registry) -> Result<Json<Message<Post>>, ApiError> {
    let id: i64 = req.param_as("id")?;
    let input: PostInput = req.validated_json()?;
    Ok(Json(Message { message: registry.update(id, input)? }))
}

/// `DELETE /posts/{id}` → 204
pub async fn delete_post(req: Request, registry: Registry) -> Result<Status, ApiError> {
    let id: i64 = req.param_as("id")?;
    registry.delete(id)?;
    Ok(Status::NoContent)
}
