//! # Route Handlers
//!
//! One handler per route. Each validates the path identifier where one is
//! present, performs exactly one awaited collection call, and shapes the
//! response. No handler calls another handler; the only shared state is the
//! injected collection handle.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::store::{Collection, DeleteResult, Filter, FindOptions, InsertOneResult, ObjectId, UpdateResult};

use super::errors::{ApiError, ApiResult};

/// State shared across handlers: the single long-lived collection handle
pub struct ApiState {
    pub movies: Collection,
}

impl ApiState {
    pub fn new(movies: Collection) -> Self {
        Self { movies }
    }
}

/// `GET /movies` - the full collection as a bare JSON array, title ascending
pub async fn list_movies(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Vec<Value>>> {
    let movies = state
        .movies
        .find(Filter::empty(), FindOptions::sorted_by("title"))
        .await?;
    Ok(Json(movies))
}

/// `GET /movies/{id}` - one document, or `null` when nothing matches
///
/// An absent document is a successful query with no match, not an error.
pub async fn get_movie(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    let doc = state.movies.find_one(Filter::by_id(id)).await?;
    Ok(Json(doc.unwrap_or(Value::Null)))
}

/// `POST /movies` - insert the request body verbatim
pub async fn create_movie(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<InsertOneResult>)> {
    let result = state.movies.insert_one(body).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// `PATCH /movies/{id}` - merge the supplied fields into the matching document
pub async fn update_movie(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let result = state.movies.update_one(Filter::by_id(id), body).await?;
    Ok(Json(result))
}

/// `DELETE /movies/{id}` - remove the matching document
pub async fn delete_movie(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let result = state.movies.delete_one(Filter::by_id(id)).await?;
    Ok(Json(result))
}

/// Health probe
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Guard: malformed identifiers never reach the store
fn parse_id(raw: &str) -> ApiResult<ObjectId> {
    if !ObjectId::is_valid(raw) {
        return Err(ApiError::WrongId);
    }
    // Cannot fail once validated
    ObjectId::parse_str(raw).map_err(|_| ApiError::WrongId)
}
