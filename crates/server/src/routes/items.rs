use axum::{extract::{Path, State}, Json};
use serde_json::Value;
use service::{Collection, Record};

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use super::ok_ack;

const COLLECTION: Collection = Collection::Items;

pub async fn list_items(State(state): State<ServerState>) -> Json<Vec<Record>> {
    Json(state.catalog.list(COLLECTION).await)
}

/// 创建商品：`item_id` 按字符串形式作为键
pub async fn create_item(
    State(state): State<ServerState>,
    Json(record): Json<Record>,
) -> Result<Json<Record>, JsonApiError> {
    let created = state.catalog.create(COLLECTION, record).await?;
    Ok(Json(created))
}

pub async fn update_item(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
    Json(patch): Json<Record>,
) -> Result<Json<Record>, JsonApiError> {
    let merged = state.catalog.update(COLLECTION, &item_id, patch).await?;
    Ok(Json(merged))
}

pub async fn delete_item(
    State(state): State<ServerState>,
    Path(item_id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    state.catalog.delete(COLLECTION, &item_id).await?;
    Ok(ok_ack())
}
