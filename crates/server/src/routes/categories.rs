use axum::{extract::{Path, State}, Json};
use serde_json::Value;
use service::{Collection, Record};

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use super::ok_ack;

const COLLECTION: Collection = Collection::Categories;

/// 列出全部分类
pub async fn list_categories(State(state): State<ServerState>) -> Json<Vec<Record>> {
    Json(state.catalog.list(COLLECTION).await)
}

/// 创建分类：`category_name` 缺失或已存在时返回 400
pub async fn create_category(
    State(state): State<ServerState>,
    Json(record): Json<Record>,
) -> Result<Json<Record>, JsonApiError> {
    let created = state.catalog.create(COLLECTION, record).await?;
    Ok(Json(created))
}

/// 浅合并更新指定分类
pub async fn update_category(
    State(state): State<ServerState>,
    Path(category_name): Path<String>,
    Json(patch): Json<Record>,
) -> Result<Json<Record>, JsonApiError> {
    let merged = state.catalog.update(COLLECTION, &category_name, patch).await?;
    Ok(Json(merged))
}

pub async fn delete_category(
    State(state): State<ServerState>,
    Path(category_name): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    state.catalog.delete(COLLECTION, &category_name).await?;
    Ok(ok_ack())
}
