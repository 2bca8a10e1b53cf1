use axum::{extract::State, Json};
use serde_json::Value;

use crate::auth::ServerState;
use super::ok_ack;

/// 重置目录：两张表整体替换为种子数据（默认为空）
pub async fn init_data(State(state): State<ServerState>) -> Json<Value> {
    state.catalog.reset().await;
    ok_ack()
}
