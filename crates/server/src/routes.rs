pub mod admin;
pub mod categories;
pub mod items;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth::{self, ServerState};

/// `{"ok": true}` acknowledgement for deletes and resets.
pub(crate) fn ok_ack() -> Json<Value> {
    Json(serde_json::json!({"ok": true}))
}

/// Any origin, method and header; credentials allowed (origin is mirrored).
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full application router. Every route sits behind the Basic auth gate.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:category_name",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/:item_id",
            put(items::update_item).delete(items::delete_item),
        )
        .route("/init_data", post(admin::init_data))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    api.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
