use axum::{
    Router,
    routing::{any, get},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::{AppState, middleware::log_errors, routes};

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let verify_path = state.config.verify_path.clone();

    Router::new()
        // 方法检查在处理函数内完成，以便返回统一的 405 响应体
        .route(&verify_path, any(routes::verify::verify_token))
        .route("/health", get(routes::health::health))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(log_errors)),
        )
        .with_state(state)
}
