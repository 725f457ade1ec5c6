use axum::Json;

use crate::result::ApiResponse;

/// 健康检查接口
pub async fn health() -> Json<ApiResponse> {
    Json(ApiResponse::success("ok"))
}
