use axum::{
    Json,
    body::{Body, to_bytes},
    extract::{Request, State},
    http::Method,
};

use crate::{AppState, error::AppError, result::ApiResponse};

use super::model::VerifyTokenRequest;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// 校验一次性令牌
///
/// 只接受 POST；其余方法在读取请求体之前即返回 405。
pub async fn verify_token(
    State(state): State<AppState>,
    req: Request<Body>,
) -> Result<Json<ApiResponse>, AppError> {
    if req.method() != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let body = to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| AppError::TokenRequired)?;
    let token = VerifyTokenRequest::parse_token(&body)?;

    let now = chrono::Utc::now().timestamp();
    match state.verifier.verify(&token, now).await {
        Ok(user_id) => {
            tracing::info!("Access granted for user {}", user_id);
            Ok(Json(ApiResponse::success("Access granted.")))
        }
        Err(e) => {
            tracing::debug!("Token rejected: {}", e);
            Err(e.into())
        }
    }
}
