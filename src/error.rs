use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::result::ApiResponse;
use crate::verifier::VerifyError;

#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    TokenRequired,
    InvalidToken,
    TokenExpired,
    TokenAlreadyUsed,
    InternalServerError,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::TokenRequired => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::NOT_FOUND,
            AppError::TokenExpired => StatusCode::UNAUTHORIZED,
            AppError::TokenAlreadyUsed => StatusCode::FORBIDDEN,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "Method Not Allowed",
            AppError::TokenRequired => "Token is required.",
            AppError::InvalidToken => "Invalid Token.",
            AppError::TokenExpired => "Token has expired.",
            AppError::TokenAlreadyUsed => "This token has already been used.",
            AppError::InternalServerError => "Internal server error.",
        }
    }
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::InvalidToken => AppError::InvalidToken,
            VerifyError::Expired => AppError::TokenExpired,
            VerifyError::AlreadyUsed => AppError::TokenAlreadyUsed,
            VerifyError::Store(e) => {
                tracing::error!("Verification Error: {}", e);
                AppError::InternalServerError
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ApiResponse::error(self.message()))).into_response()
    }
}
