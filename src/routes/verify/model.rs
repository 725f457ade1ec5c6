use serde::Deserialize;

use crate::error::AppError;

/// 请求体 `{ "token": string }`，其余字段忽略
#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

impl VerifyTokenRequest {
    /// 解析原始请求体并取出非空 token
    pub fn parse_token(body: &[u8]) -> Result<String, AppError> {
        let req: VerifyTokenRequest =
            serde_json::from_slice(body).map_err(|_| AppError::TokenRequired)?;
        match req.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::TokenRequired),
        }
    }
}
