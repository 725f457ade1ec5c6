use serde::Serialize;

/// 统一的响应结构，缺省字段不序列化
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn success(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(message.to_string()),
        }
    }
}
