// 用户记录存储
// 记录由外部流程写入，本服务只读取并更新 used 字段

mod memory;
mod redis_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::MemoryUserStore;
pub use redis_store::RedisUserStore;

/// 用户记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub token: String,
    pub expiry_timestamp: i64, // Unix timestamp, 秒
    #[serde(default)]
    pub used: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[from] redis::RedisError),
    #[error("malformed record {user_id}: bad or missing field `{field}`")]
    Malformed { user_id: String, field: &'static str },
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// 查询 token 字段等于给定值的全部记录，按用户 ID 升序返回
    async fn find_by_token(&self, token: &str) -> Result<Vec<(String, UserRecord)>, StoreError>;

    /// 直接把 used 写为 true，不检查当前值
    async fn mark_used(&self, user_id: &str) -> Result<(), StoreError>;

    /// 仅当 used 仍为 false 时写为 true；返回本次调用是否完成了写入
    async fn consume(&self, user_id: &str) -> Result<bool, StoreError>;
}
