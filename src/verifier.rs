use std::sync::Arc;

use crate::config::ConsumeMode;
use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("token not found")]
    InvalidToken,
    #[error("token expired")]
    Expired,
    #[error("token already used")]
    AlreadyUsed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 一次性令牌校验
#[derive(Clone)]
pub struct TokenVerifier {
    store: Arc<dyn UserStore>,
    mode: ConsumeMode,
}

impl TokenVerifier {
    pub fn new(store: Arc<dyn UserStore>, mode: ConsumeMode) -> Self {
        Self { store, mode }
    }

    /// 校验令牌并标记为已使用，成功时返回用户 ID
    ///
    /// `now` 为当前 Unix 时间（秒）。过期判断先于已使用判断。
    pub async fn verify(&self, token: &str, now: i64) -> Result<String, VerifyError> {
        let mut matches = self.store.find_by_token(token).await?;
        if matches.is_empty() {
            return Err(VerifyError::InvalidToken);
        }
        let (user_id, record) = matches.remove(0);
        if !matches.is_empty() {
            tracing::warn!(
                "{} records share one token, using {}",
                matches.len() + 1,
                user_id
            );
        }

        if record.expiry_timestamp < now {
            return Err(VerifyError::Expired);
        }
        if record.used {
            return Err(VerifyError::AlreadyUsed);
        }

        match self.mode {
            ConsumeMode::Strict => {
                if !self.store.consume(&user_id).await? {
                    tracing::debug!("Lost consume race for user {}", user_id);
                    return Err(VerifyError::AlreadyUsed);
                }
            }
            ConsumeMode::Lenient => self.store.mark_used(&user_id).await?,
        }

        Ok(user_id)
    }
}
