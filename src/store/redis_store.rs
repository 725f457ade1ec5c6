use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient, Script};

use super::{StoreError, UserRecord, UserStore};

/// used 仍为假时才写入；记录不存在返回 0
const CONSUME_LUA: &str = r#"
local used = redis.call('HGET', KEYS[1], 'used')
if used == false then
    if redis.call('EXISTS', KEYS[1]) == 0 then
        return 0
    end
elseif used ~= '0' and used ~= 'false' then
    return 0
end
redis.call('HSET', KEYS[1], 'used', '1')
return 1
"#;

/// Redis 用户记录存储
///
/// 每个用户一个哈希 `{prefix}:{user_id}`，字段为 `token`、`expiry_timestamp`、`used`。
/// 集合 `{prefix}:by_token:{token}` 作为 token 的二级索引，保存持有该 token 的用户 ID。
#[derive(Clone)]
pub struct RedisUserStore {
    redis: Arc<RedisClient>,
    prefix: String,
    consume_script: Script,
}

impl RedisUserStore {
    pub fn new(redis: Arc<RedisClient>, prefix: impl Into<String>) -> Self {
        Self {
            redis,
            prefix: prefix.into(),
            consume_script: Script::new(CONSUME_LUA),
        }
    }

    fn record_key(&self, user_id: &str) -> String {
        format!("{}:{}", self.prefix, user_id)
    }

    fn token_index_key(&self, token: &str) -> String {
        format!("{}:by_token:{}", self.prefix, token)
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    async fn find_by_token(&self, token: &str) -> Result<Vec<(String, UserRecord)>, StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        let mut user_ids: Vec<String> = conn.smembers(self.token_index_key(token)).await?;
        user_ids.sort();

        let mut matches = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            let fields: HashMap<String, String> = conn.hgetall(self.record_key(&user_id)).await?;
            // 索引残留：记录已删除或 token 已更换
            if fields.is_empty() {
                continue;
            }
            let record = decode_record(&user_id, &fields)?;
            if record.token != token {
                continue;
            }
            matches.push((user_id, record));
        }

        Ok(matches)
    }

    async fn mark_used(&self, user_id: &str) -> Result<(), StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.hset(self.record_key(user_id), "used", "1").await?;
        Ok(())
    }

    async fn consume(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let consumed: i32 = self
            .consume_script
            .key(self.record_key(user_id))
            .invoke_async(&mut conn)
            .await?;
        Ok(consumed == 1)
    }
}

fn decode_record(user_id: &str, fields: &HashMap<String, String>) -> Result<UserRecord, StoreError> {
    let malformed = |field| StoreError::Malformed {
        user_id: user_id.to_string(),
        field,
    };

    let token = fields.get("token").cloned().ok_or_else(|| malformed("token"))?;
    let expiry_timestamp = fields
        .get("expiry_timestamp")
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| malformed("expiry_timestamp"))?;
    // 缺失的 used 视为未使用；不做 trim，与 CONSUME_LUA 的比较一致
    let used = match fields.get("used") {
        None => false,
        Some(raw) => parse_flag(raw).ok_or_else(|| malformed("used"))?,
    };

    Ok(UserRecord {
        token,
        expiry_timestamp,
        used,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
