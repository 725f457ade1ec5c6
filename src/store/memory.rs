use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StoreError, UserRecord, UserStore};

/// 进程内存储，用于本地开发和测试
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    records: Arc<Mutex<BTreeMap<String, UserRecord>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `{ "<user_id>": { "token": .., "expiry_timestamp": .., "used": .. } }` 构建
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: BTreeMap<String, UserRecord> = serde_json::from_str(json)?;
        Ok(Self {
            records: Arc::new(Mutex::new(records)),
        })
    }

    pub async fn insert(&self, user_id: &str, record: UserRecord) {
        self.records
            .lock()
            .await
            .insert(user_id.to_string(), record);
    }

    pub async fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.records.lock().await.get(user_id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_token(&self, token: &str) -> Result<Vec<(String, UserRecord)>, StoreError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|(_, record)| record.token == token)
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect())
    }

    async fn mark_used(&self, user_id: &str) -> Result<(), StoreError> {
        if let Some(record) = self.records.lock().await.get_mut(user_id) {
            record.used = true;
        }
        Ok(())
    }

    async fn consume(&self, user_id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.lock().await;
        match records.get_mut(user_id) {
            Some(record) if !record.used => {
                record.used = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
