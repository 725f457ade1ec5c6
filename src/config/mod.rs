use std::env;

/// 令牌消费方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeMode {
    /// 条件写入，只有 used 仍为 false 时才会成功
    Strict,
    /// 先检查再直接写入，并发请求可能同时通过
    Lenient,
}

impl ConsumeMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(ConsumeMode::Strict),
            "lenient" | "non-strict" => Some(ConsumeMode::Lenient),
            _ => None,
        }
    }
}

/// 用户记录存储后端
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Redis { url: String },
    /// 可选的 JSON 种子文件：`{ "<user_id>": UserRecord, ... }`
    Memory { seed_file: Option<String> },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub verify_path: String,
    pub store_backend: StoreBackend,
    pub user_key_prefix: String,
    pub consume_mode: ConsumeMode,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let consume_mode = match env::var("CONSUME_MODE") {
            Ok(raw) => ConsumeMode::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown CONSUME_MODE {:?}, using strict", raw);
                ConsumeMode::Strict
            }),
            Err(_) => ConsumeMode::Strict,
        };

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "redis".into())
            .trim()
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory {
                seed_file: env::var("USER_SEED_FILE").ok(),
            },
            "redis" => StoreBackend::Redis {
                url: env::var("REDIS_URL")?,
            },
            other => {
                tracing::warn!("Unknown STORE_BACKEND {:?}, using redis", other);
                StoreBackend::Redis {
                    url: env::var("REDIS_URL")?,
                }
            }
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "::".into()),
            server_port: parse_port(env::var("SERVER_PORT").ok().as_deref()),
            verify_path: normalize_path(
                &env::var("VERIFY_PATH").unwrap_or_else(|_| "/verifyToken".into()),
            ),
            store_backend,
            user_key_prefix: env::var("USER_KEY_PREFIX").unwrap_or_else(|_| "users".into()),
            consume_mode,
        })
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(3000)
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
