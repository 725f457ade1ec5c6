use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use token_gate::{
    AppState,
    config::{Config, StoreBackend},
    router::create_router,
    store::{MemoryUserStore, RedisUserStore, UserStore},
    verifier::TokenVerifier,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 设置用户记录存储
    let store: Arc<dyn UserStore> = match &config.store_backend {
        StoreBackend::Redis { url } => {
            let redis_client =
                redis::Client::open(url.as_str()).expect("Failed to create Redis client");
            Arc::new(RedisUserStore::new(
                Arc::new(redis_client),
                config.user_key_prefix.clone(),
            ))
        }
        StoreBackend::Memory { seed_file } => {
            tracing::warn!("Using in-memory user store, records are lost on restart");
            let store = match seed_file {
                Some(path) => {
                    let json = std::fs::read_to_string(path).expect("Failed to read seed file");
                    MemoryUserStore::from_json(&json).expect("Failed to parse seed file")
                }
                None => MemoryUserStore::new(),
            };
            Arc::new(store)
        }
    };
    tracing::info!("Token consume mode: {:?}", config.consume_mode);

    let state = AppState {
        verifier: TokenVerifier::new(store, config.consume_mode),
        config: config.clone(),
    };

    let app = create_router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}{}", addr, config.verify_path);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
