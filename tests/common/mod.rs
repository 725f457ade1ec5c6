use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use token_gate::{
    AppState,
    config::{Config, ConsumeMode, StoreBackend},
    router::create_router,
    store::{MemoryUserStore, UserRecord, UserStore},
    verifier::TokenVerifier,
};
use tower::ServiceExt;

pub const VERIFY_PATH: &str = "/verifyToken";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryUserStore,
}

impl TestApp {
    pub fn new(mode: ConsumeMode) -> Self {
        let store = MemoryUserStore::new();
        Self {
            router: router_with_store(Arc::new(store.clone()), mode),
            store,
        }
    }

    pub async fn seed(&self, user_id: &str, token: &str, expiry_timestamp: i64, used: bool) {
        self.store
            .insert(
                user_id,
                UserRecord {
                    token: token.into(),
                    expiry_timestamp,
                    used,
                },
            )
            .await;
    }

    pub async fn request(&self, method: Method, body: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(VERIFY_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        send(self.router.clone(), req).await
    }

    pub async fn verify(&self, token: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            &serde_json::json!({ "token": token }).to_string(),
        )
        .await
    }
}

/// 以任意存储实现构建完整路由
pub fn router_with_store(store: Arc<dyn UserStore>, mode: ConsumeMode) -> Router {
    let config = Config {
        server_host: "127.0.0.1".into(),
        server_port: 0,
        verify_path: VERIFY_PATH.into(),
        store_backend: StoreBackend::Memory { seed_file: None },
        user_key_prefix: "users".into(),
        consume_mode: mode,
    };
    create_router(AppState {
        verifier: TokenVerifier::new(store, mode),
        config,
    })
}

pub fn verify_request(token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(VERIFY_PATH)
        .body(Body::from(serde_json::json!({ "token": token }).to_string()))
        .expect("Failed to build request")
}

pub async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(req).await.expect("Failed to execute request.");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, body)
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
