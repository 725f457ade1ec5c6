use config::Config;
use verifier::TokenVerifier;

pub mod config;
pub mod error;
pub mod middleware;
pub mod result;
pub mod router;
pub mod routes;
pub mod store;
pub mod verifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub verifier: TokenVerifier,
}
