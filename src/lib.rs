pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod utils;
pub mod validation;

use crate::cache::UserCache;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::middleware::auth::TokenService;
use crate::utils::AssetUrlHelper;
use std::sync::Arc;
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub token_service: TokenService,
    pub user_cache: UserCache,
    pub asset_helper: AssetUrlHelper,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> AppResult<Self> {
        let token_service = TokenService::new(&config.auth());
        let user_cache = UserCache::new(&config.redis_url, config.user_cache_ttl)?;
        let asset_helper = AssetUrlHelper::new(&config.assets());
        Ok(Self {
            db,
            config: Arc::new(config),
            token_service,
            user_cache,
            asset_helper,
        })
    }
}

fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = parse_level(&logging.level);

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_max_level(level).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_levels_fall_back_to_info() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }
}
