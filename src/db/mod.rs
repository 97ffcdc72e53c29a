pub mod enums;
pub mod models;
pub mod repositories;

use diesel::PgConnection;
use diesel::r2d2::{self, ConnectionManager as DbConnectionManager};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

pub type DbPool = r2d2::Pool<DbConnectionManager<PgConnection>>;

pub fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let manager = DbConnectionManager::<PgConnection>::new(&config.url);
    r2d2::Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .map_err(|e| AppError::Config(format!("Failed to create database pool: {}", e)))
}

/// Escapes LIKE wildcards in user input and wraps it for a substring match.
pub fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("A-101"), "%A-101%");
        assert_eq!(like_pattern(" 50%_off "), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
