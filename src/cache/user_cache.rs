use redis::{AsyncCommands, RedisResult};
use uuid::Uuid;

use crate::db::models::AuthUser;
use crate::error::AppError;

/// 用户缓存键前缀
const USER_CACHE_PREFIX: &str = "nivasa:user:";

fn user_key(user_id: Uuid) -> String {
    format!("{}{}", USER_CACHE_PREFIX, user_id)
}

/// 用户缓存管理器
///
/// Every operation is best-effort: a Redis failure is logged and treated as
/// a cache miss so requests fall through to PostgreSQL.
#[derive(Clone)]
pub struct UserCache {
    redis_client: redis::Client,
    ttl: u64,
}

impl UserCache {
    pub fn new(redis_url: &str, ttl: u64) -> Result<Self, AppError> {
        let redis_client = redis::Client::open(redis_url)?;
        Ok(Self { redis_client, ttl })
    }

    async fn get_connection(&self) -> RedisResult<redis::aio::MultiplexedConnection> {
        self.redis_client.get_multiplexed_async_connection().await
    }

    /// 获取缓存的用户基本信息
    pub async fn get_user(&self, user_id: Uuid) -> Option<AuthUser> {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("User cache unavailable: {}", e);
                return None;
            }
        };

        let cached: Option<String> = match conn.get(user_key(user_id)).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(user_id = %user_id, "Failed to read cached user: {}", e);
                return None;
            }
        };

        cached.and_then(|json| match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(user_id = %user_id, "Discarding malformed cached user: {}", e);
                None
            }
        })
    }

    /// 缓存用户基本信息
    pub async fn cache_user(&self, user: &AuthUser) {
        let json = match serde_json::to_string(user) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(user_id = %user.id, "Failed to serialize user for cache: {}", e);
                return;
            }
        };

        let result: RedisResult<()> = async {
            let mut conn = self.get_connection().await?;
            conn.set_ex(user_key(user.id), json, self.ttl).await
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(user_id = %user.id, "Failed to cache user: {}", e);
        }
    }

    /// 删除用户缓存
    pub async fn invalidate(&self, user_id: Uuid) {
        let result: RedisResult<i32> = async {
            let mut conn = self.get_connection().await?;
            conn.del(user_key(user_id)).await
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(user_id = %user_id, "Failed to invalidate cached user: {}", e);
        }
    }

    /// 检查缓存连接状态
    pub async fn ping(&self) -> bool {
        let result: RedisResult<String> = async {
            let mut conn = self.get_connection().await?;
            redis::cmd("PING").query_async(&mut conn).await
        }
        .await;

        matches!(result, Ok(ref pong) if pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_user() {
        let id = Uuid::new_v4();
        assert_eq!(user_key(id), format!("nivasa:user:{}", id));
    }

    #[test]
    fn rejects_malformed_redis_url() {
        assert!(UserCache::new("not a url", 60).is_err());
        assert!(UserCache::new("redis://127.0.0.1:6379", 60).is_ok());
    }
}
