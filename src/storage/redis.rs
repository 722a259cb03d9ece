//! Redis key-value backend
//!
//! Keeps one multiplexed connection behind an `RwLock`, re-established
//! lazily after an error. Unlike a cache, this backend is the source of
//! truth: every failure propagates to the caller instead of degrading.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::KvStore;
use crate::errors::{Result, SnipError};

pub struct RedisKvStore {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl RedisKvStore {
    /// Open a client and verify the server with a PING round trip.
    ///
    /// A connect failure here is fatal for server startup.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| SnipError::store_connection(format!("invalid redis url {url}: {e}")))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                SnipError::store_connection(format!("failed to connect to redis at {url}: {e}"))
            })?;

        // 测试 Redis 连接
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| SnipError::store_connection(format!("redis ping failed: {e}")))?;

        debug!("Redis connection established: {}", url);

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(Some(conn))),
        })
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        // 首先尝试读取现有连接
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        // 需要建立新连接
        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection re-established");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return Err(e.into());
            }
        };

        let result: redis::RedisResult<Option<String>> = conn.get(key).await;

        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                error!("Redis GET failed for key '{}': {}", key, e);
                // 连接可能已断开，重置连接
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = match self.get_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                return Err(e.into());
            }
        };

        match conn.set::<&str, &str, ()>(key, value).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("Redis SET failed for key '{}': {}", key, e);
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
