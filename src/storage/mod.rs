//! Key-value storage backends
//!
//! The shortener treats its store as two primitives: `get` and `set`.
//! Absence is reported distinctly from transport failure, which is what
//! lets callers tell "no such record" apart from "store unavailable".

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod memory;
pub mod redis;

pub use memory::MemoryKvStore;
pub use redis::RedisKvStore;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// `Ok(None)` means the key does not exist; `Err` means the store
    /// could not answer.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Permanent write with overwrite semantics. No TTL.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<dyn KvStore>> {
        let config = crate::config::get_config();

        let boxed: Box<dyn KvStore> = match config.storage.backend.as_str() {
            "memory" => Box::new(MemoryKvStore::new()),
            _ => Box::new(RedisKvStore::connect(&config.storage.redis_url).await?),
        };

        Ok(Arc::from(boxed))
    }
}
