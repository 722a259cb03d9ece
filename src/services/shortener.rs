//! Shortener core
//!
//! Maps URLs to stable short ids and resolves ids back to URLs, with a
//! single external key-value store as the source of truth. Ids are derived
//! from the content itself (SHA-256 prefix, base-62 encoded), so no
//! counter and no cross-process coordination is needed: any two processes
//! derive the same id for the same URL.
//!
//! Two records per link, tied together only by key naming:
//! - forward: `short:<id>` → original URL (authoritative)
//! - reverse: `url:<original URL>` → id (dedup optimization, best-effort)

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::errors::{Result, SnipError};
use crate::storage::KvStore;
use crate::utils::{base62, validate_url};

const FORWARD_PREFIX: &str = "short:";
const REVERSE_PREFIX: &str = "url:";

/// Upper bound for salted retries before giving up.
const MAX_ATTEMPTS: u32 = 8;

/// How many leading hash bytes feed the id (40 bits).
const HASH_PREFIX_BYTES: usize = 5;

/// A stored mapping as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: String,
    pub short_url: String,
    pub original_url: String,
}

/// Stateless shortener over an external key-value store.
///
/// Holds no mutable in-process state; safe to share across workers.
pub struct Shortener {
    store: Arc<dyn KvStore>,
    base_url: String,
}

impl Shortener {
    pub fn new(store: Arc<dyn KvStore>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { store, base_url }
    }

    /// Store the URL and return the short link derived from its hash.
    ///
    /// Idempotent: an existing reverse record short-circuits, and even
    /// without one the derivation reaches the same id again. On a slot
    /// collision with a *different* URL the hash input is salted with the
    /// attempt index and retried, up to `MAX_ATTEMPTS` times.
    pub async fn shorten(&self, original: &str) -> Result<ShortLink> {
        validate_url(original)?;

        // 先查反向记录，避免重复写入
        let reverse_key = format!("{REVERSE_PREFIX}{original}");
        if let Some(id) = self.store.get(&reverse_key).await? {
            return Ok(self.build_link(id, original));
        }

        for attempt in 0..MAX_ATTEMPTS {
            let id = Self::derive_id(original, attempt);
            let forward_key = format!("{FORWARD_PREFIX}{id}");

            match self.store.get(&forward_key).await? {
                Some(existing) if existing != original => {
                    // 真碰撞：不同 URL 占用了这个 id，加盐重试
                    debug!(
                        "Slot collision on id '{}' (attempt {}), retrying with salt",
                        id, attempt
                    );
                    continue;
                }
                Some(_) => {
                    // Same URL already occupies the slot (concurrent write
                    // or a lost reverse record). Not a collision; repair
                    // the reverse record and reuse the id.
                    self.write_reverse_record(&reverse_key, &id).await;
                    return Ok(self.build_link(id, original));
                }
                None => {
                    self.store.set(&forward_key, original).await?;
                    self.write_reverse_record(&reverse_key, &id).await;
                    return Ok(self.build_link(id, original));
                }
            }
        }

        Err(SnipError::generation_exhausted(format!(
            "failed to generate unique id after {MAX_ATTEMPTS} attempts"
        )))
    }

    /// Resolve a short id to the stored URL, verbatim.
    pub async fn resolve(&self, id: &str) -> Result<String> {
        let forward_key = format!("{FORWARD_PREFIX}{id}");

        match self.store.get(&forward_key).await? {
            Some(original) => Ok(original),
            None => Err(SnipError::not_found(format!("short id not found: {id}"))),
        }
    }

    /// Derive the candidate id for one attempt.
    ///
    /// Attempt 0 hashes the URL itself; later attempts append `#<attempt>`
    /// so each retry lands on an unrelated point of the hash space. The
    /// first five digest bytes are right-aligned into a big-endian u64
    /// (top three bytes zero) and base-62 encoded.
    fn derive_id(original: &str, attempt: u32) -> String {
        let digest = if attempt == 0 {
            Sha256::digest(original.as_bytes())
        } else {
            Sha256::digest(format!("{original}#{attempt}").as_bytes())
        };

        let mut buf = [0u8; 8];
        buf[8 - HASH_PREFIX_BYTES..].copy_from_slice(&digest[..HASH_PREFIX_BYTES]);
        base62::encode(u64::from_be_bytes(buf))
    }

    /// Best-effort reverse write: a failure costs the dedup fast path for
    /// this URL, never the mapping itself.
    async fn write_reverse_record(&self, reverse_key: &str, id: &str) {
        if let Err(e) = self.store.set(reverse_key, id).await {
            warn!(
                "Failed to write reverse record '{}' -> '{}': {}",
                reverse_key, id, e
            );
        }
    }

    fn build_link(&self, id: String, original: &str) -> ShortLink {
        let short_url = format!("{}/{}", self.base_url, id);
        ShortLink {
            id,
            short_url,
            original_url: original.to_string(),
        }
    }
}
