//! Access-token storage behind the widget backend.
//!
//! The store holds exactly one entry, the bearer access token, under a fixed
//! key with a server-enforced time-to-live. Expiry is owned entirely by the
//! store: an entry that is still readable is assumed valid, and the
//! application never tracks timestamps or deletes the entry itself.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("token store error: {0}")]
pub struct CacheError(pub String);

/// Key-value store for the cached access token.
///
/// Implementations must evict an entry no later than `ttl_secs` after the
/// corresponding `put`.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError>;
}

/// Production store over a shared Redis connection.
///
/// The connection manager multiplexes one connection for the process
/// lifetime; it is constructed once at startup and injected into the
/// components that need it.
pub struct RedisTokenStore {
    con: ConnectionManager,
}

impl RedisTokenStore {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|e| CacheError(e.to_string()))?;
        let con = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError(e.to_string()))?;
        Ok(RedisTokenStore { con })
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut con = self.con.clone();
        let value: Option<String> = con.get(key).await.map_err(|e| CacheError(e.to_string()))?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        let mut con = self.con.clone();
        let _: () = con
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(|e| CacheError(e.to_string()))?;
        Ok(())
    }
}
