#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use sponowd::{
    cache::{CacheError, TokenStore},
    spotify::auth::{ACCESS_TOKEN_KEY, Credentials, TokenCache},
};

/// In-memory stand-in for the Redis store, recording the TTL passed with
/// each write so tests can assert on it.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, u64)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds an access token under the fixed cache key.
    pub fn seeded(value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(ACCESS_TOKEN_KEY.to_string(), (value.to_string(), 0));
        store
    }

    pub fn entry(&self, key: &str) -> Option<(String, u64)> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone()))
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_secs));
        Ok(())
    }
}

/// Credentials that pass the completeness check.
pub fn test_credentials() -> Credentials {
    Credentials {
        client_id: Some("client_id".to_string()),
        client_secret: Some("client_secret".to_string()),
        refresh_token: Some("refresh-token-value".to_string()),
    }
}

/// A token cache whose endpoint is unroutable; any refresh attempt would
/// surface as a transport error.
pub fn offline_token_cache(store: Arc<MemoryStore>, creds: Credentials) -> TokenCache {
    TokenCache::with_token_url(reqwest::Client::new(), store, creds, "http://127.0.0.1:1/token")
}

/// Serves `app` on an ephemeral local port and returns its address.
pub async fn spawn_server(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
