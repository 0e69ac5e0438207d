//! Guild configuration store.
//!
//! The persistent store is an external service; the bot talks to it through
//! the [`GuildStore`] trait. [`MemoryGuildStore`] backs tests and local runs.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use bgs_types::GuildConfig;
use chrono::Utc;

/// Read/write access to per-guild configuration.
pub trait GuildStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the guild record; `None` if the guild was never set up.
    fn get(
        &self,
        guild_id: u64,
    ) -> impl Future<Output = Result<Option<GuildConfig>, Self::Error>> + Send;

    /// Create or replace the guild record.
    fn insert(&self, config: GuildConfig) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Apply `apply` to an existing record and stamp its `updated_at`.
    /// Returns the updated record, or `None` if the guild is not set up.
    fn update<F>(
        &self,
        guild_id: u64,
        apply: F,
    ) -> impl Future<Output = Result<Option<GuildConfig>, Self::Error>> + Send
    where
        F: FnOnce(&mut GuildConfig) + Send;

    /// Delete the guild record; `true` if one existed.
    fn remove(&self, guild_id: u64) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Error type for [`MemoryGuildStore`].
#[derive(Debug)]
pub struct MemoryStoreError(String);

impl fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryGuildStore error: {}", self.0)
    }
}

impl std::error::Error for MemoryStoreError {}

/// Thread-safe in-memory guild store.
///
/// Backed by `Arc<Mutex<HashMap>>` so it is `Clone`, `Send`, and `Sync`,
/// safe to share across `tokio` tasks. Holds nothing across restarts.
#[derive(Clone, Default)]
pub struct MemoryGuildStore {
    inner: Arc<Mutex<HashMap<u64, GuildConfig>>>,
}

impl MemoryGuildStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of stored guild records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Return `true` if no guild records are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

impl GuildStore for MemoryGuildStore {
    type Error = MemoryStoreError;

    async fn get(&self, guild_id: u64) -> Result<Option<GuildConfig>, MemoryStoreError> {
        Ok(self.inner.lock().unwrap().get(&guild_id).cloned())
    }

    async fn insert(&self, config: GuildConfig) -> Result<(), MemoryStoreError> {
        self.inner.lock().unwrap().insert(config.guild_id, config);
        Ok(())
    }

    async fn update<F>(
        &self,
        guild_id: u64,
        apply: F,
    ) -> Result<Option<GuildConfig>, MemoryStoreError>
    where
        F: FnOnce(&mut GuildConfig) + Send,
    {
        let mut guard = self.inner.lock().unwrap();
        match guard.get_mut(&guild_id) {
            Some(config) => {
                apply(config);
                config.updated_at = Utc::now();
                Ok(Some(config.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, guild_id: u64) -> Result<bool, MemoryStoreError> {
        Ok(self.inner.lock().unwrap().remove(&guild_id).is_some())
    }
}
