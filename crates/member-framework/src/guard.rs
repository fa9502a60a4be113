//! # Named Mutual-Exclusion Guard
//!
//! The remote API offers no concurrency token for whole-object updates, so two
//! fetch-mutate-write sequences against the same parent would silently drop
//! one another's change. [`KeyedMutex`] serializes them within the process.
//!
//! One coordinator is created by the host wiring and shared by every adapter.
//! Each key lazily gets its own async lock; distinct keys never contend. Keys
//! are never removed, which is fine for the small number of parent ids a
//! provider process touches.
//!
//! Acquisition is not re-entrant: a task that acquires a key it already holds
//! waits forever.

use crate::error::ResourceError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Process-local registry of per-key locks.
#[derive(Debug, Default)]
pub struct KeyedMutex {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Exclusive hold on one key. The key is released when this is dropped.
#[derive(Debug)]
pub struct KeyGuard {
    key: String,
    _held: OwnedMutexGuard<()>,
}

impl KeyGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        debug!(key = %self.key, "Lock released");
    }
}

impl KeyedMutex {
    pub fn new() -> Self {
        Self::default()
    }

    async fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.to_string()).or_default().clone()
    }

    /// Waits until no other task holds `key`, then holds it.
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let lock = self.lock_for(key).await;
        let held = lock.lock_owned().await;
        debug!(key, "Lock acquired");
        KeyGuard {
            key: key.to_string(),
            _held: held,
        }
    }

    /// Like [`acquire`](Self::acquire) but gives up after `timeout`.
    pub async fn acquire_timeout(
        &self,
        key: &str,
        timeout: Duration,
    ) -> Result<KeyGuard, ResourceError> {
        let lock = self.lock_for(key).await;
        match tokio::time::timeout(timeout, lock.lock_owned()).await {
            Ok(held) => {
                debug!(key, "Lock acquired");
                Ok(KeyGuard {
                    key: key.to_string(),
                    _held: held,
                })
            }
            Err(_) => Err(ResourceError::Timeout {
                key: key.to_string(),
                waited: timeout,
            }),
        }
    }

    /// Number of keys seen so far.
    pub async fn key_count(&self) -> usize {
        self.locks.lock().await.len()
    }
}
