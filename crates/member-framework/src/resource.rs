//! # Member Resource Adapter
//!
//! [`MemberResource`] composes the guard, the store and the mutator into the
//! create/read/update/delete operations the orchestrating host invokes for a
//! single element of a parent's list field.
//!
//! ## Operations
//!
//! * **Create**:
//!     1. Acquires the guard for `parent_id`.
//!     2. Fetches the parent. A missing parent fails with [`ResourceError::ParentNotFound`].
//!     3. Appends the value; writes the parent only when the list changed.
//!     4. Releases the guard and returns a handle whose id is the value.
//!
//! * **Read**: no remote call. A single list element cannot be queried on its
//!   own, so the handle is trusted to be as last written.
//!
//! * **Update**: runs Create against the new value. The previous value is left
//!   in the list; replacing it is up to the host's replacement semantics.
//!
//! * **Delete**:
//!     1. Acquires the guard for `parent_id`.
//!     2. Fetches the parent. A missing parent counts as already deleted.
//!     3. Removes the value; writes the parent only when the list changed.

use crate::entity::MemberEntity;
use crate::error::{ResourceError, StoreError};
use crate::guard::{KeyGuard, KeyedMutex};
use crate::mutator::{self, Change};
use crate::store::ObjectStore;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Typed configuration of one member, validated before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberConfig {
    pub parent_id: String,
    pub value: String,
}

impl MemberConfig {
    pub fn new(parent_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            value: value.into(),
        }
    }
}

/// Host-side identity of one member. Its id is the element value itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberHandle {
    pub parent_id: String,
    pub value: String,
}

impl MemberHandle {
    pub fn new(parent_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            value: value.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.value
    }
}

impl From<MemberConfig> for MemberHandle {
    fn from(config: MemberConfig) -> Self {
        Self {
            parent_id: config.parent_id,
            value: config.value,
        }
    }
}

/// Formats as the import id, `<parent_id>/<value>`.
impl Display for MemberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.parent_id, self.value)
    }
}

/// Generic CRUD adapter for the member entity `M` backed by the store `S`.
pub struct MemberResource<M: MemberEntity, S> {
    store: Arc<S>,
    locks: Arc<KeyedMutex>,
    lock_timeout: Option<Duration>,
    _entity: PhantomData<fn() -> M>,
}

impl<M: MemberEntity, S> Clone for MemberResource<M, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            locks: self.locks.clone(),
            lock_timeout: self.lock_timeout,
            _entity: PhantomData,
        }
    }
}

impl<M, S> MemberResource<M, S>
where
    M: MemberEntity,
    S: ObjectStore<M::Parent>,
{
    /// Creates an adapter sharing `locks` with every other adapter of the process.
    pub fn new(store: Arc<S>, locks: Arc<KeyedMutex>) -> Self {
        Self {
            store,
            locks,
            lock_timeout: None,
            _entity: PhantomData,
        }
    }

    /// Bounds how long an operation waits for the parent's guard.
    pub fn with_lock_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn type_name(&self) -> &'static str {
        M::TYPE_NAME
    }

    pub fn validate(&self, config: &MemberConfig) -> Result<(), ResourceError> {
        if config.parent_id.is_empty() {
            return Err(ResourceError::InvalidConfig(format!(
                "{}: parent id must not be empty",
                M::TYPE_NAME
            )));
        }
        M::validate_value(&config.value)
            .map_err(|msg| ResourceError::InvalidConfig(format!("{}: {}", M::TYPE_NAME, msg)))
    }

    async fn lock(&self, parent_id: &str) -> Result<KeyGuard, ResourceError> {
        match self.lock_timeout {
            Some(timeout) => self.locks.acquire_timeout(parent_id, timeout).await,
            None => Ok(self.locks.acquire(parent_id).await),
        }
    }

    #[instrument(skip(self, config), fields(kind = M::TYPE_NAME, parent_id = %config.parent_id, value = %config.value))]
    pub async fn create(&self, config: MemberConfig) -> Result<MemberHandle, ResourceError> {
        self.validate(&config)?;
        self.append(&config).await?;
        Ok(MemberHandle::from(config))
    }

    pub async fn read(&self, handle: MemberHandle) -> Result<MemberHandle, ResourceError> {
        debug!(kind = M::TYPE_NAME, %handle, "Read is a no-op");
        Ok(handle)
    }

    #[instrument(skip(self, previous, config), fields(kind = M::TYPE_NAME, parent_id = %config.parent_id, value = %config.value))]
    pub async fn update(
        &self,
        previous: &MemberHandle,
        config: MemberConfig,
    ) -> Result<MemberHandle, ResourceError> {
        self.validate(&config)?;
        if previous.value != config.value {
            debug!(previous = %previous.value, "Previous value left in place");
        }
        self.append(&config).await?;
        Ok(MemberHandle::from(config))
    }

    #[instrument(skip(self, handle), fields(kind = M::TYPE_NAME, parent_id = %handle.parent_id, value = %handle.value))]
    pub async fn delete(&self, handle: &MemberHandle) -> Result<(), ResourceError> {
        let _guard = self.lock(&handle.parent_id).await?;

        let parent = match self.store.fetch(&handle.parent_id).await {
            Ok(parent) => parent,
            Err(StoreError::NotFound(_)) => {
                info!("{} {} no longer exists, nothing to delete", M::PARENT_KIND, handle.parent_id);
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                return Err(e.into());
            }
        };

        let (parent, change) = mutator::remove::<M>(parent, &handle.value);
        if change == Change::AlreadyAbsent {
            info!(
                "{} {} does not have {}",
                M::PARENT_KIND,
                handle.parent_id,
                handle.value
            );
            return Ok(());
        }

        self.store
            .write(&handle.parent_id, &parent)
            .await
            .inspect_err(|e| warn!(error = %e, "Write failed"))?;
        info!("Removed");
        Ok(())
    }

    async fn append(&self, config: &MemberConfig) -> Result<Change, ResourceError> {
        let _guard = self.lock(&config.parent_id).await?;

        let parent = match self.store.fetch(&config.parent_id).await {
            Ok(parent) => parent,
            Err(StoreError::NotFound(_)) => {
                warn!("{} {} does not exist", M::PARENT_KIND, config.parent_id);
                return Err(ResourceError::ParentNotFound {
                    kind: M::PARENT_KIND,
                    parent_id: config.parent_id.clone(),
                });
            }
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                return Err(e.into());
            }
        };

        let (parent, change) = mutator::append::<M>(parent, &config.value);
        if change == Change::AlreadyPresent {
            info!(
                "{} {} already has {}",
                M::PARENT_KIND,
                config.parent_id,
                config.value
            );
            return Ok(change);
        }

        self.store
            .write(&config.parent_id, &parent)
            .await
            .inspect_err(|e| warn!(error = %e, "Write failed"))?;
        info!("Appended");
        Ok(change)
    }
}
