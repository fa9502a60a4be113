//! # Remote Object Store
//!
//! The two seams between the framework and a concrete remote API.
//!
//! - [`ObjectFetcher`] reads a fresh snapshot of a parent object. It must not
//!   answer from a cache: the mutator is only correct against the latest state.
//! - [`ObjectWriter`] replaces the whole parent object remotely.
//!
//! Anything implementing both is an [`ObjectStore`] and can back a
//! [`MemberResource`](crate::MemberResource).

use crate::error::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait ObjectFetcher<P>: Send + Sync {
    /// Fetches the object with `id`.
    ///
    /// Returns [`StoreError::NotFound`] when the object does not exist, so
    /// callers can tell a gone parent apart from a transport failure.
    async fn fetch(&self, id: &str) -> Result<P, StoreError>;
}

#[async_trait]
pub trait ObjectWriter<P>: Send + Sync {
    /// Persists `parent` in full. Never retried here.
    async fn write(&self, id: &str, parent: &P) -> Result<(), StoreError>;
}

/// A fetcher that is also a writer.
pub trait ObjectStore<P>: ObjectFetcher<P> + ObjectWriter<P> {}

impl<P, S> ObjectStore<P> for S where S: ObjectFetcher<P> + ObjectWriter<P> {}
