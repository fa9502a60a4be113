//! # Member Framework
//!
//! Building blocks for provider resources that own one element of a list
//! field on a remote object: a redirect URI on an application, an audience on
//! an authorization server, and so on.
//!
//! The remote API only offers whole-object replacement for these fields, so
//! every change is a read-modify-write of the parent. Two such sequences for
//! the same parent must never interleave, otherwise one of the changes is
//! silently lost.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`MemberEntity`]) - which parent type and which list field
//! 2. **Store Layer** ([`ObjectFetcher`], [`ObjectWriter`]) - fresh reads and whole-object writes
//! 3. **Mutation Layer** ([`mutator`]) - pure append-if-absent / remove-if-present
//! 4. **Coordination Layer** ([`KeyedMutex`]) - per-parent mutual exclusion
//! 5. **Adapter Layer** ([`MemberResource`], [`ManagedResource`]) - the CRUD surface the host drives
//!
//! ```rust
//! use member_framework::mock::MockStore;
//! use member_framework::{KeyedMutex, MemberConfig, MemberEntity, MemberResource};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug)]
//! struct Server { audiences: Vec<String> }
//!
//! struct Audience;
//! impl MemberEntity for Audience {
//!     type Parent = Server;
//!     const TYPE_NAME: &'static str = "auth_server_audience";
//!     const PARENT_KIND: &'static str = "authorization server";
//!     fn members(p: &Server) -> &[String] { &p.audiences }
//!     fn members_mut(p: &mut Server) -> &mut Vec<String> { &mut p.audiences }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let locks = Arc::new(KeyedMutex::new());
//!     let store = Arc::new(MockStore::new().with_object("aus1", Server { audiences: vec![] }));
//!     let audiences = MemberResource::<Audience, _>::new(store.clone(), locks.clone());
//!
//!     let handle = audiences.create(MemberConfig::new("aus1", "api://default")).await.unwrap();
//!     assert_eq!(handle.id(), "api://default");
//!
//!     audiences.delete(&handle).await.unwrap();
//!     assert!(store.object("aus1").unwrap().audiences.is_empty());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Operations run as ordinary tokio tasks, many at once
//! - Sequences for the same parent id run strictly one at a time
//! - Sequences for different parent ids never wait on each other
//! - The guard is process-local; separate processes can still race
//!
//! ## Testing
//!
//! The [`mock`] module provides an in-memory [`MockStore`](mock::MockStore)
//! that also records how sequences interleaved.

pub mod entity;
pub mod error;
pub mod guard;
pub mod import;
pub mod managed;
pub mod mock;
pub mod mutator;
pub mod resource;
pub mod store;
pub mod tracing;

// Re-export core types for convenience
pub use entity::MemberEntity;
pub use error::{ResourceError, StoreError};
pub use guard::{KeyGuard, KeyedMutex};
pub use import::parse_import_id;
pub use managed::ManagedResource;
pub use mutator::Change;
pub use resource::{MemberConfig, MemberHandle, MemberResource};
pub use store::{ObjectFetcher, ObjectStore, ObjectWriter};
