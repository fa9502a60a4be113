//! # ManagedResource Trait
//!
//! The object-safe surface the orchestrating host drives. A provider keeps its
//! resources as `Box<dyn ManagedResource>` keyed by type name, so the host does
//! not need to know which parent or field a resource mutates.
//!
//! [`MemberResource`] implements it for every entity and store; `import` comes
//! with a default built on [`parse_import_id`].
use crate::entity::MemberEntity;
use crate::error::ResourceError;
use crate::import::parse_import_id;
use crate::resource::{MemberConfig, MemberHandle, MemberResource};
use crate::store::ObjectStore;
use async_trait::async_trait;

#[async_trait]
pub trait ManagedResource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn validate(&self, config: &MemberConfig) -> Result<(), ResourceError>;

    async fn create(&self, config: MemberConfig) -> Result<MemberHandle, ResourceError>;

    async fn read(&self, handle: MemberHandle) -> Result<MemberHandle, ResourceError>;

    async fn update(
        &self,
        previous: &MemberHandle,
        config: MemberConfig,
    ) -> Result<MemberHandle, ResourceError>;

    async fn delete(&self, handle: &MemberHandle) -> Result<(), ResourceError>;

    /// Builds a handle from `<parent_id>/<value>` without any remote call.
    #[tracing::instrument(skip(self), fields(kind = self.type_name()))]
    fn import(&self, id: &str) -> Result<MemberHandle, ResourceError> {
        tracing::debug!("Importing");
        parse_import_id(id)
    }
}

#[async_trait]
impl<M, S> ManagedResource for MemberResource<M, S>
where
    M: MemberEntity,
    S: ObjectStore<M::Parent> + 'static,
{
    fn type_name(&self) -> &'static str {
        M::TYPE_NAME
    }

    fn validate(&self, config: &MemberConfig) -> Result<(), ResourceError> {
        MemberResource::validate(self, config)
    }

    async fn create(&self, config: MemberConfig) -> Result<MemberHandle, ResourceError> {
        MemberResource::create(self, config).await
    }

    async fn read(&self, handle: MemberHandle) -> Result<MemberHandle, ResourceError> {
        MemberResource::read(self, handle).await
    }

    async fn update(
        &self,
        previous: &MemberHandle,
        config: MemberConfig,
    ) -> Result<MemberHandle, ResourceError> {
        MemberResource::update(self, previous, config).await
    }

    async fn delete(&self, handle: &MemberHandle) -> Result<(), ResourceError> {
        MemberResource::delete(self, handle).await
    }
}
