//! [`OktaClient`] as the fetcher and writer behind every member resource.
//!
//! There is one implementation per parent type, so a single shared client
//! backs both the application-level and the authorization-server-level
//! resources.

use crate::client::OktaClient;
use crate::model::{Application, AuthorizationServer};
use async_trait::async_trait;
use member_framework::{ObjectFetcher, ObjectWriter, StoreError};

#[async_trait]
impl ObjectFetcher<Application> for OktaClient {
    async fn fetch(&self, id: &str) -> Result<Application, StoreError> {
        Ok(self.get_application(id).await?)
    }
}

#[async_trait]
impl ObjectWriter<Application> for OktaClient {
    async fn write(&self, id: &str, parent: &Application) -> Result<(), StoreError> {
        self.update_application(id, parent).await?;
        Ok(())
    }
}

#[async_trait]
impl ObjectFetcher<AuthorizationServer> for OktaClient {
    async fn fetch(&self, id: &str) -> Result<AuthorizationServer, StoreError> {
        Ok(self.get_authorization_server(id).await?)
    }
}

#[async_trait]
impl ObjectWriter<AuthorizationServer> for OktaClient {
    async fn write(&self, id: &str, parent: &AuthorizationServer) -> Result<(), StoreError> {
        self.update_authorization_server(id, parent).await?;
        Ok(())
    }
}
