//! # Provider Wiring
//!
//! [`Provider`] is the single place where the member resources are built and
//! connected to their shared dependencies:
//!
//! 1. **One client** - every resource talks to the same [`OktaClient`]
//! 2. **One guard** - every resource shares the same [`KeyedMutex`], so two
//!    resources that mutate the same parent (both URI lists of one application)
//!    also exclude each other
//! 3. **Registry** - resources are looked up by their type name
//!
//! ```ignore
//! let provider = Provider::new(ProviderConfig::load(None)?)?;
//! let uris = provider.resource("okta_app_oauth_post_logout_redirect_uri").unwrap();
//! uris.create(MemberConfig::new("0oa1", "https://example.com/logout")).await?;
//! ```

use crate::client::{ClientError, OktaClient};
use crate::config::ResolvedConfig;
use crate::resources::{AuthServerAudience, PostLogoutRedirectUri, RedirectUri};
use member_framework::{KeyedMutex, ManagedResource, MemberResource};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Provider {
    client: Arc<OktaClient>,
    locks: Arc<KeyedMutex>,
    resources: BTreeMap<&'static str, Box<dyn ManagedResource>>,
}

impl Provider {
    /// Builds the client from `config` and registers every resource.
    pub fn new(config: ResolvedConfig) -> Result<Self, ClientError> {
        let client = Arc::new(OktaClient::new(&config)?);
        Ok(Self::with_client(client, config.lock_timeout))
    }

    pub fn with_client(client: Arc<OktaClient>, lock_timeout: Option<Duration>) -> Self {
        let locks = Arc::new(KeyedMutex::new());
        let mut provider = Self {
            client,
            locks,
            resources: BTreeMap::new(),
        };

        provider.register(
            MemberResource::<PostLogoutRedirectUri, _>::new(
                provider.client.clone(),
                provider.locks.clone(),
            )
            .with_lock_timeout(lock_timeout),
        );
        provider.register(
            MemberResource::<RedirectUri, _>::new(provider.client.clone(), provider.locks.clone())
                .with_lock_timeout(lock_timeout),
        );
        provider.register(
            MemberResource::<AuthServerAudience, _>::new(
                provider.client.clone(),
                provider.locks.clone(),
            )
            .with_lock_timeout(lock_timeout),
        );

        info!(
            endpoint = %provider.client.base_url(),
            resources = provider.resources.len(),
            "Provider ready"
        );
        provider
    }

    fn register<R: ManagedResource + 'static>(&mut self, resource: R) {
        self.resources.insert(resource.type_name(), Box::new(resource));
    }

    /// Looks up a resource by type name.
    pub fn resource(&self, type_name: &str) -> Option<&dyn ManagedResource> {
        self.resources.get(type_name).map(|resource| resource.as_ref())
    }

    /// Registered type names, sorted.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn client(&self) -> &OktaClient {
        &self.client
    }

    pub fn locks(&self) -> &Arc<KeyedMutex> {
        &self.locks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::TYPE_NAMES;

    #[test]
    fn test_every_resource_is_registered() {
        let client = Arc::new(OktaClient::for_endpoint("http://127.0.0.1:1", "t").unwrap());
        let provider = Provider::with_client(client, None);

        let mut expected = TYPE_NAMES.to_vec();
        expected.sort();
        assert_eq!(provider.resource_types().collect::<Vec<_>>(), expected);
        assert!(provider.resource("okta_app_oauth_post_logout_redirect_uri").is_some());
        assert!(provider.resource("okta_user").is_none());
        assert_eq!(provider.client().base_url().as_str(), "http://127.0.0.1:1/");
    }
}
