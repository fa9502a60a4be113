use super::{get, get_or_default, present, MaybeNull};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An OIDC application (`/api/v1/apps/{id}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Application {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub settings: MaybeNull<ApplicationSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationSettings {
    #[serde(
        rename = "oauthClient",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub oauth_client: MaybeNull<OAuthClientSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `settings.oauthClient`. The API spells these members in snake case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OAuthClientSettings {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub redirect_uris: MaybeNull<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_logout_redirect_uris: MaybeNull<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Application {
    pub fn oauth_client(&self) -> Option<&OAuthClientSettings> {
        get(&self.settings).and_then(|settings| get(&settings.oauth_client))
    }

    /// Fills in `settings.oauthClient` if it is absent or `null`.
    pub fn oauth_client_mut(&mut self) -> &mut OAuthClientSettings {
        get_or_default(&mut get_or_default(&mut self.settings).oauth_client)
    }

    pub fn redirect_uris(&self) -> &[String] {
        self.oauth_client()
            .and_then(|client| get(&client.redirect_uris))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn redirect_uris_mut(&mut self) -> &mut Vec<String> {
        get_or_default(&mut self.oauth_client_mut().redirect_uris)
    }

    pub fn post_logout_redirect_uris(&self) -> &[String] {
        self.oauth_client()
            .and_then(|client| get(&client.post_logout_redirect_uris))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn post_logout_redirect_uris_mut(&mut self) -> &mut Vec<String> {
        get_or_default(&mut self.oauth_client_mut().post_logout_redirect_uris)
    }
}
