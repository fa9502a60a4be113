use super::{get, get_or_default, present, MaybeNull};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A custom authorization server (`/api/v1/authorizationServers/{id}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorizationServer {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub audiences: MaybeNull<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthorizationServer {
    pub fn audiences(&self) -> &[String] {
        get(&self.audiences)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn audiences_mut(&mut self) -> &mut Vec<String> {
        get_or_default(&mut self.audiences)
    }
}
