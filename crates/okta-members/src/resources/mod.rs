//! # Member Resources
//!
//! The concrete sub-resources. Each one is a marker type implementing
//! [`MemberEntity`](member_framework::MemberEntity) for one list field:
//!
//! | type name | parent | field |
//! |-----------|--------|-------|
//! | `okta_app_oauth_post_logout_redirect_uri` | [`Application`](crate::model::Application) | `settings.oauthClient.post_logout_redirect_uris` |
//! | `okta_app_oauth_redirect_uri` | [`Application`](crate::model::Application) | `settings.oauthClient.redirect_uris` |
//! | `okta_auth_server_audience` | [`AuthorizationServer`](crate::model::AuthorizationServer) | `audiences` |

pub mod app_oauth;
pub mod auth_server;

pub use app_oauth::*;
pub use auth_server::*;

use member_framework::MemberEntity;
use url::Url;

const VALID_URL_SCHEMES: &[&str] = &["http", "https"];

/// Every registered resource type name.
pub const TYPE_NAMES: &[&str] = &[
    PostLogoutRedirectUri::TYPE_NAME,
    RedirectUri::TYPE_NAME,
    AuthServerAudience::TYPE_NAME,
];

/// Accepts absolute URLs with an http or https scheme.
pub fn validate_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("{value:?} is not a valid URL: {e}"))?;
    if VALID_URL_SCHEMES.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(format!(
            "{value:?} must use one of the schemes {}",
            VALID_URL_SCHEMES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/logout").is_ok());
        assert!(validate_url("http://localhost:8080/callback").is_ok());
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("/relative/logout").is_err());
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_type_names_are_unique() {
        let mut names = TYPE_NAMES.to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TYPE_NAMES.len());
    }
}
