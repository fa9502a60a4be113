//! URI lists of an OIDC application's `settings.oauthClient`.

use super::validate_url;
use crate::model::Application;
use member_framework::MemberEntity;

/// `okta_app_oauth_post_logout_redirect_uri`
pub struct PostLogoutRedirectUri;

impl MemberEntity for PostLogoutRedirectUri {
    type Parent = Application;
    const TYPE_NAME: &'static str = "okta_app_oauth_post_logout_redirect_uri";
    const PARENT_KIND: &'static str = "application";

    fn members(parent: &Application) -> &[String] {
        parent.post_logout_redirect_uris()
    }

    fn members_mut(parent: &mut Application) -> &mut Vec<String> {
        parent.post_logout_redirect_uris_mut()
    }

    fn validate_value(value: &str) -> Result<(), String> {
        validate_url(value)
    }
}

/// `okta_app_oauth_redirect_uri`
pub struct RedirectUri;

impl MemberEntity for RedirectUri {
    type Parent = Application;
    const TYPE_NAME: &'static str = "okta_app_oauth_redirect_uri";
    const PARENT_KIND: &'static str = "application";

    fn members(parent: &Application) -> &[String] {
        parent.redirect_uris()
    }

    fn members_mut(parent: &mut Application) -> &mut Vec<String> {
        parent.redirect_uris_mut()
    }

    fn validate_value(value: &str) -> Result<(), String> {
        validate_url(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use member_framework::mutator::{append, Change};

    #[test]
    fn test_fields_are_independent() {
        let mut app = Application::default();
        app.redirect_uris_mut().push("https://a/cb".to_string());

        let (app, change) = append::<PostLogoutRedirectUri>(app, "https://a/cb");
        assert_eq!(change, Change::Applied);
        assert_eq!(app.redirect_uris(), ["https://a/cb"]);
        assert_eq!(app.post_logout_redirect_uris(), ["https://a/cb"]);

        let (_, change) = append::<RedirectUri>(app, "https://a/cb");
        assert_eq!(change, Change::AlreadyPresent);
    }
}
