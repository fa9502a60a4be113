use crate::model::AuthorizationServer;
use member_framework::MemberEntity;

/// `okta_auth_server_audience`: one entry of an authorization server's
/// `audiences`. Audiences are opaque strings such as `api://default`.
pub struct AuthServerAudience;

impl MemberEntity for AuthServerAudience {
    type Parent = AuthorizationServer;
    const TYPE_NAME: &'static str = "okta_auth_server_audience";
    const PARENT_KIND: &'static str = "authorization server";

    fn members(parent: &AuthorizationServer) -> &[String] {
        parent.audiences()
    }

    fn members_mut(parent: &mut AuthorizationServer) -> &mut Vec<String> {
        parent.audiences_mut()
    }
}
