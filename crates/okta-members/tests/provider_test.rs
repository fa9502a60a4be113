//! End-to-end resource lifecycles through the Provider, against a mock Okta
//! org that keeps object state between requests.

use member_framework::{MemberConfig, MemberHandle, ResourceError, StoreError};
use okta_members::client::OktaClient;
use okta_members::config::ProviderConfig;
use okta_members::lifecycle::Provider;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const POST_LOGOUT: &str = "okta_app_oauth_post_logout_redirect_uri";
const REDIRECT: &str = "okta_app_oauth_redirect_uri";
const AUDIENCE: &str = "okta_auth_server_audience";

// =============================================================================
// Stateful Responders
// =============================================================================

/// One remote object shared by the GET and PUT responders of its path.
#[derive(Clone)]
struct RemoteObject {
    state: Arc<Mutex<Option<Value>>>,
    delay: Duration,
}

impl RemoteObject {
    fn new(body: Value) -> Self {
        Self {
            state: Arc::new(Mutex::new(Some(body))),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn current(&self) -> Option<Value> {
        self.state.lock().unwrap().clone()
    }

    fn delete(&self) {
        *self.state.lock().unwrap() = None;
    }

    fn getter(&self) -> Getter {
        Getter(self.clone())
    }

    fn putter(&self) -> Putter {
        Putter(self.clone())
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "errorCode": "E0000007",
        "errorSummary": "Not found: Resource not found"
    }))
}

struct Getter(RemoteObject);

impl Respond for Getter {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        match self.0.current() {
            Some(body) => ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(self.0.delay),
            None => not_found(),
        }
    }
}

struct Putter(RemoteObject);

impl Respond for Putter {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.0.state.lock().unwrap();
        if state.is_none() {
            return not_found();
        }
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        *state = Some(body.clone());
        ResponseTemplate::new(200)
            .set_body_json(body)
            .set_delay(self.0.delay)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app(post_logout: &[&str]) -> Value {
    json!({
        "id": "0oa1",
        "name": "oidc_client",
        "label": "Portal",
        "signOnMode": "OPENID_CONNECT",
        "settings": {
            "oauthClient": {
                "application_type": "web",
                "redirect_uris": ["https://portal/cb"],
                "post_logout_redirect_uris": post_logout
            }
        }
    })
}

async fn mount(server: &MockServer, object_path: &str, object: &RemoteObject) {
    Mock::given(method("GET"))
        .and(path(object_path))
        .respond_with(object.getter())
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path(object_path))
        .respond_with(object.putter())
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> Provider {
    let client = Arc::new(OktaClient::for_endpoint(&server.uri(), "test-token").unwrap());
    Provider::with_client(client, Some(Duration::from_secs(10)))
}

async fn puts(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "PUT")
        .count()
}

fn post_logout_uris(object: &RemoteObject) -> Value {
    object.current().unwrap()["settings"]["oauthClient"]["post_logout_redirect_uris"].clone()
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_post_logout_redirect_uri_lifecycle() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(app(&["https://a/logout"]));
    mount(&server, "/api/v1/apps/0oa1", &object).await;

    let provider = provider(&server);
    let uris = provider.resource(POST_LOGOUT).unwrap();

    // 1. Add a second value
    let handle = uris
        .create(MemberConfig::new("0oa1", "https://b/logout"))
        .await
        .unwrap();
    assert_eq!(handle.id(), "https://b/logout");
    assert_eq!(
        post_logout_uris(&object),
        json!(["https://a/logout", "https://b/logout"])
    );

    // 2. Adding it again leaves the remote object untouched
    uris.create(MemberConfig::new("0oa1", "https://b/logout"))
        .await
        .unwrap();
    assert_eq!(puts(&server).await, 1);

    // 3. Remove the first value
    uris.delete(&MemberHandle::new("0oa1", "https://a/logout"))
        .await
        .unwrap();
    assert_eq!(post_logout_uris(&object), json!(["https://b/logout"]));
    assert_eq!(puts(&server).await, 2);

    // Fields the resource does not manage are preserved
    let current = object.current().unwrap();
    assert_eq!(current["signOnMode"], "OPENID_CONNECT");
    assert_eq!(current["settings"]["oauthClient"]["application_type"], "web");
    assert_eq!(
        current["settings"]["oauthClient"]["redirect_uris"],
        json!(["https://portal/cb"])
    );

    // 4. Delete after the application itself is gone
    object.delete();
    uris.delete(&MemberHandle::new("0oa1", "https://b/logout"))
        .await
        .unwrap();
    assert_eq!(puts(&server).await, 2);
}

#[tokio::test]
async fn test_create_on_missing_application_fails() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(app(&[]));
    object.delete();
    mount(&server, "/api/v1/apps/0oa1", &object).await;

    let provider = provider(&server);
    let result = provider
        .resource(POST_LOGOUT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "https://a/logout"))
        .await;
    match result {
        Err(ResourceError::ParentNotFound { kind, parent_id }) => {
            assert_eq!(kind, "application");
            assert_eq!(parent_id, "0oa1");
        }
        other => panic!("Expected ParentNotFound, got {:?}", other),
    }
    assert_eq!(puts(&server).await, 0);
}

#[tokio::test]
async fn test_rejected_write_surfaces_remote_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/apps/0oa1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(app(&[])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/apps/0oa1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errorCode": "E0000006",
            "errorSummary": "You do not have permission to perform the requested action"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider(&server);
    let result = provider
        .resource(POST_LOGOUT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "https://a/logout"))
        .await;
    match result {
        Err(ResourceError::Store(StoreError::Invalid(msg))) => {
            assert!(msg.contains("You do not have permission"))
        }
        other => panic!("Expected Invalid store error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_uri_rejected_without_request() {
    let server = MockServer::start().await;
    let provider = provider(&server);

    let result = provider
        .resource(POST_LOGOUT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "ftp://files/logout"))
        .await;
    assert!(matches!(result, Err(ResourceError::InvalidConfig(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_both_uri_lists_of_one_application() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(app(&[]));
    mount(&server, "/api/v1/apps/0oa1", &object).await;
    let provider = provider(&server);

    provider
        .resource(REDIRECT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "https://portal/cb2"))
        .await
        .unwrap();
    provider
        .resource(POST_LOGOUT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "https://portal/logout"))
        .await
        .unwrap();

    let current = object.current().unwrap();
    assert_eq!(
        current["settings"]["oauthClient"]["redirect_uris"],
        json!(["https://portal/cb", "https://portal/cb2"])
    );
    assert_eq!(
        current["settings"]["oauthClient"]["post_logout_redirect_uris"],
        json!(["https://portal/logout"])
    );
}

#[tokio::test]
async fn test_create_writes_only_the_managed_list() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(json!({
        "id": "0oa1",
        "label": null,
        "settings": {
            "app": {},
            "oauthClient": { "redirect_uris": null }
        }
    }));
    mount(&server, "/api/v1/apps/0oa1", &object).await;
    let provider = provider(&server);

    provider
        .resource(POST_LOGOUT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "https://portal/logout"))
        .await
        .unwrap();

    assert_eq!(
        object.current().unwrap(),
        json!({
            "id": "0oa1",
            "label": null,
            "settings": {
                "app": {},
                "oauthClient": {
                    "redirect_uris": null,
                    "post_logout_redirect_uris": ["https://portal/logout"]
                }
            }
        })
    );
}

#[tokio::test]
async fn test_auth_server_audience_lifecycle() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(json!({
        "id": "aus1",
        "name": "default",
        "description": "Default Authorization Server",
        "audiences": ["api://default"],
        "issuerMode": "ORG_URL"
    }));
    mount(&server, "/api/v1/authorizationServers/aus1", &object).await;

    let provider = provider(&server);
    let audiences = provider.resource(AUDIENCE).unwrap();

    let handle = audiences
        .create(MemberConfig::new("aus1", "api://orders"))
        .await
        .unwrap();
    assert_eq!(
        object.current().unwrap()["audiences"],
        json!(["api://default", "api://orders"])
    );

    audiences.delete(&handle).await.unwrap();
    let current = object.current().unwrap();
    assert_eq!(current["audiences"], json!(["api://default"]));
    assert_eq!(current["issuerMode"], "ORG_URL");
}

#[tokio::test]
async fn test_import_resolves_handle_without_request() {
    let server = MockServer::start().await;
    let provider = provider(&server);

    let handle = provider
        .resource(POST_LOGOUT)
        .unwrap()
        .import("0oa1/https://portal/logout?x=1")
        .unwrap();
    assert_eq!(handle, MemberHandle::new("0oa1", "https://portal/logout?x=1"));

    let invalid = provider.resource(AUDIENCE).unwrap().import("aus1");
    assert!(matches!(invalid, Err(ResourceError::InvalidImportId(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_on_one_application_lose_nothing() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(app(&[])).with_delay(Duration::from_millis(20));
    mount(&server, "/api/v1/apps/0oa1", &object).await;
    let provider = Arc::new(provider(&server));

    let mut handles = vec![];
    for i in 0..6 {
        let provider = provider.clone();
        handles.push(tokio::spawn(async move {
            // Alternate between the two resources sharing the parent
            let type_name = if i % 2 == 0 { POST_LOGOUT } else { REDIRECT };
            provider
                .resource(type_name)
                .unwrap()
                .create(MemberConfig::new("0oa1", format!("https://app{}.example/x", i)))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let current = object.current().unwrap();
    let oauth = &current["settings"]["oauthClient"];
    assert_eq!(oauth["post_logout_redirect_uris"].as_array().unwrap().len(), 3);
    // The seeded redirect URI plus three new ones
    assert_eq!(oauth["redirect_uris"].as_array().unwrap().len(), 4);
    assert_eq!(puts(&server).await, 6);
    // Both resources serialized on the same parent key
    assert_eq!(provider.locks().key_count().await, 1);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[tokio::test]
async fn test_provider_from_config_file() {
    let server = MockServer::start().await;
    let object = RemoteObject::new(app(&[]));
    mount(&server, "/api/v1/apps/0oa1", &object).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "endpoint = \"{}\"\napi_token = \"file-token\"\nlock_timeout_secs = 5",
        server.uri()
    )
    .unwrap();

    let config = ProviderConfig::from_file(file.path())
        .unwrap()
        .resolve()
        .unwrap();
    assert_eq!(config.lock_timeout, Some(Duration::from_secs(5)));
    let provider = Provider::new(config).unwrap();

    provider
        .resource(POST_LOGOUT)
        .unwrap()
        .create(MemberConfig::new("0oa1", "https://a/logout"))
        .await
        .unwrap();
    assert_eq!(post_logout_uris(&object), json!(["https://a/logout"]));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("authorization").unwrap().to_str().unwrap(),
        "SSWS file-token"
    );
}
