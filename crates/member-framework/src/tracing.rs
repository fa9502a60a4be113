//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for a provider process.
//!
//! ## What Gets Traced
//!
//! - **Guard**: lock acquisition and release per parent id (`debug`)
//! - **Operations**: one span per create/update/delete carrying `kind`,
//!   `parent_id` and `value`
//! - **Benign no-ops**: value already present, already absent, parent gone
//!   on delete (`info`)
//! - **Remote calls**: method and path of each request (`debug`)
//! - **Failures**: fetch and write errors with the remote message (`warn`)
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info okta-members create okta_app_oauth_redirect_uri --parent-id 0oa1 --value https://a/cb
//! RUST_LOG=debug okta-members ...   # lock and request lines too
//! ```
//!
//! With `RUST_LOG=info` a repeated create shows up as:
//!
//! ```text
//! INFO create{kind="okta_app_oauth_redirect_uri" parent_id=0oa1 value=https://a/cb}: application 0oa1 already has https://a/cb
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once per process; later calls are ignored.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
