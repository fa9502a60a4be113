//! # MemberEntity Trait
//!
//! A `MemberEntity` describes one kind of sub-resource: a single string element
//! living inside a list-valued field of some remote parent object. An OIDC
//! application's post-logout redirect URIs, its redirect URIs and an
//! authorization server's audiences are all member entities over their
//! respective parents.
//!
//! Implementors are usually zero-sized marker types. All the behaviour the
//! generic [`MemberResource`](crate::MemberResource) needs is expressed through
//! the associated `Parent` type and two field accessors, so the guarded
//! fetch-mutate-write logic is written once and reused for every field.

use std::fmt::Debug;

/// Contract for a list field that the framework mutates one element at a time.
pub trait MemberEntity: Send + Sync + 'static {
    /// The remote object that owns the list field.
    type Parent: Clone + Send + Sync + Debug + 'static;

    /// Host-facing resource type name, e.g. `okta_app_oauth_redirect_uri`.
    const TYPE_NAME: &'static str;

    /// Human name of the parent used in messages, e.g. `application`.
    const PARENT_KIND: &'static str;

    /// Read access to the list field.
    fn members(parent: &Self::Parent) -> &[String];

    /// Write access to the list field.
    fn members_mut(parent: &mut Self::Parent) -> &mut Vec<String>;

    /// Checks a configured element value before any remote call is made.
    ///
    /// The default accepts any non-empty string.
    fn validate_value(value: &str) -> Result<(), String> {
        if value.is_empty() {
            Err("value must not be empty".to_string())
        } else {
            Ok(())
        }
    }
}
