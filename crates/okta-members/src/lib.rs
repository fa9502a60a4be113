//! # Okta Member Resources
//!
//! Provider resources that each own one element of a list field on an Okta
//! object, built on [`member_framework`]:
//!
//! - **[model]**: The remote objects ([`Application`](model::Application),
//!   [`AuthorizationServer`](model::AuthorizationServer)), with unknown fields preserved.
//! - **[client]**: The management API client.
//! - **[store]**: The client as the fetcher and writer behind every resource.
//! - **[resources]**: The member entities, one per list field.
//! - **[config]**: Provider settings from TOML and the environment.
//! - **[lifecycle]**: The [`Provider`](lifecycle::Provider) that wires everything together.

pub mod client;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod resources;
pub mod store;
