//! Remote object models.
//!
//! Only the fields the resources touch are typed. Everything else is kept in
//! flattened `extra` maps so that a whole-object `PUT` sends back exactly what
//! was fetched, plus the one list change.
//!
//! Typed fields are [`MaybeNull`]: a field that was absent stays absent and a
//! field that was `null` is sent back as `null`. Only the field a resource
//! mutates is ever filled in.

pub mod application;
pub mod auth_server;

pub use application::*;
pub use auth_server::*;

use serde::{Deserialize, Deserializer};

/// `None` when absent, `Some(None)` when `null`, `Some(Some(_))` when set.
pub type MaybeNull<T> = Option<Option<T>>;

/// Deserializes a present field into `Some`, so `null` is told apart from absent.
/// Pair with `#[serde(default)]`.
fn present<'de, D, T>(deserializer: D) -> Result<MaybeNull<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn get<T>(field: &MaybeNull<T>) -> Option<&T> {
    field.as_ref().and_then(Option::as_ref)
}

fn get_or_default<T: Default>(field: &mut MaybeNull<T>) -> &mut T {
    field.get_or_insert_with(|| Some(T::default())).get_or_insert_with(T::default)
}
