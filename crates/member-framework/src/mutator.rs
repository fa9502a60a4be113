//! # Collection Mutator
//!
//! Pure set-like edits of a parent's list field. No I/O happens here; the
//! adapter decides whether to write based on the returned [`Change`].
//!
//! The list is treated as a set layered on a list: an element is appended at
//! the end only when absent, and removed only when present. Order is insertion
//! order as observed, never sorted.

use crate::entity::MemberEntity;

/// Outcome of a mutation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The list was modified and the parent needs writing.
    Applied,
    /// Append was requested but the value was already a member.
    AlreadyPresent,
    /// Remove was requested but the value was not a member.
    AlreadyAbsent,
}

impl Change {
    pub fn is_applied(self) -> bool {
        matches!(self, Change::Applied)
    }
}

/// Returns true when `value` is currently a member of the parent's list.
pub fn contains<M: MemberEntity>(parent: &M::Parent, value: &str) -> bool {
    M::members(parent).iter().any(|member| member == value)
}

/// Appends `value` unless it is already present.
pub fn append<M: MemberEntity>(mut parent: M::Parent, value: &str) -> (M::Parent, Change) {
    if contains::<M>(&parent, value) {
        return (parent, Change::AlreadyPresent);
    }
    M::members_mut(&mut parent).push(value.to_string());
    (parent, Change::Applied)
}

/// Removes the first occurrence of `value` if present.
pub fn remove<M: MemberEntity>(mut parent: M::Parent, value: &str) -> (M::Parent, Change) {
    let members = M::members_mut(&mut parent);
    match members.iter().position(|member| member == value) {
        Some(index) => {
            members.remove(index);
            (parent, Change::Applied)
        }
        None => (parent, Change::AlreadyAbsent),
    }
}
