//! Typed permission membership.

use std::collections::BTreeSet;

use storefront_entity::permission::{Permission, PermissionName};

/// The set of permission names a role grants.
///
/// Membership is exact and case-sensitive; there are no wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<PermissionName>);

impl PermissionSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is granted.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Number of granted permissions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PermissionName> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = PermissionName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = &'a Permission>>(iter: I) -> Self {
        iter.into_iter().map(|p| p.name.clone()).collect()
    }
}
