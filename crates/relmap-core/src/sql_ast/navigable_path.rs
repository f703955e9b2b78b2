//! Hierarchical paths through the domain model
//!
//! `Person.addresses.{element}.city`: each node knows its parent, so
//! ancestry checks walk the chain instead of comparing strings.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub const ELEMENT_TOKEN: &str = "{element}";
pub const INDEX_TOKEN: &str = "{index}";

#[derive(Clone)]
pub struct NavigablePath(Arc<PathNode>);

struct PathNode {
    parent: Option<NavigablePath>,
    local_name: String,
    alias: Option<String>,
    full_path: String,
}

impl NavigablePath {
    pub fn root(entity_name: impl Into<String>) -> Self {
        let local_name = entity_name.into();
        Self(Arc::new(PathNode {
            parent: None,
            full_path: local_name.clone(),
            local_name,
            alias: None,
        }))
    }

    pub fn append(&self, property: impl Into<String>) -> Self {
        self.child(property.into(), None)
    }

    pub fn append_with_alias(&self, property: impl Into<String>, alias: impl Into<String>) -> Self {
        self.child(property.into(), Some(alias.into()))
    }

    /// Path to the element side of a plural attribute
    pub fn append_element(&self) -> Self {
        self.append(ELEMENT_TOKEN)
    }

    /// Path to the index (key) side of a plural attribute
    pub fn append_index(&self) -> Self {
        self.append(INDEX_TOKEN)
    }

    fn child(&self, local_name: String, alias: Option<String>) -> Self {
        let full_path = match &alias {
            Some(alias) => format!("{}.{}({})", self.full_path(), local_name, alias),
            None => format!("{}.{}", self.full_path(), local_name),
        };
        Self(Arc::new(PathNode {
            parent: Some(self.clone()),
            local_name,
            alias,
            full_path,
        }))
    }

    pub fn parent(&self) -> Option<&NavigablePath> {
        self.0.parent.as_ref()
    }

    pub fn local_name(&self) -> &str {
        &self.0.local_name
    }

    pub fn alias(&self) -> Option<&str> {
        self.0.alias.as_deref()
    }

    pub fn full_path(&self) -> &str {
        &self.0.full_path
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Number of segments below the root
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Ancestors from the immediate parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = &NavigablePath> {
        std::iter::successors(self.parent(), |p| p.parent())
    }

    /// Whether `self` is a strict ancestor of `other`
    pub fn is_parent(&self, other: &NavigablePath) -> bool {
        other.ancestors().any(|ancestor| ancestor == self)
    }

    pub fn is_parent_or_equal(&self, other: &NavigablePath) -> bool {
        self == other || self.is_parent(other)
    }
}

impl PartialEq for NavigablePath {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.full_path() == other.full_path()
    }
}

impl Eq for NavigablePath {}

impl Hash for NavigablePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_path().hash(state);
    }
}

impl fmt::Debug for NavigablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NavigablePath({})", self.full_path())
    }
}

impl fmt::Display for NavigablePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_path_rendering() {
        let root = NavigablePath::root("Person");
        let element = root.append("addresses").append_element();
        assert_eq!(element.full_path(), "Person.addresses.{element}");
        assert_eq!(element.local_name(), ELEMENT_TOKEN);
        let aliased = root.append_with_alias("nicknames", "n");
        assert_eq!(aliased.full_path(), "Person.nicknames(n)");
        assert_eq!(aliased.alias(), Some("n"));
    }

    #[test]
    fn test_is_parent_is_strict() {
        let root = NavigablePath::root("Person");
        let addresses = root.append("addresses");
        assert!(root.is_parent(&addresses));
        assert!(!addresses.is_parent(&addresses));
        assert!(addresses.is_parent_or_equal(&addresses));
        assert!(!addresses.is_parent(&root));
    }

    #[test]
    fn test_string_prefix_is_not_ancestry() {
        let root = NavigablePath::root("Person");
        let name = root.append("name");
        let names = root.append("names");
        assert!(names.full_path().starts_with(name.full_path()));
        assert!(!name.is_parent(&names));
    }

    #[test]
    fn test_structural_equality() {
        let a = NavigablePath::root("Person").append("addresses");
        let b = NavigablePath::root("Person").append("addresses");
        assert_eq!(a, b);
        assert!(a.is_parent(&b.append_element()));
    }

    proptest! {
        #[test]
        fn prop_every_prefix_is_an_ancestor(
            segments in proptest::collection::vec("[a-z]{1,8}", 1..8)
        ) {
            let mut paths = vec![NavigablePath::root("Root")];
            for segment in &segments {
                let next = paths[paths.len() - 1].append(segment.clone());
                paths.push(next);
            }
            let leaf = &paths[paths.len() - 1];
            prop_assert_eq!(leaf.depth(), segments.len());
            for prefix in &paths[..paths.len() - 1] {
                prop_assert!(prefix.is_parent(leaf));
                prop_assert!(!leaf.is_parent(prefix));
            }
            prop_assert!(!leaf.is_parent(leaf));
        }
    }
}
