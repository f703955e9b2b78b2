use std::fmt;

use super::navigable_path::NavigablePath;
use super::predicate::Predicate;
use super::table_group::TableGroupRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            JoinType::Inner => "inner",
            JoinType::Left => "left",
            JoinType::Right => "right",
            JoinType::Full => "full",
            JoinType::Cross => "cross",
        };
        f.write_str(keyword)
    }
}

/// A table group joined onto another, with its join condition
#[derive(Debug, Clone)]
pub struct TableGroupJoin {
    navigable_path: NavigablePath,
    join_type: JoinType,
    joined_group: TableGroupRef,
    predicate: Option<Predicate>,
}

impl TableGroupJoin {
    pub fn new(
        navigable_path: NavigablePath,
        join_type: JoinType,
        joined_group: TableGroupRef,
        predicate: Option<Predicate>,
    ) -> Self {
        Self {
            navigable_path,
            join_type,
            joined_group,
            predicate,
        }
    }

    /// Inner join whose path is the joined group's own path
    pub fn inner(joined_group: TableGroupRef, predicate: Option<Predicate>) -> Self {
        let navigable_path = joined_group.navigable_path().clone();
        Self::new(navigable_path, JoinType::Inner, joined_group, predicate)
    }

    pub fn navigable_path(&self) -> &NavigablePath {
        &self.navigable_path
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn joined_group(&self) -> &TableGroupRef {
        &self.joined_group
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }
}
