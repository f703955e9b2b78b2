//! Correlated table groups
//!
//! A subquery that references a row of the outer query exposes the outer
//! table group through a `CorrelatedTableGroup`. For plural attributes the
//! `CorrelatedPluralTableGroup` also carries the collection's index and
//! element groups.

use std::fmt;
use std::sync::Arc;

use tracing::error;

use super::join::{JoinType, TableGroupJoin};
use super::navigable_path::NavigablePath;
use super::query_spec::QuerySpec;
use super::sql_alias::SqlAliasBase;
use super::table_group::{TableGroup, TableGroupRef};
use super::table_reference::TableReference;
use crate::errors::{RelmapError, Result};

/// Which side of a plural attribute a table group represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableGroupSlot {
    Index,
    Element,
}

impl fmt::Display for TableGroupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableGroupSlot::Index => f.write_str("index"),
            TableGroupSlot::Element => f.write_str("element"),
        }
    }
}

/// The outer query's table group as seen from inside a subquery
#[derive(Debug)]
pub struct CorrelatedTableGroup {
    correlated: TableGroupRef,
    alias_base: Arc<SqlAliasBase>,
    joins: Vec<TableGroupJoin>,
}

impl CorrelatedTableGroup {
    pub fn new(correlated: TableGroupRef, alias_base: Arc<SqlAliasBase>) -> Self {
        Self {
            correlated,
            alias_base,
            joins: Vec::new(),
        }
    }

    pub fn correlated_table_group(&self) -> &TableGroupRef {
        &self.correlated
    }

    pub fn alias_base(&self) -> &Arc<SqlAliasBase> {
        &self.alias_base
    }

    pub fn table_group_joins(&self) -> &[TableGroupJoin] {
        &self.joins
    }

    /// Join a group into the subquery
    ///
    /// The joined group becomes a FROM root of `query_spec` and the join
    /// predicate moves into its WHERE clause.
    ///
    /// # Errors
    ///
    /// `UnsupportedCorrelatedJoin` for anything but an inner join.
    pub fn add_table_group_join(&mut self, join: TableGroupJoin, query_spec: &mut QuerySpec) -> Result<()> {
        if join.join_type() != JoinType::Inner {
            return Err(RelmapError::UnsupportedCorrelatedJoin {
                navigable_path: join.navigable_path().to_string(),
                join_type: join.join_type().to_string(),
            });
        }
        query_spec.add_root(Arc::clone(join.joined_group()));
        if let Some(predicate) = join.predicate() {
            query_spec.apply_predicate(predicate.clone());
        }
        self.joins.push(join);
        Ok(())
    }
}

impl TableGroup for CorrelatedTableGroup {
    fn navigable_path(&self) -> &NavigablePath {
        self.correlated.navigable_path()
    }

    fn group_alias(&self) -> Option<&str> {
        self.correlated.group_alias()
    }

    fn primary_table_reference(&self) -> &Arc<TableReference> {
        self.correlated.primary_table_reference()
    }

    /// The outer group first, then each joined group in join order
    fn get_table_reference(
        &self,
        path: Option<&NavigablePath>,
        table_expression: &str,
        allow_fk_optimization: bool,
        resolve: bool,
    ) -> Option<Arc<TableReference>> {
        self.correlated
            .get_table_reference(path, table_expression, allow_fk_optimization, resolve)
            .or_else(|| {
                self.joins.iter().find_map(|join| {
                    join.joined_group().get_table_reference(
                        path,
                        table_expression,
                        allow_fk_optimization,
                        resolve,
                    )
                })
            })
    }
}

/// Table group exposing a plural attribute's index and element sides
pub trait PluralTableGroup: TableGroup {
    fn index_table_group(&self) -> Option<&TableGroupRef>;

    fn element_table_group(&self) -> Option<&TableGroupRef>;
}

#[derive(Debug)]
pub struct CorrelatedPluralTableGroup {
    base: CorrelatedTableGroup,
    index_group: Option<TableGroupRef>,
    element_group: Option<TableGroupRef>,
}

impl CorrelatedPluralTableGroup {
    pub fn new(correlated: TableGroupRef, alias_base: Arc<SqlAliasBase>) -> Self {
        Self {
            base: CorrelatedTableGroup::new(correlated, alias_base),
            index_group: None,
            element_group: None,
        }
    }

    pub fn base(&self) -> &CorrelatedTableGroup {
        &self.base
    }

    /// # Errors
    ///
    /// `UnsupportedCorrelatedJoin` for anything but an inner join.
    pub fn add_table_group_join(&mut self, join: TableGroupJoin, query_spec: &mut QuerySpec) -> Result<()> {
        self.base.add_table_group_join(join, query_spec)
    }

    /// Record the index side; allowed once per instance
    ///
    /// # Errors
    ///
    /// `TableGroupAlreadyRegistered` if an index group is already set; the
    /// existing group is kept.
    pub fn register_index_table_group(&mut self, join: &TableGroupJoin) -> Result<()> {
        register_slot(
            &mut self.index_group,
            TableGroupSlot::Index,
            self.base.navigable_path(),
            join,
        )
    }

    /// Record the element side; allowed once per instance
    ///
    /// # Errors
    ///
    /// `TableGroupAlreadyRegistered` if an element group is already set; the
    /// existing group is kept.
    pub fn register_element_table_group(&mut self, join: &TableGroupJoin) -> Result<()> {
        register_slot(
            &mut self.element_group,
            TableGroupSlot::Element,
            self.base.navigable_path(),
            join,
        )
    }
}

fn register_slot(
    slot: &mut Option<TableGroupRef>,
    kind: TableGroupSlot,
    owner: &NavigablePath,
    join: &TableGroupJoin,
) -> Result<()> {
    if let Some(existing) = slot {
        error!(
            slot = %kind,
            navigable_path = %owner,
            existing = %existing.navigable_path(),
            rejected = %join.joined_group().navigable_path(),
            "table group already registered"
        );
        return Err(RelmapError::TableGroupAlreadyRegistered {
            slot: kind,
            navigable_path: owner.to_string(),
            existing_path: existing.navigable_path().to_string(),
        });
    }
    *slot = Some(Arc::clone(join.joined_group()));
    Ok(())
}

/// A registered side answers when no path is given or its path is a
/// strict ancestor of the requested one.
fn covers(group: &TableGroupRef, path: Option<&NavigablePath>) -> bool {
    path.map_or(true, |path| group.navigable_path().is_parent(path))
}

impl TableGroup for CorrelatedPluralTableGroup {
    fn navigable_path(&self) -> &NavigablePath {
        self.base.navigable_path()
    }

    fn group_alias(&self) -> Option<&str> {
        self.base.group_alias()
    }

    fn primary_table_reference(&self) -> &Arc<TableReference> {
        self.base.primary_table_reference()
    }

    /// Base correlated group, then the index side, then the element side
    fn get_table_reference(
        &self,
        path: Option<&NavigablePath>,
        table_expression: &str,
        allow_fk_optimization: bool,
        resolve: bool,
    ) -> Option<Arc<TableReference>> {
        if let Some(found) =
            self.base
                .get_table_reference(path, table_expression, allow_fk_optimization, resolve)
        {
            return Some(found);
        }
        [&self.index_group, &self.element_group]
            .into_iter()
            .flatten()
            .filter(|group| covers(group, path))
            .find_map(|group| {
                group.get_table_reference(path, table_expression, allow_fk_optimization, resolve)
            })
    }
}

impl PluralTableGroup for CorrelatedPluralTableGroup {
    fn index_table_group(&self) -> Option<&TableGroupRef> {
        self.index_group.as_ref()
    }

    fn element_table_group(&self) -> Option<&TableGroupRef> {
        self.element_group.as_ref()
    }
}
