//! Table groups: the column sources of a query
//!
//! Lookups return `None` for "not here"; only the top of a delegation chain
//! decides whether that is an error (see [`require_table_reference`]).

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use super::navigable_path::NavigablePath;
use super::sql_alias::SqlAliasBase;
use super::table_reference::TableReference;
use crate::errors::{RelmapError, Result};

pub type TableGroupRef = Arc<dyn TableGroup>;

pub trait TableGroup: Send + Sync + fmt::Debug {
    fn navigable_path(&self) -> &NavigablePath;

    fn group_alias(&self) -> Option<&str>;

    fn primary_table_reference(&self) -> &Arc<TableReference>;

    /// Find the table reference for `table_expression`
    ///
    /// - `path`: the navigable path being rendered, if known
    /// - `allow_fk_optimization`: a foreign-key target may be served by the
    ///   table holding the key column instead of joining the target
    /// - `resolve`: materialize lazily-joined tables on demand
    fn get_table_reference(
        &self,
        path: Option<&NavigablePath>,
        table_expression: &str,
        allow_fk_optimization: bool,
        resolve: bool,
    ) -> Option<Arc<TableReference>>;
}

/// Like [`TableGroup::get_table_reference`], but a miss is an error
///
/// # Errors
///
/// `UnresolvedTableReference` when no group in the chain exposes the table.
pub fn require_table_reference(
    group: &dyn TableGroup,
    path: Option<&NavigablePath>,
    table_expression: &str,
    allow_fk_optimization: bool,
    resolve: bool,
) -> Result<Arc<TableReference>> {
    group
        .get_table_reference(path, table_expression, allow_fk_optimization, resolve)
        .ok_or_else(|| RelmapError::UnresolvedTableReference {
            table_expression: table_expression.to_string(),
            navigable_path: path.unwrap_or_else(|| group.navigable_path()).to_string(),
        })
}

#[derive(Debug, Clone)]
struct LazyTable {
    table_expression: String,
    optional: bool,
}

/// Table group for one entity or collection table plus its secondary tables
#[derive(Debug)]
pub struct StandardTableGroup {
    navigable_path: NavigablePath,
    alias_base: Arc<SqlAliasBase>,
    primary: Arc<TableReference>,
    secondary: Vec<Arc<TableReference>>,
    fk_targets: Vec<String>,
    lazy: Vec<LazyTable>,
    materialized: DashMap<String, Arc<TableReference>>,
}

impl StandardTableGroup {
    /// The primary table takes the alias base's first alias
    pub fn new(
        navigable_path: NavigablePath,
        primary_table: impl Into<String>,
        alias_base: Arc<SqlAliasBase>,
    ) -> Self {
        let primary = Arc::new(TableReference::new(
            primary_table,
            alias_base.generate_new_alias(),
            false,
        ));
        Self {
            navigable_path,
            alias_base,
            primary,
            secondary: Vec::new(),
            fk_targets: Vec::new(),
            lazy: Vec::new(),
            materialized: DashMap::new(),
        }
    }

    /// Eagerly joined secondary table
    pub fn with_secondary_table(mut self, table_expression: impl Into<String>, optional: bool) -> Self {
        let reference = TableReference::new(
            table_expression,
            self.alias_base.generate_new_alias(),
            optional,
        );
        self.secondary.push(Arc::new(reference));
        self
    }

    /// Table whose key is also held as a foreign key on the primary table
    pub fn with_fk_target(mut self, table_expression: impl Into<String>) -> Self {
        self.fk_targets.push(table_expression.into());
        self
    }

    /// Table joined only once something asks for it with `resolve`
    pub fn with_lazy_table(mut self, table_expression: impl Into<String>, optional: bool) -> Self {
        self.lazy.push(LazyTable {
            table_expression: table_expression.into(),
            optional,
        });
        self
    }

    /// Table references in FROM order: primary, secondary, then materialized lazy joins
    pub fn table_references(&self) -> Vec<Arc<TableReference>> {
        let mut references = vec![Arc::clone(&self.primary)];
        references.extend(self.secondary.iter().cloned());
        let mut lazy: Vec<_> = self
            .materialized
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        lazy.sort_by(|a, b| a.identification_variable().cmp(b.identification_variable()));
        references.extend(lazy);
        references
    }

    fn materialize(&self, table_expression: &str) -> Option<Arc<TableReference>> {
        let lazy = self
            .lazy
            .iter()
            .find(|t| t.table_expression == table_expression)?;
        let entry = self
            .materialized
            .entry(lazy.table_expression.clone())
            .or_insert_with(|| {
                Arc::new(TableReference::new(
                    lazy.table_expression.clone(),
                    self.alias_base.generate_new_alias(),
                    lazy.optional,
                ))
            });
        Some(Arc::clone(entry.value()))
    }
}

impl TableGroup for StandardTableGroup {
    fn navigable_path(&self) -> &NavigablePath {
        &self.navigable_path
    }

    fn group_alias(&self) -> Option<&str> {
        Some(self.alias_base.alias_stem())
    }

    fn primary_table_reference(&self) -> &Arc<TableReference> {
        &self.primary
    }

    fn get_table_reference(
        &self,
        _path: Option<&NavigablePath>,
        table_expression: &str,
        allow_fk_optimization: bool,
        resolve: bool,
    ) -> Option<Arc<TableReference>> {
        if self.primary.table_expression() == table_expression {
            return Some(Arc::clone(&self.primary));
        }
        if let Some(secondary) = self
            .secondary
            .iter()
            .find(|r| r.table_expression() == table_expression)
        {
            return Some(Arc::clone(secondary));
        }
        if allow_fk_optimization && self.fk_targets.iter().any(|t| t == table_expression) {
            return Some(Arc::clone(&self.primary));
        }
        if let Some(joined) = self.materialized.get(table_expression) {
            return Some(Arc::clone(joined.value()));
        }
        if resolve {
            return self.materialize(table_expression);
        }
        None
    }
}
