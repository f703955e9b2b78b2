//! SQL AST pieces needed to resolve column references in correlated subqueries

pub mod correlated;
pub mod join;
pub mod navigable_path;
pub mod predicate;
pub mod query_spec;
pub mod sql_alias;
pub mod table_group;
pub mod table_reference;

pub use correlated::{
    CorrelatedPluralTableGroup, CorrelatedTableGroup, PluralTableGroup, TableGroupSlot,
};
pub use join::{JoinType, TableGroupJoin};
pub use navigable_path::NavigablePath;
pub use predicate::{ColumnReference, Predicate};
pub use query_spec::QuerySpec;
pub use sql_alias::{SqlAliasBase, SqlAliasBaseManager};
pub use table_group::{require_table_reference, StandardTableGroup, TableGroup, TableGroupRef};
pub use table_reference::TableReference;
