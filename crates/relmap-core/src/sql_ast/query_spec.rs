use std::sync::Arc;

use relmap_core_types::CompilationId;

use super::predicate::Predicate;
use super::table_group::TableGroupRef;

/// One query block: FROM-clause roots and the WHERE predicate
#[derive(Debug, Default)]
pub struct QuerySpec {
    compilation_id: CompilationId,
    roots: Vec<TableGroupRef>,
    predicate: Option<Predicate>,
}

impl QuerySpec {
    pub fn new(compilation_id: CompilationId) -> Self {
        Self {
            compilation_id,
            roots: Vec::new(),
            predicate: None,
        }
    }

    pub fn compilation_id(&self) -> &CompilationId {
        &self.compilation_id
    }

    pub fn add_root(&mut self, group: TableGroupRef) {
        if !self.roots.iter().any(|root| Arc::ptr_eq(root, &group)) {
            self.roots.push(group);
        }
    }

    pub fn roots(&self) -> &[TableGroupRef] {
        &self.roots
    }

    /// AND `predicate` onto the current WHERE predicate
    pub fn apply_predicate(&mut self, predicate: Predicate) {
        self.predicate = Some(Predicate::combine(self.predicate.take(), predicate));
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }
}
