//! SQL alias generation
//!
//! Each table group gets an alias base (`p1`) from the manager; every table
//! reference inside the group then takes the next alias from that base
//! (`p1_0`, `p1_1`, ...).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

#[derive(Debug)]
pub struct SqlAliasBase {
    stem: String,
    next: AtomicUsize,
}

impl SqlAliasBase {
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            next: AtomicUsize::new(0),
        }
    }

    pub fn alias_stem(&self) -> &str {
        &self.stem
    }

    pub fn generate_new_alias(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}", self.stem, n)
    }
}

/// Hands out alias bases with unique stems for one statement
#[derive(Debug, Default)]
pub struct SqlAliasBaseManager {
    counters: DashMap<char, usize>,
}

impl SqlAliasBaseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stem is the hint's first letter, lowercased, plus a per-letter counter
    pub fn create_sql_alias_base(&self, stem_hint: &str) -> Arc<SqlAliasBase> {
        let acronym = stem_hint
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .unwrap_or('t');
        let n = {
            let mut counter = self.counters.entry(acronym).or_insert(0);
            *counter += 1;
            *counter
        };
        Arc::new(SqlAliasBase::new(format!("{}{}", acronym, n)))
    }
}
