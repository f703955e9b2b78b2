//! Correlation identifiers
//!
//! A `BootstrapId` tags everything done while one `TypeConfiguration` is
//! being built, so log lines from parallel persistence units can be told
//! apart. A `CompilationId` does the same for a single query compilation pass.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one type-configuration bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BootstrapId(String);

impl BootstrapId {
    /// Generate a new BootstrapId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BootstrapId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BootstrapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one query compilation pass
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompilationId(String);

impl CompilationId {
    /// Generate a new CompilationId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CompilationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompilationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_id_generation() {
        let id1 = BootstrapId::new();
        let id2 = BootstrapId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_bootstrap_id_display() {
        let id = BootstrapId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_compilation_id_generation() {
        let id1 = CompilationId::new();
        let id2 = CompilationId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_serialization() {
        let id = BootstrapId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: BootstrapId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
