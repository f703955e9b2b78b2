use std::fmt;

/// One table (or derived table) in a FROM clause, with its alias
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    table_expression: String,
    identification_variable: String,
    /// Reached through an outer join, so it may produce no row
    optional: bool,
}

impl TableReference {
    pub fn new(
        table_expression: impl Into<String>,
        identification_variable: impl Into<String>,
        optional: bool,
    ) -> Self {
        Self {
            table_expression: table_expression.into(),
            identification_variable: identification_variable.into(),
            optional,
        }
    }

    pub fn table_expression(&self) -> &str {
        &self.table_expression
    }

    pub fn identification_variable(&self) -> &str {
        &self.identification_variable
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.table_expression, self.identification_variable)
    }
}
