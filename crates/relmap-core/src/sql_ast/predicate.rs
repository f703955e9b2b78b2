use std::fmt;

/// `qualifier.column`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnReference {
    pub qualifier: String,
    pub column: String,
}

impl ColumnReference {
    pub fn new(qualifier: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for ColumnReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.qualifier, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    ColumnEquality(ColumnReference, ColumnReference),
    Conjunction(Vec<Predicate>),
}

impl Predicate {
    pub fn equal(lhs: ColumnReference, rhs: ColumnReference) -> Self {
        Predicate::ColumnEquality(lhs, rhs)
    }

    /// AND `other` onto `existing`, flattening nested conjunctions
    pub fn combine(existing: Option<Predicate>, other: Predicate) -> Predicate {
        let mut parts = match existing {
            None => return other,
            Some(Predicate::Conjunction(parts)) => parts,
            Some(single) => vec![single],
        };
        match other {
            Predicate::Conjunction(more) => parts.extend(more),
            single => parts.push(single),
        }
        Predicate::Conjunction(parts)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::ColumnEquality(lhs, rhs) => write!(f, "{} = {}", lhs, rhs),
            Predicate::Conjunction(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" and ")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}
