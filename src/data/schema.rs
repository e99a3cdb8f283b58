//! Named schema for the credit training dataset.
//!
//! The source file has no header, so column identity is purely positional.
//! Keeping the names and kinds in one table lets the loader check every row
//! against it and report mismatches by column name.

/// What a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Opaque code such as `A11`; kept verbatim.
    Categorical,
    /// Number, or one of the missing-value markers.
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn cat(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Categorical,
    }
}

const fn num(name: &'static str) -> Column {
    Column {
        name,
        kind: ColumnKind::Numeric,
    }
}

/// Column layout of the German credit dataset (20 attributes + label).
pub const CREDIT_COLUMNS: [Column; 21] = [
    cat("checking_status"),
    num("duration"),
    cat("credit_history"),
    cat("purpose"),
    num("credit_amount"),
    cat("savings_status"),
    cat("employment"),
    num("installment_rate"),
    cat("personal_status"),
    cat("other_parties"),
    num("residence_since"),
    cat("property_magnitude"),
    num("age"),
    cat("other_payment_plans"),
    cat("housing"),
    num("existing_credits"),
    cat("job"),
    num("num_dependents"),
    cat("own_telephone"),
    cat("foreign_worker"),
    num("risk"),
];

/// Features fed to the classifier, in artifact order.
pub const FEATURE_COLUMNS: [&str; 3] = ["age", "credit_amount", "duration"];

/// Label column name.
pub const LABEL_COLUMN: &str = "risk";

/// A positional schema with named, typed columns.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    columns: &'static [Column],
}

impl Schema {
    pub const fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }

    pub fn credit() -> Self {
        Self::new(&CREDIT_COLUMNS)
    }

    /// Number of columns every row must carry.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, idx: usize) -> Option<&'static Column> {
        self.columns.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_schema_has_twenty_attributes_and_label() {
        let schema = Schema::credit();
        assert_eq!(schema.width(), 21);
        assert_eq!(schema.index_of(LABEL_COLUMN), Some(20));
        assert_eq!(schema.index_of("duration"), Some(1));
        assert_eq!(schema.index_of("credit_amount"), Some(4));
        assert_eq!(schema.index_of("age"), Some(12));
    }

    #[test]
    fn feature_and_label_columns_are_numeric() {
        let schema = Schema::credit();
        for name in FEATURE_COLUMNS.iter().chain(std::iter::once(&LABEL_COLUMN)) {
            let idx = schema.index_of(name).unwrap();
            assert_eq!(schema.column(idx).unwrap().kind, ColumnKind::Numeric, "{name}");
        }
    }
}
