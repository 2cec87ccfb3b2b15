//! # Index Descriptor
//!
//! An `IndexDef` is the ordered list of key columns the comparator walks
//! when ordering records, plus the uniqueness prefix: the count of leading
//! columns that must be jointly unique (barring NULLs) for the index to
//! enforce a unique-key constraint.
//!
//! Generic internal indexes (change-buffer style trees that carry
//! untyped payloads) set the `untyped` flag; the comparator then treats
//! every field as raw binary instead of consulting column metadata.
//!
//! The descriptor is owned by the schema dictionary and read-only to the
//! comparator.

use crate::types::ColumnType;

/// One key column of an index: the column name (for diagnostics) and its
/// type descriptor.
#[derive(Debug, Clone)]
pub struct IndexColumn {
    name: String,
    col: ColumnType,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>, col: ColumnType) -> Self {
        Self {
            name: name.into(),
            col,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> &ColumnType {
        &self.col
    }
}

/// Ordered key column list plus uniqueness metadata for one B-tree index.
#[derive(Debug, Clone)]
pub struct IndexDef {
    name: String,
    columns: Vec<IndexColumn>,
    unique_prefix: usize,
    enforce_unique: bool,
    untyped: bool,
}

impl IndexDef {
    /// Creates an index over the given columns whose first
    /// `unique_prefix` columns form the uniqueness prefix.
    pub fn new(name: impl Into<String>, columns: Vec<IndexColumn>, unique_prefix: usize) -> Self {
        debug_assert!(unique_prefix <= columns.len());
        Self {
            name: name.into(),
            columns,
            unique_prefix,
            enforce_unique: false,
            untyped: false,
        }
    }

    /// Marks this index as enforcing its unique-key constraint.
    pub fn enforcing_unique(mut self) -> Self {
        self.enforce_unique = true;
        self
    }

    /// Creates a generic internal index whose fields all compare as raw
    /// binary, without column metadata.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            unique_prefix: 0,
            enforce_unique: false,
            untyped: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, idx: usize) -> Option<&IndexColumn> {
        self.columns.get(idx)
    }

    pub fn unique_prefix(&self) -> usize {
        self.unique_prefix
    }

    pub fn is_unique(&self) -> bool {
        self.enforce_unique
    }

    pub fn is_untyped(&self) -> bool {
        self.untyped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MainType;
    use crate::types::TypeFlags;

    #[test]
    fn index_def_exposes_columns_in_order() {
        let index = IndexDef::new(
            "idx_users_name",
            vec![
                IndexColumn::new("id", ColumnType::int(8)),
                IndexColumn::new("name", ColumnType::var_text(8)),
            ],
            1,
        );

        assert_eq!(index.field_count(), 2);
        assert_eq!(index.unique_prefix(), 1);
        assert_eq!(index.column(0).unwrap().name(), "id");
        assert_eq!(
            index.column(1).unwrap().column().main(),
            MainType::VarText
        );
        assert!(index.column(2).is_none());
        assert!(!index.is_unique());
    }

    #[test]
    fn enforcing_unique_sets_the_flag() {
        let index = IndexDef::new(
            "pk",
            vec![IndexColumn::new(
                "id",
                ColumnType::new(MainType::Int, TypeFlags::NOT_NULL, 8),
            )],
            1,
        )
        .enforcing_unique();

        assert!(index.is_unique());
    }

    #[test]
    fn untyped_index_has_no_columns() {
        let index = IndexDef::untyped("change_buffer");
        assert!(index.is_untyped());
        assert_eq!(index.field_count(), 0);
        assert_eq!(index.unique_prefix(), 0);
    }
}
