//! # Logical Search Key Tuples
//!
//! A `KeyTuple` is the in-memory side of a comparison: an ordered list of
//! typed, already-encoded field values built by the engine for an index
//! descent, insert, or duplicate check. Field values are borrowed views
//! into the caller's buffers; the tuple owns nothing.
//!
//! The tuple's compare-field count may be lower than its total field
//! count: a search on (a, b, c) may descend on (a, b) only. A tuple can
//! also carry the minimum-record marker, in which case it orders below
//! everything except a record carrying the same marker.

use smallvec::SmallVec;

use crate::types::ColumnType;

/// One typed field of a search key. `None` is SQL NULL.
#[derive(Debug, Clone, Copy)]
pub struct KeyField<'a> {
    col: ColumnType,
    value: Option<&'a [u8]>,
}

impl<'a> KeyField<'a> {
    pub fn new(col: ColumnType, value: Option<&'a [u8]>) -> Self {
        Self { col, value }
    }

    pub fn column(&self) -> &ColumnType {
        &self.col
    }

    pub fn value(&self) -> Option<&'a [u8]> {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

/// Ordered, typed search key. Index keys are short, so fields live
/// inline up to eight columns.
#[derive(Debug, Clone, Default)]
pub struct KeyTuple<'a> {
    fields: SmallVec<[KeyField<'a>; 8]>,
    n_cmp: Option<usize>,
    min_rec: bool,
}

impl<'a> KeyTuple<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field value.
    pub fn push(&mut self, col: ColumnType, value: Option<&'a [u8]>) -> &mut Self {
        self.fields.push(KeyField::new(col, value));
        self
    }

    /// Limits how many leading fields comparisons consider. Defaults to
    /// the full field count.
    pub fn set_compare_fields(&mut self, n_cmp: usize) -> &mut Self {
        debug_assert!(n_cmp <= self.fields.len());
        self.n_cmp = Some(n_cmp);
        self
    }

    /// Marks the tuple as the minimum-record sentinel.
    pub fn mark_min_rec(&mut self) -> &mut Self {
        self.min_rec = true;
        self
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of leading fields comparisons consider.
    pub fn compare_fields(&self) -> usize {
        self.n_cmp.unwrap_or(self.fields.len())
    }

    pub fn field(&self, idx: usize) -> &KeyField<'a> {
        &self.fields[idx]
    }

    pub fn fields(&self) -> &[KeyField<'a>] {
        &self.fields
    }

    pub fn is_min_rec(&self) -> bool {
        self.min_rec
    }
}
