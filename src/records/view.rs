//! # RecordView - Zero-Copy Index Record Access
//!
//! `RecordView` reads index records in their on-page layout with O(1)
//! field access. All field reads return slices into the underlying page
//! buffer; nothing is copied or allocated.
//!
//! ## Binary Layout
//!
//! ```text
//! +------------+------+--------------+----------------+--------------+---------+
//! | Header Len | Info | Null Bitmap  | Extern Bitmap  | Offset Table | Data    |
//! | (u16)      | (u8) | [(N+7)/8 B]  | [(N+7)/8 B]    | [u16; N]     | [u8...] |
//! +------------+------+--------------+----------------+--------------+---------+
//! ```
//!
//! | Component | Description |
//! |-----------|-------------|
//! | **Header Len** | Offset of the data payload (allows header growth) |
//! | **Info** | Record info bits (minimum-record sentinel marker) |
//! | **Null Bitmap** | 1 bit per field, `1` = SQL NULL |
//! | **Extern Bitmap** | 1 bit per field, `1` = stored off-page |
//! | **Offset Table** | Per-field *end* offset into the data payload |
//!
//! A field's bytes are `data[off[i-1]..off[i]]` (with `off[-1] = 0`), so
//! NULL and external fields simply repeat the previous end offset.
//!
//! ## Thread Safety
//!
//! `RecordView` borrows immutably from a byte slice; any number of views
//! may read the same page concurrently.

use eyre::{ensure, Result};

use crate::records::{info_bits, FieldRef, RecordAccess};

#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    data: &'a [u8],
    field_count: usize,
}

impl<'a> RecordView<'a> {
    /// Wraps an encoded record. `field_count` comes from the index
    /// metadata, not the record itself.
    pub fn new(data: &'a [u8], field_count: usize) -> Result<Self> {
        ensure!(!data.is_empty(), "record data cannot be empty");
        ensure!(field_count > 0, "record must have at least one field");

        let header = Self::header_size(field_count);
        ensure!(
            data.len() >= header,
            "record too small for {} fields: {} < {} header bytes",
            field_count,
            data.len(),
            header
        );

        let view = Self { data, field_count };
        let data_start = view.header_len() as usize;
        ensure!(
            data_start >= header && data_start <= data.len(),
            "header length {} out of bounds (header={}, record={})",
            data_start,
            header,
            data.len()
        );

        Ok(view)
    }

    /// Header bytes needed for a record of `field_count` fields.
    pub fn header_size(field_count: usize) -> usize {
        let bitmap = field_count.div_ceil(8);
        3 + 2 * bitmap + 2 * field_count
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    fn header_len(&self) -> u16 {
        u16::from_le_bytes([self.data[0], self.data[1]])
    }

    pub fn info(&self) -> u8 {
        self.data[2]
    }

    fn bitmap_size(&self) -> usize {
        self.field_count.div_ceil(8)
    }

    fn bitmap_bit(&self, bitmap_start: usize, idx: usize) -> bool {
        let byte = self.data[bitmap_start + idx / 8];
        byte & (1 << (idx % 8)) != 0
    }

    pub fn is_null(&self, idx: usize) -> bool {
        self.bitmap_bit(3, idx)
    }

    pub fn is_external(&self, idx: usize) -> bool {
        self.bitmap_bit(3 + self.bitmap_size(), idx)
    }

    /// End offset of field `idx` within the data payload.
    fn end_offset(&self, idx: usize) -> usize {
        let table_start = 3 + 2 * self.bitmap_size();
        let at = table_start + 2 * idx;
        u16::from_le_bytes([self.data[at], self.data[at + 1]]) as usize
    }

    fn field_bytes(&self, idx: usize) -> &'a [u8] {
        let start = if idx == 0 { 0 } else { self.end_offset(idx - 1) };
        let end = self.end_offset(idx);
        let base = self.header_len() as usize;
        &self.data[base + start..base + end]
    }
}

impl RecordAccess for RecordView<'_> {
    fn field_count(&self) -> usize {
        self.field_count
    }

    fn field(&self, idx: usize) -> FieldRef<'_> {
        debug_assert!(idx < self.field_count);
        if self.is_external(idx) {
            FieldRef::External
        } else if self.is_null(idx) {
            FieldRef::Null
        } else {
            FieldRef::Data(self.field_bytes(idx))
        }
    }

    fn is_min_rec(&self) -> bool {
        self.info() & info_bits::MIN_REC != 0
    }
}
