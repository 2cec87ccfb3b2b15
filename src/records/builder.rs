//! # RecordBuilder - Index Record Construction
//!
//! Builds the on-page record layout read by `RecordView`. Fields are
//! appended in index column order; each is in-page bytes, SQL NULL, or a
//! marker for an externally stored (off-page) value.
//!
//! The builder owns its field buffers, so it can outlive the values it
//! was fed; the encoded record is a plain `Vec<u8>`.

use eyre::{ensure, Result};

use crate::records::{info_bits, RecordView};

enum FieldValue {
    Data(Vec<u8>),
    Null,
    External,
}

#[derive(Default)]
pub struct RecordBuilder {
    fields: Vec<FieldValue>,
    min_rec: bool,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an in-page field value.
    pub fn push(&mut self, bytes: impl AsRef<[u8]>) -> &mut Self {
        self.fields.push(FieldValue::Data(bytes.as_ref().to_vec()));
        self
    }

    /// Appends a SQL NULL field.
    pub fn push_null(&mut self) -> &mut Self {
        self.fields.push(FieldValue::Null);
        self
    }

    /// Appends a field whose value lives off-page.
    pub fn push_external(&mut self) -> &mut Self {
        self.fields.push(FieldValue::External);
        self
    }

    /// Marks the record as the minimum-record sentinel.
    pub fn mark_min_rec(&mut self) -> &mut Self {
        self.min_rec = true;
        self
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Encodes the record.
    pub fn build(&self) -> Result<Vec<u8>> {
        let n = self.fields.len();
        ensure!(n > 0, "record must have at least one field");

        let header = RecordView::header_size(n);
        ensure!(
            header <= u16::MAX as usize,
            "record header too large: {} fields",
            n
        );

        let bitmap = n.div_ceil(8);
        let mut out = vec![0u8; header];
        out[0..2].copy_from_slice(&(header as u16).to_le_bytes());
        if self.min_rec {
            out[2] |= info_bits::MIN_REC;
        }

        let mut end: usize = 0;
        for (idx, field) in self.fields.iter().enumerate() {
            match field {
                FieldValue::Data(bytes) => {
                    end += bytes.len();
                    out.extend_from_slice(bytes);
                }
                FieldValue::Null => {
                    out[3 + idx / 8] |= 1 << (idx % 8);
                }
                FieldValue::External => {
                    out[3 + bitmap + idx / 8] |= 1 << (idx % 8);
                }
            }
            ensure!(
                end <= u16::MAX as usize,
                "record data exceeds offset range at field {}",
                idx
            );
            let at = 3 + 2 * bitmap + 2 * idx;
            out[at..at + 2].copy_from_slice(&(end as u16).to_le_bytes());
        }

        Ok(out)
    }
}
