//! # RowanDB Record Comparison
//!
//! The key-ordering comparator for RowanDB's B-tree storage engine. Given
//! two encoded index keys (a logical search tuple against a physical
//! on-page record, or two physical records) it decides their relative
//! order field by field under per-column type semantics, and reports how
//! many leading fields matched so callers can resume multi-field
//! comparisons mid-key. Every index descent, insert-point search,
//! duplicate check, and page split in the engine goes through this crate;
//! its answers *are* the B-tree's total order.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rowandb_cmp::{CollationRegistry, KeyComparator, KeyTuple, RecordView};
//! use rowandb_cmp::encoding::encode_int8;
//! use rowandb_cmp::types::ColumnType;
//!
//! let collations = CollationRegistry::new();
//! let cmp = KeyComparator::new(&collations);
//!
//! let id = encode_int8(42);
//! let mut key = KeyTuple::new();
//! key.push(ColumnType::int(8), Some(&id));
//!
//! let rec = RecordView::new(page_bytes, 2)?;
//! let result = cmp.compare_tuple_to_record(&key, &rec, 1, 0)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │   B-tree search / insert / split (ext.)  │
//! ├──────────────────────────────────────────┤
//! │   cmp: tuple-vs-record, record-vs-record,│
//! │        uniqueness, scalar field compare  │
//! ├─────────────┬──────────────┬─────────────┤
//! │ types:      │ records:     │ collation:  │
//! │ column +    │ RecordAccess │ registry +  │
//! │ index meta  │ + RecordView │ built-ins   │
//! ├─────────────┴──────────────┴─────────────┤
//! │   encoding: order-preserving field bytes │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Design Goals
//!
//! 1. **Zero-copy**: field values are borrowed views into tuple buffers
//!    or page memory; the comparator allocates nothing
//! 2. **One contract**: bitwise, numeric, and collated semantics all
//!    normalize to `std::cmp::Ordering`
//! 3. **Never a wrong order**: dictionary and page inconsistencies fail
//!    loudly instead of returning an arbitrary result
//! 4. **Resumable**: multi-field comparisons report their matched-field
//!    count so binary-search probes skip re-proven prefixes
//!
//! ## Module Overview
//!
//! - [`cmp`]: the comparator itself
//! - [`types`]: column main types, precise-type flags, index descriptors
//! - [`records`]: the physical record boundary (`RecordAccess`,
//!   `RecordView`, `RecordBuilder`)
//! - [`tuple`]: logical search keys
//! - [`collation`]: injected collation capability and registry
//! - [`encoding`]: order-preserving field encodings

pub mod cmp;
pub mod collation;
pub mod encoding;
pub mod records;
pub mod tuple;
pub mod types;

pub use cmp::{Comparison, DuplicateSink, KeyComparator};
pub use collation::{Collation, CollationRegistry};
pub use records::{FieldRef, RecordAccess, RecordBuilder, RecordView};
pub use tuple::{KeyField, KeyTuple};
pub use types::{ColumnType, IndexColumn, IndexDef, MainType, TypeFlags};
