//! # Column and Index Type Metadata
//!
//! Type descriptors consumed by the comparator: coarse main types, the
//! precise-type flag word (signedness, NULL-ability, binary-vs-collated
//! strings, collation id), per-column descriptors, and index definitions.
//!
//! - `column`: `MainType`, `TypeFlags`, `ColumnType`, classifier predicates
//! - `index`: `IndexColumn`, `IndexDef`

pub mod column;
pub mod index;

pub use column::{
    columns_are_comparable, is_binary_string_type, is_non_binary_string_type, is_string_type,
    pad_char, ColumnType, MainType, TypeFlags, PAD_SPACE,
};
pub use index::{IndexColumn, IndexDef};
