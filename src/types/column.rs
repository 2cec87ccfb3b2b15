//! # Column Main Types and Precise-Type Flags
//!
//! This module provides the column type metadata the comparator dispatches on.
//! A column is described by a coarse `MainType`, a set of `TypeFlags` layered
//! on top of it, and a fixed byte length (0 for variable-length columns).
//!
//! ## Comparison Strategy per Main Type
//!
//! | Main type | Strategy |
//! |-----------|----------|
//! | FixedBinary, Binary, Int, Sys, ChildPtr | memcmp + pad rule |
//! | Blob (BINARY_TYPE flag set) | memcmp + pad rule |
//! | Decimal | ASCII digit-string comparison |
//! | Float, Double | decode IEEE-754, numeric comparison |
//! | Char, Varchar | built-in fallback collation |
//! | Text, VarText, Blob (no BINARY_TYPE) | registry collation dispatch |
//! | Geometry | always equal (ordered elsewhere) |
//!
//! ## Flag Layout
//!
//! `TypeFlags` packs boolean flags and the collation id into one `u32`:
//!
//! ```text
//! bit  0        UNSIGNED     integer stored without sign-bit flip
//! bit  1        NOT_NULL     column rejects SQL NULL
//! bit  2        BINARY_TYPE  string column compares as raw bytes
//! bits 16..32   collation id for string columns
//! ```
//!
//! ## Integer Comparability
//!
//! Signed and unsigned integers use different storage encodings (signed
//! values have the sign bit flipped so memcmp order matches numeric order,
//! see `encoding::field`), so an integer column is only comparable with
//! another integer column of the same signedness and declared length.

use std::fmt;
use std::ops::BitOr;

use crate::collation::collation_ids;

/// Pad byte for trailing-space-insensitive character comparison.
pub const PAD_SPACE: u8 = 0x20;

/// Coarse column type governing which comparison strategy applies.
///
/// Uses `#[repr(u8)]` for single-byte storage in dictionary records.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainType {
    /// Fixed-length binary, padded with `PAD_SPACE` unless the collation
    /// is binary.
    FixedBinary = 1,
    /// Variable-length binary.
    Binary = 2,
    /// Integer, stored big-endian and memcmp-comparable.
    Int = 3,
    /// System columns (row id, transaction metadata). Binary-comparable.
    Sys = 4,
    /// Child page pointer in non-leaf index nodes. Binary-comparable.
    ChildPtr = 5,
    /// Decimal stored as an ASCII digit string left-padded to its
    /// declared precision.
    Decimal = 6,
    /// 32-bit IEEE-754 float.
    Float = 7,
    /// 64-bit IEEE-754 double.
    Double = 8,
    /// Fixed-length character data compared under the built-in fallback
    /// collation. Used for internal system strings only.
    Char = 9,
    /// Variable-length character data under the fallback collation.
    Varchar = 10,
    /// Fixed-length character data whose collation id selects a registry
    /// collation.
    Text = 11,
    /// Variable-length character data under a registry collation.
    VarText = 12,
    /// Large object. Binary-comparable when BINARY_TYPE is set, collated
    /// otherwise.
    Blob = 13,
    /// Spatial data. Carries no byte-order meaning; always compares equal.
    Geometry = 14,
}

impl TryFrom<u8> for MainType {
    type Error = eyre::Report;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MainType::FixedBinary),
            2 => Ok(MainType::Binary),
            3 => Ok(MainType::Int),
            4 => Ok(MainType::Sys),
            5 => Ok(MainType::ChildPtr),
            6 => Ok(MainType::Decimal),
            7 => Ok(MainType::Float),
            8 => Ok(MainType::Double),
            9 => Ok(MainType::Char),
            10 => Ok(MainType::Varchar),
            11 => Ok(MainType::Text),
            12 => Ok(MainType::VarText),
            13 => Ok(MainType::Blob),
            14 => Ok(MainType::Geometry),
            _ => eyre::bail!("invalid MainType discriminant: {}", value),
        }
    }
}

/// Precise-type flags layered on a `MainType`, plus the collation id for
/// string columns.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeFlags(u32);

impl TypeFlags {
    /// Integer stored without the sign-bit flip.
    pub const UNSIGNED: TypeFlags = TypeFlags(1 << 0);
    /// Column rejects SQL NULL.
    pub const NOT_NULL: TypeFlags = TypeFlags(1 << 1);
    /// String column that compares as raw bytes.
    pub const BINARY_TYPE: TypeFlags = TypeFlags(1 << 2);

    const COLLATION_SHIFT: u32 = 16;

    pub const fn empty() -> Self {
        TypeFlags(0)
    }

    pub const fn contains(self, other: TypeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns these flags with the collation id set.
    pub const fn with_collation(self, id: u16) -> Self {
        TypeFlags((self.0 & 0xFFFF) | ((id as u32) << Self::COLLATION_SHIFT))
    }

    /// Extracts the collation id encoded in the upper flag bits.
    pub const fn collation_id(self) -> u16 {
        (self.0 >> Self::COLLATION_SHIFT) as u16
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for TypeFlags {
    type Output = TypeFlags;

    fn bitor(self, rhs: TypeFlags) -> TypeFlags {
        TypeFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for TypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeFlags({:#x})", self.0)
    }
}

/// Immutable column descriptor: main type, precise-type flags, and the
/// fixed byte length (0 for variable-length columns).
///
/// Owned by the schema dictionary; the comparator only ever borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnType {
    main: MainType,
    flags: TypeFlags,
    fixed_len: u16,
}

impl ColumnType {
    pub const fn new(main: MainType, flags: TypeFlags, fixed_len: u16) -> Self {
        Self {
            main,
            flags,
            fixed_len,
        }
    }

    /// Signed integer column of the given storage width.
    pub const fn int(len: u16) -> Self {
        Self::new(MainType::Int, TypeFlags::empty(), len)
    }

    /// Unsigned integer column of the given storage width.
    pub const fn uint(len: u16) -> Self {
        Self::new(MainType::Int, TypeFlags::UNSIGNED, len)
    }

    /// Variable-length binary column.
    pub const fn binary() -> Self {
        Self::new(MainType::Binary, TypeFlags::empty(), 0)
    }

    /// Collated variable-length text column.
    pub const fn var_text(collation: u16) -> Self {
        Self::new(
            MainType::VarText,
            TypeFlags::empty().with_collation(collation),
            0,
        )
    }

    pub fn main(&self) -> MainType {
        self.main
    }

    pub fn flags(&self) -> TypeFlags {
        self.flags
    }

    pub fn fixed_len(&self) -> u16 {
        self.fixed_len
    }

    pub fn is_nullable(&self) -> bool {
        !self.flags.contains(TypeFlags::NOT_NULL)
    }
}

/// Returns true for every string-shaped main type, binary or collated.
pub fn is_string_type(main: MainType) -> bool {
    matches!(
        main,
        MainType::FixedBinary
            | MainType::Binary
            | MainType::Char
            | MainType::Varchar
            | MainType::Text
            | MainType::VarText
            | MainType::Blob
    )
}

/// Returns true if the column holds byte strings compared without any
/// collating transformation.
pub fn is_binary_string_type(main: MainType, flags: TypeFlags) -> bool {
    match main {
        MainType::FixedBinary | MainType::Binary => true,
        MainType::Blob => flags.contains(TypeFlags::BINARY_TYPE),
        _ => false,
    }
}

/// Returns true if the column holds character strings compared under a
/// collation.
pub fn is_non_binary_string_type(main: MainType, flags: TypeFlags) -> bool {
    is_string_type(main) && !is_binary_string_type(main, flags)
}

/// Returns the pad byte used to right-extend the shorter operand of a
/// comparison, or None if the type is not pad-extendable.
pub fn pad_char(main: MainType, flags: TypeFlags) -> Option<u8> {
    match main {
        MainType::FixedBinary | MainType::Binary => {
            if flags.collation_id() == collation_ids::BINARY {
                None
            } else {
                Some(PAD_SPACE)
            }
        }
        MainType::Char | MainType::Varchar | MainType::Text | MainType::VarText => Some(PAD_SPACE),
        MainType::Blob if !flags.contains(TypeFlags::BINARY_TYPE) => Some(PAD_SPACE),
        _ => None,
    }
}

/// Decides whether two columns produce a meaningful order when compared
/// against each other.
///
/// Two non-binary string columns are comparable when their collation ids
/// match (or the check is waived). Two binary string columns are always
/// comparable. Otherwise the main types must be identical, integers must
/// agree on signedness, and fixed-length integers on declared length.
pub fn columns_are_comparable(a: &ColumnType, b: &ColumnType, check_collations: bool) -> bool {
    if is_non_binary_string_type(a.main(), a.flags())
        && is_non_binary_string_type(b.main(), b.flags())
    {
        if check_collations {
            return a.flags().collation_id() == b.flags().collation_id();
        }
        return true;
    }

    if is_binary_string_type(a.main(), a.flags()) && is_binary_string_type(b.main(), b.flags()) {
        return true;
    }

    if a.main() != b.main() {
        return false;
    }

    if a.main() == MainType::Int
        && a.flags().contains(TypeFlags::UNSIGNED) != b.flags().contains(TypeFlags::UNSIGNED)
    {
        return false;
    }

    a.main() != MainType::Int || a.fixed_len() == b.fixed_len()
}
