//! # Collation Capability
//!
//! Character columns are ordered by a collation: an opaque comparison of
//! two byte strings that is insensitive to trailing pad bytes. The
//! comparator never interprets character data itself; it resolves the
//! column's collation id against a `CollationRegistry` and delegates.
//!
//! ## Contract
//!
//! `Collation::compare` returns a signed value whose *sign* carries the
//! order; the magnitude carries no meaning. The comparator normalizes the
//! result, so implementations are free to return byte differences.
//! Implementations must treat a shorter operand as if right-padded with
//! the collation's pad byte (trailing-space-insensitive semantics).
//!
//! ## Registry
//!
//! The registry is an injected capability: the engine builds one at
//! startup, registers its collations, and hands a reference to every
//! comparator. A collation id that cannot be resolved is a dictionary
//! consistency violation, surfaced as a fatal error by the comparator
//! rather than an arbitrary order.
//!
//! ## Built-ins
//!
//! Two collations are always registered: the binary collation (plain
//! unsigned byte order, no padding) and the default collation (unsigned
//! byte order with trailing-space trimming), which is also the single
//! fallback used for system character columns.

use hashbrown::HashMap;

use crate::types::PAD_SPACE;

/// Well-known collation ids.
pub mod collation_ids {
    /// Default collation: unsigned byte order, trailing-space-insensitive.
    pub const DEFAULT: u16 = 8;
    /// Binary collation: plain unsigned byte order, no pad semantics.
    pub const BINARY: u16 = 63;
}

/// Trailing-pad-insensitive comparison of two encoded byte strings.
pub trait Collation: Send + Sync {
    fn name(&self) -> &str;

    /// Compares `a` and `b`; only the sign of the result is meaningful.
    fn compare(&self, a: &[u8], b: &[u8]) -> i32;
}

/// Plain unsigned byte order. The shorter operand sorts first on a tie.
#[derive(Debug, Default)]
pub struct BinaryCollation;

impl Collation for BinaryCollation {
    fn name(&self) -> &str {
        "binary"
    }

    fn compare(&self, a: &[u8], b: &[u8]) -> i32 {
        let shared = a.len().min(b.len());
        for i in 0..shared {
            if a[i] != b[i] {
                return a[i] as i32 - b[i] as i32;
            }
        }
        a.len() as i32 - b.len() as i32
    }
}

/// Unsigned byte order with the shorter operand conceptually right-padded
/// with 0x20. This is the built-in fallback for system character columns
/// and the default collation id.
#[derive(Debug, Default)]
pub struct PaddedBinaryCollation;

impl Collation for PaddedBinaryCollation {
    fn name(&self) -> &str {
        "padded_binary"
    }

    fn compare(&self, a: &[u8], b: &[u8]) -> i32 {
        let shared = a.len().min(b.len());
        for i in 0..shared {
            if a[i] != b[i] {
                return a[i] as i32 - b[i] as i32;
            }
        }

        // Tail of the longer operand against the pad byte. `sign` flips
        // the result when b is the longer side.
        let (tail, sign) = if a.len() > b.len() {
            (&a[shared..], 1)
        } else {
            (&b[shared..], -1)
        };
        for &byte in tail {
            if byte != PAD_SPACE {
                return if byte > PAD_SPACE { sign } else { -sign };
            }
        }
        0
    }
}

/// Maps collation ids to comparison routines.
pub struct CollationRegistry {
    collations: HashMap<u16, Box<dyn Collation>>,
}

impl CollationRegistry {
    /// Creates a registry with the two built-in collations registered.
    pub fn new() -> Self {
        let mut registry = Self {
            collations: HashMap::new(),
        };
        registry.register(collation_ids::BINARY, Box::new(BinaryCollation));
        registry.register(collation_ids::DEFAULT, Box::new(PaddedBinaryCollation));
        registry
    }

    /// Registers (or replaces) the collation for an id.
    pub fn register(&mut self, id: u16, collation: Box<dyn Collation>) {
        self.collations.insert(id, collation);
    }

    pub fn lookup(&self, id: u16) -> Option<&dyn Collation> {
        self.collations.get(&id).map(|c| c.as_ref())
    }
}

impl Default for CollationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
