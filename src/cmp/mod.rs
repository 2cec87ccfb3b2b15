//! # Record Comparison Services
//!
//! The key-ordering comparator behind every index descent, insert-point
//! search, duplicate check, and page split. It compares a logical search
//! tuple against a physical record, or two physical records, field by
//! field under per-column type semantics, and reports how many leading
//! fields matched so callers can resume multi-field comparisons without
//! rescanning.
//!
//! ## Ordering Rules
//!
//! Let F be the first compared field where the operands disagree:
//!
//! 1. If some byte position within F disagrees (possibly after collating
//!    transformation), that position decides the order.
//! 2. If no byte disagrees but the lengths differ, a pad-extendable type
//!    right-pads the shorter operand with its pad byte and continues;
//!    otherwise the longer operand is greater.
//! 3. SQL NULL orders below every non-NULL value.
//! 4. A minimum-record sentinel orders below everything that does not
//!    carry the marker itself.
//!
//! When the operands agree on every compared field, the result is Equal;
//! differing total field counts alone never decide an order.
//!
//! ## Results
//!
//! Multi-field comparisons return a [`Comparison`]: the ordering plus the
//! matched-field count, replacing the in/out counter a caller would
//! otherwise have to thread through resumed binary-search probes.
//!
//! ## Failure Model
//!
//! Well-typed data always compares to a defined ordering. The error paths
//! are protocol violations (an unresolvable collation id, an externally
//! stored field on a path that guarantees none, a uniqueness scan that
//! exhausts every column) and indicate a corrupted dictionary or page.
//! They are logged and returned as errors; callers must abort the B-tree
//! operation rather than use an arbitrary order. NaN in a float or double
//! column degrades to Equal instead of failing: NaN is not expected in
//! indexed storage, but must not crash the engine if it appears.
//!
//! ## Concurrency
//!
//! The comparator is pure: no shared mutable state, no allocation, no
//! blocking. Concurrent use from any number of threads is safe as long as
//! every caller upholds the page protection its record borrows require.

use std::cmp::Ordering;

use eyre::{bail, ensure, Result};

use crate::collation::{Collation, CollationRegistry, PaddedBinaryCollation};
use crate::records::{FieldRef, RecordAccess};
use crate::tuple::KeyTuple;
use crate::types::{pad_char, IndexDef, MainType, TypeFlags};


/// Fallback collation for internal system character columns that bypass
/// registry dispatch.
static FALLBACK_COLLATION: PaddedBinaryCollation = PaddedBinaryCollation;

/// Result of a multi-field comparison: the order, and the number of
/// leading fields proven equal before it was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    pub ordering: Ordering,
    pub matched_fields: usize,
}

impl Comparison {
    fn resolved(ordering: Ordering, matched_fields: usize) -> Self {
        Self {
            ordering,
            matched_fields,
        }
    }
}

/// Receives duplicate-key notifications from uniqueness comparisons.
///
/// The comparator only decides *that* a duplicate exists; the sink owns
/// surfacing it (typically by materializing the offending row for an
/// error message).
pub trait DuplicateSink {
    fn duplicate(&mut self, rec: &dyn RecordAccess, index: &IndexDef);
}

/// The comparator, bound to the engine's collation registry.
///
/// Stateless apart from the borrowed registry; construction is free, so
/// callers may build one per comparison or share one across threads.
#[derive(Clone, Copy)]
pub struct KeyComparator<'a> {
    collations: &'a CollationRegistry,
}

impl<'a> KeyComparator<'a> {
    pub fn new(collations: &'a CollationRegistry) -> Self {
        Self { collations }
    }

    /// Compares two encoded field values of a known column type.
    /// `None` is SQL NULL, which orders below every non-NULL value.
    pub fn compare_fields(
        &self,
        main: MainType,
        flags: TypeFlags,
        a: Option<&[u8]>,
        b: Option<&[u8]>,
    ) -> Result<Ordering> {
        let (a, b) = match (a, b) {
            (None, None) => return Ok(Ordering::Equal),
            (None, Some(_)) => return Ok(Ordering::Less),
            (Some(_), None) => return Ok(Ordering::Greater),
            (Some(a), Some(b)) => (a, b),
        };

        if !uses_binary_comparison(main, flags) {
            return self.compare_whole_fields(main, flags, a, b);
        }

        let shared = a.len().min(b.len());
        match a[..shared].cmp(&b[..shared]) {
            Ordering::Equal => {}
            diff => return Ok(diff),
        }
        if a.len() == b.len() {
            return Ok(Ordering::Equal);
        }

        let Some(pad) = pad_char(main, flags) else {
            // Not pad-extendable: the longer operand is greater.
            return Ok(a.len().cmp(&b.len()));
        };

        // Right-pad the shorter operand: walk the longer one's tail
        // against the pad byte.
        let (tail, a_is_longer) = if a.len() > b.len() {
            (&a[shared..], true)
        } else {
            (&b[shared..], false)
        };
        for &byte in tail {
            if byte != pad {
                let tail_order = if byte > pad {
                    Ordering::Greater
                } else {
                    Ordering::Less
                };
                return Ok(if a_is_longer {
                    tail_order
                } else {
                    tail_order.reverse()
                });
            }
        }
        Ok(Ordering::Equal)
    }

    /// Type-specific total order for types that cannot use plain byte
    /// comparison. Both operands are non-NULL.
    fn compare_whole_fields(
        &self,
        main: MainType,
        flags: TypeFlags,
        a: &[u8],
        b: &[u8],
    ) -> Result<Ordering> {
        match main {
            MainType::Decimal => Ok(compare_decimal_text(a, b)),
            MainType::Double => {
                let x = crate::encoding::decode_double(a);
                let y = crate::encoding::decode_double(b);
                // NaN degrades to Equal rather than failing.
                Ok(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
            }
            MainType::Float => {
                let x = crate::encoding::decode_float(a);
                let y = crate::encoding::decode_float(b);
                Ok(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
            }
            MainType::Char | MainType::Varchar => {
                Ok(normalize(FALLBACK_COLLATION.compare(a, b)))
            }
            MainType::Text | MainType::VarText => self.collate(flags, a, b),
            MainType::Blob => {
                if flags.contains(TypeFlags::BINARY_TYPE) {
                    // Binary blobs take the memcmp path in compare_fields;
                    // reaching here means a misrouted dispatch upstream.
                    log::error!("comparing a binary blob using a collation");
                    debug_assert!(false, "binary blob reached the whole-field path");
                    return Ok(Ordering::Equal);
                }
                self.collate(flags, a, b)
            }
            MainType::Geometry => Ok(Ordering::Equal),
            MainType::FixedBinary
            | MainType::Binary
            | MainType::Int
            | MainType::Sys
            | MainType::ChildPtr => {
                log::error!("main type {:?} reached the whole-field path", main);
                bail!("main type {:?} reached the whole-field path", main);
            }
        }
    }

    /// Registry collation dispatch. An unresolvable id is a dictionary
    /// consistency violation.
    fn collate(&self, flags: TypeFlags, a: &[u8], b: &[u8]) -> Result<Ordering> {
        let id = flags.collation_id();
        let Some(collation) = self.collations.lookup(id) else {
            log::error!("unable to resolve collation {}", id);
            bail!("unable to resolve collation {}", id);
        };
        Ok(normalize(collation.compare(a, b)))
    }

    /// Compares a search tuple to a physical record over the first
    /// `n_cmp` fields, resuming after `matched_fields` already-equal
    /// leading fields.
    ///
    /// Returns the order of the tuple relative to the record, and the
    /// field index at which the comparison resolved (`n_cmp` on a full
    /// match). An externally stored record field on this path is fatal:
    /// search descents only compare key columns, which are guaranteed
    /// in-page.
    pub fn compare_tuple_to_record<R: RecordAccess>(
        &self,
        tuple: &KeyTuple<'_>,
        rec: &R,
        n_cmp: usize,
        matched_fields: usize,
    ) -> Result<Comparison> {
        ensure!(n_cmp > 0, "tuple comparison needs at least one field");
        ensure!(
            n_cmp <= tuple.field_count(),
            "cannot compare {} fields of a {}-field tuple",
            n_cmp,
            tuple.field_count()
        );
        ensure!(
            matched_fields <= n_cmp && matched_fields <= rec.field_count(),
            "matched-field count {} out of range (n_cmp={}, record fields={})",
            matched_fields,
            n_cmp,
            rec.field_count()
        );

        let mut cur = matched_fields;

        if cur == 0 {
            if rec.is_min_rec() {
                let ordering = if tuple.is_min_rec() {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                };
                return Ok(Comparison::resolved(ordering, cur));
            }
            if tuple.is_min_rec() {
                return Ok(Comparison::resolved(Ordering::Less, cur));
            }
        }

        while cur < n_cmp {
            let field = tuple.field(cur);
            let rec_value = record_field(rec, cur, "a key search")?;
            let ordering = self.compare_fields(
                field.column().main(),
                field.column().flags(),
                field.value(),
                rec_value,
            )?;
            if ordering != Ordering::Equal {
                return Ok(Comparison::resolved(ordering, cur));
            }
            cur += 1;
        }

        // Ran out of fields: the tuple equals the record on every
        // compared field.
        Ok(Comparison::resolved(Ordering::Equal, cur))
    }

    /// Compares a search tuple to a record over the tuple's declared
    /// compare-field count.
    pub fn compare_tuple<R: RecordAccess>(
        &self,
        tuple: &KeyTuple<'_>,
        rec: &R,
    ) -> Result<Ordering> {
        let cmp = self.compare_tuple_to_record(tuple, rec, tuple.compare_fields(), 0)?;
        Ok(cmp.ordering)
    }

    /// True if every field of the tuple matches the corresponding leading
    /// field of the record.
    pub fn tuple_is_prefix_of_record<R: RecordAccess>(
        &self,
        tuple: &KeyTuple<'_>,
        rec: &R,
    ) -> Result<bool> {
        let n_fields = tuple.field_count();
        if n_fields > rec.field_count() {
            return Ok(false);
        }
        let cmp = self.compare_tuple_to_record(tuple, rec, n_fields, 0)?;
        Ok(cmp.matched_fields == n_fields)
    }

    /// Compares two physical records field by field over their common
    /// leading fields, using the index's column metadata (or raw binary
    /// for an untyped index).
    ///
    /// With `nulls_unequal` set, a field that is NULL on both sides
    /// resolves as Less immediately: cardinality statistics may need
    /// distinct NULL-bearing rows to count as distinct.
    pub fn compare_records<R1: RecordAccess, R2: RecordAccess>(
        &self,
        rec1: &R1,
        rec2: &R2,
        index: &IndexDef,
        nulls_unequal: bool,
    ) -> Result<Comparison> {
        match (rec1.is_min_rec(), rec2.is_min_rec()) {
            // A page holds at most one minimum record; both sides marked
            // only happens when page boundary entries meet.
            (true, true) => return Ok(Comparison::resolved(Ordering::Equal, 0)),
            (true, false) => return Ok(Comparison::resolved(Ordering::Less, 0)),
            (false, true) => return Ok(Comparison::resolved(Ordering::Greater, 0)),
            (false, false) => {}
        }

        let n = rec1.field_count().min(rec2.field_count());
        ensure!(
            index.is_untyped() || n <= index.field_count(),
            "index {} covers {} columns but records carry {}",
            index.name(),
            index.field_count(),
            n
        );

        let mut cur = 0;
        while cur < n {
            let (main, flags) = index_field_type(index, cur)?;
            let v1 = record_field(rec1, cur, "a record comparison")?;
            let v2 = record_field(rec2, cur, "a record comparison")?;

            if nulls_unequal && v1.is_none() && v2.is_none() {
                return Ok(Comparison::resolved(Ordering::Less, cur));
            }

            let ordering = self.compare_fields(main, flags, v1, v2)?;
            if ordering != Ordering::Equal {
                return Ok(Comparison::resolved(ordering, cur));
            }
            cur += 1;
        }

        Ok(Comparison::resolved(Ordering::Equal, cur))
    }

    /// Compares two records for a unique-key check over the index's
    /// uniqueness prefix.
    ///
    /// If every prefix column matches and none was NULL on either side,
    /// and the index enforces uniqueness, the duplicate is reported
    /// through `sink` and the result is Equal. Otherwise the remaining
    /// index columns keep the order total, so otherwise-equal rows still
    /// sort deterministically during merges. Exhausting every column with
    /// full equality means the index already holds two identical entries,
    /// which is fatal.
    ///
    /// Neither record may contain externally stored fields.
    pub fn compare_for_uniqueness<R1: RecordAccess, R2: RecordAccess>(
        &self,
        rec1: &R1,
        rec2: &R2,
        index: &IndexDef,
        mut sink: Option<&mut dyn DuplicateSink>,
    ) -> Result<Ordering> {
        let n_unique = index.unique_prefix();
        ensure!(
            rec1.field_count() >= n_unique && rec2.field_count() >= n_unique,
            "records carry fewer fields than the uniqueness prefix of index {}",
            index.name()
        );

        let mut null_seen = false;

        for cur in 0..n_unique {
            let (main, flags) = index_field_type(index, cur)?;
            let v1 = record_field(rec1, cur, "a uniqueness check")?;
            let v2 = record_field(rec2, cur, "a uniqueness check")?;

            let ordering = self.compare_fields(main, flags, v1, v2)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }

            // Fields that compared equal are either both NULL or both
            // non-NULL.
            debug_assert_eq!(v1.is_none(), v2.is_none());
            if v1.is_none() || v2.is_none() {
                null_seen = true;
            }
        }

        // The ordering columns match. NULLs never collide for
        // uniqueness, so only an all-non-NULL match is a duplicate.
        if !null_seen && index.is_unique() {
            if let Some(sink) = sink.as_deref_mut() {
                sink.duplicate(rec1, index);
                return Ok(Ordering::Equal);
            }
        }

        for cur in n_unique..index.field_count() {
            let (main, flags) = index_field_type(index, cur)?;
            let v1 = record_field(rec1, cur, "a uniqueness check")?;
            let v2 = record_field(rec2, cur, "a uniqueness check")?;

            let ordering = self.compare_fields(main, flags, v1, v2)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }

        log::error!("index {} contains two fully identical entries", index.name());
        bail!("index {} contains two fully identical entries", index.name());
    }
}

/// True if the type compares as raw unsigned bytes (with the pad rule)
/// rather than through the whole-field strategy.
fn uses_binary_comparison(main: MainType, flags: TypeFlags) -> bool {
    match main {
        MainType::FixedBinary
        | MainType::Binary
        | MainType::Int
        | MainType::Sys
        | MainType::ChildPtr => true,
        MainType::Blob => flags.contains(TypeFlags::BINARY_TYPE),
        _ => false,
    }
}

/// Clamps a raw collation result to the sign-only contract.
fn normalize(raw: i32) -> Ordering {
    raw.cmp(&0)
}

/// Resolves the column type for field `idx`, or raw binary for an
/// untyped index.
fn index_field_type(index: &IndexDef, idx: usize) -> Result<(MainType, TypeFlags)> {
    if index.is_untyped() {
        return Ok((MainType::Binary, TypeFlags::empty()));
    }
    match index.column(idx) {
        Some(col) => Ok((col.column().main(), col.column().flags())),
        None => {
            log::error!("index {} has no column {}", index.name(), idx);
            bail!("index {} has no column {}", index.name(), idx);
        }
    }
}

/// Fetches a record field for comparison. `None` is SQL NULL; an
/// externally stored field is a protocol violation on every path that
/// calls this.
fn record_field<'r, R: RecordAccess>(
    rec: &'r R,
    idx: usize,
    path: &str,
) -> Result<Option<&'r [u8]>> {
    match rec.field(idx) {
        FieldRef::Data(bytes) => Ok(Some(bytes)),
        FieldRef::Null => Ok(None),
        FieldRef::External => {
            log::error!("externally stored field {} reached during {}", idx, path);
            bail!("externally stored field {} reached during {}", idx, path);
        }
    }
}

/// Numeric order for decimals encoded as ASCII digit strings.
///
/// Operands may carry leading spaces, an optional sign, and `+`/`0`
/// padding out to the column's declared precision. After stripping,
/// more significant digits win, and equal-length digit strings compare
/// byte-for-byte; both verdicts invert when the operands are negative.
/// Values are trusted to be left-padded to their declared precision;
/// stray leading zeros beyond the padding are a dictionary bug upstream.
fn compare_decimal_text(mut a: &[u8], mut b: &[u8]) -> Ordering {
    a = trim_leading(a, |c| c == b' ');
    b = trim_leading(b, |c| c == b' ');

    let negate = match (a.first() == Some(&b'-'), b.first() == Some(&b'-')) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (true, true) => {
            a = &a[1..];
            b = &b[1..];
            true
        }
        (false, false) => false,
    };

    a = trim_leading(a, |c| c == b'+' || c == b'0');
    b = trim_leading(b, |c| c == b'+' || c == b'0');

    let magnitude = if a.len() != b.len() {
        a.len().cmp(&b.len())
    } else {
        a.cmp(b)
    };
    if negate {
        magnitude.reverse()
    } else {
        magnitude
    }
}

fn trim_leading(mut s: &[u8], pred: impl Fn(u8) -> bool) -> &[u8] {
    while let Some((&first, rest)) = s.split_first() {
        if !pred(first) {
            break;
        }
        s = rest;
    }
    s
}
