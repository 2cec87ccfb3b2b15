//! Fuzz testing for scalar field comparison.
//!
//! Feeds arbitrary byte buffers through every comparison strategy and
//! checks the total-order contract: no panics, antisymmetric results,
//! and reflexive equality.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use rowandb_cmp::collation::collation_ids;
use rowandb_cmp::types::{MainType, TypeFlags};
use rowandb_cmp::{CollationRegistry, KeyComparator};

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzType {
    FixedBinary,
    Binary,
    Int,
    Decimal,
    Float,
    Double,
    Varchar,
    VarText,
    BinaryBlob,
    CollatedBlob,
    Geometry,
}

impl FuzzType {
    fn column(self) -> (MainType, TypeFlags) {
        let collated = TypeFlags::empty().with_collation(collation_ids::DEFAULT);
        match self {
            FuzzType::FixedBinary => (MainType::FixedBinary, TypeFlags::empty()),
            FuzzType::Binary => (
                MainType::Binary,
                TypeFlags::empty().with_collation(collation_ids::BINARY),
            ),
            FuzzType::Int => (MainType::Int, TypeFlags::empty()),
            FuzzType::Decimal => (MainType::Decimal, TypeFlags::empty()),
            FuzzType::Float => (MainType::Float, TypeFlags::empty()),
            FuzzType::Double => (MainType::Double, TypeFlags::empty()),
            FuzzType::Varchar => (MainType::Varchar, TypeFlags::empty()),
            FuzzType::VarText => (MainType::VarText, collated),
            FuzzType::BinaryBlob => (MainType::Blob, TypeFlags::BINARY_TYPE),
            FuzzType::CollatedBlob => (MainType::Blob, collated),
            FuzzType::Geometry => (MainType::Geometry, TypeFlags::empty()),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct CompareInput {
    ty: FuzzType,
    a: Option<Vec<u8>>,
    b: Option<Vec<u8>>,
}

/// Field widths are a dictionary guarantee the comparator may assume, so
/// fixed-width types get their buffers sized before comparison.
fn sized(ty: FuzzType, value: Option<Vec<u8>>) -> Option<Vec<u8>> {
    let width = match ty {
        FuzzType::Float => 4,
        FuzzType::Double => 8,
        _ => return value,
    };
    value.map(|mut v| {
        v.resize(width, 0);
        v
    })
}

fuzz_target!(|input: CompareInput| {
    let registry = CollationRegistry::new();
    let cmp = KeyComparator::new(&registry);
    let (main, flags) = input.ty.column();

    let a = sized(input.ty, input.a);
    let b = sized(input.ty, input.b);
    let a = a.as_deref();
    let b = b.as_deref();

    let ab = cmp.compare_fields(main, flags, a, b).unwrap();
    let ba = cmp.compare_fields(main, flags, b, a).unwrap();
    assert_eq!(ab, ba.reverse(), "antisymmetry violated for {:?}", input.ty);

    let aa = cmp.compare_fields(main, flags, a, a).unwrap();
    assert_eq!(aa, std::cmp::Ordering::Equal);
});
