//! Tests for the records module

use super::*;

fn build(f: impl FnOnce(&mut RecordBuilder)) -> Vec<u8> {
    let mut builder = RecordBuilder::new();
    f(&mut builder);
    builder.build().unwrap()
}

#[test]
fn record_view_rejects_empty_data() {
    let result = RecordView::new(&[], 1);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("empty"));
}

#[test]
fn record_view_rejects_zero_fields() {
    let data = build(|b| {
        b.push(b"x");
    });
    assert!(RecordView::new(&data, 0).is_err());
}

#[test]
fn record_view_rejects_truncated_header() {
    let data = build(|b| {
        b.push(b"x").push(b"y");
    });
    // Claim more fields than the header was sized for.
    assert!(RecordView::new(&data[..4], 2).is_err());
}

#[test]
fn record_view_borrows_data_zero_copy() {
    let data = build(|b| {
        b.push(b"hello");
    });
    let view = RecordView::new(&data, 1).unwrap();

    assert!(std::ptr::eq(view.data().as_ptr(), data.as_ptr()));
    match view.field(0) {
        FieldRef::Data(bytes) => {
            assert_eq!(bytes, b"hello");
            assert!(data.as_ptr_range().contains(&bytes.as_ptr()));
        }
        other => panic!("expected in-page field, got {:?}", other),
    }
}

#[test]
fn fields_come_back_in_order() {
    let data = build(|b| {
        b.push(b"one").push(b"").push(b"three");
    });
    let view = RecordView::new(&data, 3).unwrap();

    assert_eq!(view.field_count(), 3);
    assert_eq!(view.field(0), FieldRef::Data(b"one"));
    assert_eq!(view.field(1), FieldRef::Data(b""));
    assert_eq!(view.field(2), FieldRef::Data(b"three"));
}

#[test]
fn null_fields_are_reported_null() {
    let data = build(|b| {
        b.push(b"a").push_null().push(b"c");
    });
    let view = RecordView::new(&data, 3).unwrap();

    assert!(!view.is_null(0));
    assert!(view.is_null(1));
    assert_eq!(view.field(1), FieldRef::Null);
    assert_eq!(view.field(2), FieldRef::Data(b"c"));
}

#[test]
fn external_fields_are_reported_external() {
    let data = build(|b| {
        b.push(b"key").push_external();
    });
    let view = RecordView::new(&data, 2).unwrap();

    assert!(view.is_external(1));
    assert!(!view.is_external(0));
    assert_eq!(view.field(1), FieldRef::External);
}

#[test]
fn min_rec_marker_round_trips() {
    let plain = build(|b| {
        b.push(b"k");
    });
    let min = build(|b| {
        b.push(b"k").mark_min_rec();
    });

    assert!(!RecordView::new(&plain, 1).unwrap().is_min_rec());
    assert!(RecordView::new(&min, 1).unwrap().is_min_rec());
}

#[test]
fn bitmaps_cover_more_than_eight_fields() {
    let data = build(|b| {
        for i in 0..9 {
            if i == 8 {
                b.push_null();
            } else {
                b.push([i as u8]);
            }
        }
    });
    let view = RecordView::new(&data, 9).unwrap();

    assert_eq!(view.field(7), FieldRef::Data(&[7]));
    assert_eq!(view.field(8), FieldRef::Null);
}

#[test]
fn field_ref_predicates() {
    assert!(FieldRef::Null.is_null());
    assert!(!FieldRef::Null.is_external());
    assert!(FieldRef::External.is_external());
    assert!(!FieldRef::Data(b"x").is_null());
}
