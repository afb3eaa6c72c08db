use super::*;

#[test]
fn arithmetic_accepts_pairs_arrays_and_scalars() {
    let base = v2(10, 20);
    assert_eq!(base + (5, -5), v2(15, 15));
    assert_eq!(base - [10, 10], v2(0, 10));
    assert_eq!(base * 2, v2(20, 40));
    assert_eq!(base * (6, 1), v2(60, 20));
    assert_eq!(base + v2(1, 1) * 1.5, Vector2::new(11.5, 21.5));
    assert_eq!(-base, v2(-10, -20));
}

#[test]
fn operations_return_copies() {
    let origin = v2(15, 10);
    let mut moved = origin;
    moved += (100, 0);
    assert_eq!(origin, v2(15, 10));
    assert_eq!(moved, v2(115, 10));
}

#[test]
fn checked_index_rejects_out_of_range() {
    let v = v2(3, 4);
    assert_eq!(v.get(0).unwrap(), 3.0);
    assert_eq!(v.get(1).unwrap(), 4.0);
    assert!(matches!(
        v.get(2),
        Err(PibError::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(v.with(5, 1.0).is_err());
    assert_eq!(v.with(1, 9.0).unwrap(), v2(3, 9));
    assert_eq!(v.len(), 2);
    assert_eq!(v[0], 3.0);
}

#[test]
#[should_panic(expected = "out of range")]
fn index_operator_panics_past_len() {
    let _ = v2(1, 2)[2];
}

#[test]
fn integer_view_truncates_toward_zero() {
    assert_eq!(Vector2::new(12.9, -3.7).i(), (12, -3));
    assert_eq!((v2(86, 86) * 1.5 * 0.75).i(), (96, 96));
    assert_eq!(v2(-250, 7).div_floor(2), v2(-125, 3));
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(128, 255), 128);
    assert_eq!(mul_div255(0, 200), 0);
}
