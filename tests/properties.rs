use linked_sequence::{swap, LinkedSequence, Position};
use rstest::rstest;

fn seq(values: &[i32]) -> LinkedSequence<i32> {
    values.iter().copied().collect()
}

fn to_vec(seq: &LinkedSequence<i32>) -> Vec<i32> {
    seq.iter().copied().collect()
}

#[rstest]
#[case(&[], &[], true)]
#[case(&[1, 2, 3], &[1, 2, 3], true)]
#[case(&[1, 2], &[1, 2, 3], false)]
#[case(&[1, 2, 4], &[1, 2, 3], false)]
#[case(&[1], &[], false)]
fn equality_is_size_and_pairwise(#[case] a: &[i32], #[case] b: &[i32], #[case] equal: bool) {
    let (a, b) = (seq(a), seq(b));
    assert_eq!(a == b, equal);
    assert_eq!(a != b, !equal);
    assert_eq!(b == a, equal);
}

#[rstest]
#[case(&[1, 2], &[1, 2, 3])]
#[case(&[], &[0])]
#[case(&[1, 2, 3], &[1, 3])]
#[case(&[0, 9, 9], &[1])]
fn lexicographic_order(#[case] less: &[i32], #[case] greater: &[i32]) {
    let (a, b) = (seq(less), seq(greater));
    assert!(a < b);
    assert!(a <= b);
    assert!(b > a);
    assert!(b >= a);
    assert!(!(b < a));
    assert!(a != b);
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Less);
}

#[test]
fn equal_sequences_are_not_less() {
    let (a, b) = (seq(&[1, 2, 3]), seq(&[1, 2, 3]));
    assert!(!(a < b));
    assert!(!(b < a));
    assert!(a <= b && a >= b);
}

#[rstest]
#[case(&[])]
#[case(&[5])]
#[case(&[1, 2, 3])]
fn push_then_pop_front_restores(#[case] values: &[i32]) {
    let mut s = seq(values);
    s.push_front(42).unwrap();
    assert_eq!(s.len(), values.len() + 1);
    assert_eq!(s.pop_front(), Some(42));
    assert_eq!(to_vec(&s), values);
}

#[rstest]
#[case(&[])]
#[case(&[1, 2, 3])]
fn insert_after_before_begin_is_push_front(#[case] values: &[i32]) {
    let mut a = seq(values);
    let mut b = seq(values);
    let pa = a.push_front(0).unwrap();
    let pb = b.insert_after(b.before_begin(), 0).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.begin(), pa);
    assert_eq!(b.begin(), pb);
}

#[rstest]
#[case(&[1])]
#[case(&[1, 2, 3])]
fn erase_after_before_begin_is_pop_front(#[case] values: &[i32]) {
    let mut a = seq(values);
    let mut b = seq(values);
    a.pop_front();
    let following = b.erase_after(b.before_begin()).unwrap();
    assert_eq!(a, b);
    assert_eq!(following, b.begin());
}

#[test]
fn erasing_the_only_value_returns_end() {
    let mut s = seq(&[7]);
    let following = s.erase_after(s.before_begin()).unwrap();
    assert_eq!(following, s.end());
    assert_eq!(following, Position::default());
    assert!(s.is_empty());
    assert_eq!(s.begin(), s.end());
}

#[test]
fn copies_are_independent() {
    let mut original = seq(&[1, 2, 3]);
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.push_front(0).unwrap();
    *copy.back_mut().unwrap() = 30;
    assert_eq!(to_vec(&original), vec![1, 2, 3]);

    original.clear();
    assert_eq!(to_vec(&copy), vec![0, 1, 2, 30]);
}

#[test]
fn try_clone_matches_source() {
    let original = seq(&[4, 5, 6]);
    let copy = original.try_clone().unwrap();
    assert_eq!(copy, original);
    assert_ne!(copy.begin(), original.begin());
}

#[test]
fn swap_is_its_own_inverse() {
    let mut a = seq(&[1, 2, 3]);
    let mut b = seq(&[9]);
    let (a_first, b_first) = (a.begin(), b.begin());

    a.swap(&mut b);
    assert_eq!(to_vec(&a), vec![9]);
    assert_eq!(to_vec(&b), vec![1, 2, 3]);
    assert_eq!(a.begin(), b_first);

    swap(&mut a, &mut b);
    assert_eq!(to_vec(&a), vec![1, 2, 3]);
    assert_eq!(to_vec(&b), vec![9]);
    assert_eq!(a.begin(), a_first);
    assert_eq!(b.begin(), b_first);
}

#[test]
fn before_begin_is_kept_through_swap_both_ways() {
    let mut a = seq(&[1, 2]);
    let mut b = seq(&[9]);
    let (a_before, b_before) = (a.before_begin(), b.before_begin());

    swap(&mut a, &mut b);
    a.insert_after(a_before, 0).unwrap();
    b.insert_after(b_before, 5).unwrap();
    assert!(b.insert_after(a_before, -1).is_err());
    assert!(a.insert_after(b_before, -1).is_err());
    assert_eq!(to_vec(&a), vec![0, 9]);
    assert_eq!(to_vec(&b), vec![5, 1, 2]);

    b.swap(&mut a);
    assert_eq!(a.erase_after(a_before).unwrap(), a.begin());
    assert_eq!(b.erase_after(b_before).unwrap(), b.begin());
    assert_eq!(to_vec(&a), vec![1, 2]);
    assert_eq!(to_vec(&b), vec![9]);
}

#[test]
fn built_from_values_iterates_in_order() {
    let s = LinkedSequence::from([1, 2, 3]);
    let mut cursor = s.cursor_front();
    let mut seen = Vec::new();
    while let Some(value) = cursor.current() {
        seen.push(*value);
        cursor.move_next();
    }
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(cursor.position(), s.end());
    assert_eq!(s.len(), 3);
    assert!(!s.is_empty());
}

#[rstest]
#[case(&[])]
#[case(&[1])]
#[case(&[1, 2, 3, 4, 5])]
fn clear_empties(#[case] values: &[i32]) {
    let mut s = seq(values);
    s.clear();
    assert_eq!(s.len(), 0);
    assert!(s.is_empty());
    assert_eq!(s.begin(), s.end());
    assert_eq!(s.iter().count(), 0);
}

#[test]
fn ten_thousand_tail_inserts_then_drop() {
    let mut s = LinkedSequence::new();
    let mut tail = s.before_begin();
    for i in 0..10_000 {
        tail = s.insert_after(tail, i).unwrap();
    }
    assert_eq!(s.len(), 10_000);
    assert_eq!(s.iter().copied().sum::<i32>(), (0..10_000).sum::<i32>());
    drop(s);
}

#[test]
fn extend_appends_at_tail() {
    let mut s = seq(&[1]);
    s.extend([2, 3]);
    s.extend(&[4, 5]);
    assert_eq!(to_vec(&s), vec![1, 2, 3, 4, 5]);
    assert_eq!(s.back(), Some(&5));
}

#[test]
fn owned_iteration_and_contains() {
    let s = LinkedSequence::from(vec![String::from("a"), String::from("b")]);
    assert!(s.contains(&String::from("b")));
    assert!(!s.contains(&String::from("c")));
    let collected: Vec<String> = s.into_iter().collect();
    assert_eq!(collected, vec!["a", "b"]);
}

#[test]
fn assignment_keeps_values_with_logging_enabled() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut target = seq(&[1, 1, 1]);
    let source = seq(&[2, 3]);
    target.assign_from(&source).unwrap();
    assert_eq!(target, source);

    let mut reserved: LinkedSequence<i32> = LinkedSequence::new();
    assert!(reserved.try_reserve(usize::MAX).is_err());
    assert!(reserved.is_empty());
    target.clear();
    assert!(target.is_empty());
}
