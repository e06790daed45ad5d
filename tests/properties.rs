//! Algebraic-law and end-to-end scenario tests for the finger tree's public surface.
//!
//! Laws 1-9 and scenarios S1-S6 from the spec, exercised only through `FingerTree`'s public API.

use finger_tree::measures::{Count, Max};
use finger_tree::{FingerTree, Measurer};
use proptest::prelude::*;

fn count_tree(items: &[i32]) -> FingerTree<Count<i32>> {
    FingerTree::from_sequence(Count::new(), items.iter().copied())
}

fn sequence(t: &FingerTree<Count<i32>>) -> Vec<i32> {
    t.to_sequence().iter().map(|v| **v).collect()
}

// Law 1: to_sequence(empty) = []
#[test]
fn law_1_empty_to_sequence_is_empty() {
    let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
    assert!(t.to_sequence().is_empty());
}

proptest! {
    // Law 2: to_sequence(push_first(t, x)) = [x] ++ to_sequence(t)
    #[test]
    fn law_2_push_first_prepends(items in prop::collection::vec(any::<i32>(), 0..200), x in any::<i32>()) {
        let t = count_tree(&items);
        let pushed = sequence(&t.push_first(x));
        let mut expected = vec![x];
        expected.extend_from_slice(&items);
        prop_assert_eq!(pushed, expected);
    }

    // Law 3: to_sequence(push_last(t, x)) = to_sequence(t) ++ [x]
    #[test]
    fn law_3_push_last_appends(items in prop::collection::vec(any::<i32>(), 0..200), x in any::<i32>()) {
        let t = count_tree(&items);
        let pushed = sequence(&t.push_last(x));
        let mut expected = items.clone();
        expected.push(x);
        prop_assert_eq!(pushed, expected);
    }

    // Law 4: to_sequence(a + b) = to_sequence(a) ++ to_sequence(b)
    #[test]
    fn law_4_concat_concatenates_sequences(
        a in prop::collection::vec(any::<i32>(), 0..100),
        b in prop::collection::vec(any::<i32>(), 0..100),
    ) {
        let ta = count_tree(&a);
        let tb = count_tree(&b);
        let joined = sequence(&ta.concat(&tb));
        let mut expected = a.clone();
        expected.extend_from_slice(&b);
        prop_assert_eq!(joined, expected);
    }

    // Law 5: (a + b) + c and a + (b + c) produce equal sequences and equal root measures.
    #[test]
    fn law_5_concat_is_associative(
        a in prop::collection::vec(any::<i32>(), 0..50),
        b in prop::collection::vec(any::<i32>(), 0..50),
        c in prop::collection::vec(any::<i32>(), 0..50),
    ) {
        let ta = count_tree(&a);
        let tb = count_tree(&b);
        let tc = count_tree(&c);

        let left = ta.concat(&tb).concat(&tc);
        let right = ta.concat(&tb.concat(&tc));

        prop_assert_eq!(sequence(&left), sequence(&right));
        prop_assert_eq!(left.measure(), right.measure());
    }

    // Law 6: empty + t = t + empty = t (sequence-wise)
    #[test]
    fn law_6_empty_is_concat_identity(items in prop::collection::vec(any::<i32>(), 0..100)) {
        let t = count_tree(&items);
        let empty: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        prop_assert_eq!(sequence(&empty.concat(&t)), items.clone());
        prop_assert_eq!(sequence(&t.concat(&empty)), items);
    }

    // Law 7: measure(t) = fold of measure(v) over v in to_sequence(t)
    #[test]
    fn law_7_measure_matches_folded_element_measures(items in prop::collection::vec(any::<i32>(), 0..200)) {
        let t = count_tree(&items);
        prop_assert_eq!(t.measure(), items.len());
    }

    // Law 8: split partitions the sequence, and the predicate's truth straddles the boundary.
    #[test]
    fn law_8_split_partitions_and_respects_the_boundary(
        items in prop::collection::vec(any::<i32>(), 1..200),
        cut in 0usize..200,
    ) {
        let t = count_tree(&items);
        let (l, r) = t.split(move |n: &usize| *n > cut);

        prop_assert_eq!(
            [sequence(&l), sequence(&r)].concat(),
            items
        );

        if !r.is_empty() {
            let l_measure = l.measure();
            let first_measure = l_measure + 1;
            prop_assert!(first_measure > cut);
            prop_assert!(l_measure <= cut);
        }
    }

    // Law 9: push_first(t, x); pop_first returns (x, t); symmetric for last.
    #[test]
    fn law_9_push_pop_first_round_trips(items in prop::collection::vec(any::<i32>(), 0..200), x in any::<i32>()) {
        let t = count_tree(&items);
        let pushed = t.push_first(x);
        let (popped, rest) = pushed.pop_first().unwrap();
        prop_assert_eq!(*popped, x);
        prop_assert_eq!(sequence(&rest), items);
    }

    #[test]
    fn law_9_push_pop_last_round_trips(items in prop::collection::vec(any::<i32>(), 0..200), x in any::<i32>()) {
        let t = count_tree(&items);
        let pushed = t.push_last(x);
        let (rest, popped) = pushed.pop_last().unwrap();
        prop_assert_eq!(*popped, x);
        prop_assert_eq!(sequence(&rest), items);
    }
}

// Resolves the spec's "Open Question" about concat_all double-counting the first tree: folding
// from an empty accumulator seeded with the first tree's measurer must not count its elements
// twice.
#[test]
fn law_9_concat_all_no_double_count() {
    let a = count_tree(&[1, 2, 3]);
    let b = count_tree(&[4, 5]);
    let c = count_tree(&[6, 7, 8, 9]);

    let joined = FingerTree::concat_all([a, b, c]).unwrap();
    assert_eq!(joined.measure(), 9);
    assert_eq!(sequence(&joined), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

// Boundary behaviors (spec §8).

#[test]
fn boundary_pop_and_peek_on_empty_raise_empty_tree() {
    let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
    assert!(t.pop_first().is_err());
    assert!(t.pop_last().is_err());
    assert!(t.peek_first().is_err());
    assert!(t.peek_last().is_err());
}

#[test]
fn boundary_split_true_at_identity_returns_empty_then_whole() {
    let t = count_tree(&[1, 2, 3]);
    let (l, r) = t.split(|_| true);
    assert!(l.is_empty());
    assert_eq!(sequence(&r), vec![1, 2, 3]);
}

#[test]
fn boundary_split_never_true_returns_whole_then_empty() {
    let t = count_tree(&[1, 2, 3]);
    let (l, r) = t.split(|_| false);
    assert_eq!(sequence(&l), vec![1, 2, 3]);
    assert!(r.is_empty());
}

#[test]
fn boundary_iteration_stops_on_first_false() {
    let t = count_tree(&[1, 2, 3, 4, 5]);
    let mut seen = Vec::new();
    t.each(|v| {
        seen.push(*v);
        *v != 3
    });
    assert_eq!(seen, vec![1, 2, 3]);
}

// End-to-end scenarios (spec §8 S1-S6).

#[test]
fn s1_from_empty_sequence() {
    let t: FingerTree<Count<i32>> = FingerTree::from_sequence(Count::new(), Vec::new());
    assert!(t.to_sequence().is_empty());
    assert_eq!(t.measure(), 0);
    assert!(t.is_empty());
}

#[test]
fn s2_one_through_one_hundred() {
    let t = FingerTree::from_sequence(Count::new(), 1..=100);
    assert_eq!(*t.peek_first().unwrap(), 1);
    assert_eq!(*t.peek_last().unwrap(), 100);
    assert_eq!(t.measure(), 100);
    assert_eq!(sequence(&t), (1..=100).collect::<Vec<_>>());
}

#[test]
fn s3_split_one_through_one_hundred_at_thirty() {
    let t = FingerTree::from_sequence(Count::new(), 1..=100);
    let (l, r) = t.split(|n| *n > 30);
    assert_eq!(sequence(&l), (1..=30).collect::<Vec<_>>());
    assert_eq!(sequence(&r), (31..=100).collect::<Vec<_>>());
    assert_eq!(l.measure(), 30);
    assert_eq!(r.measure(), 70);
}

#[test]
fn s4_max_measurer_over_integers() {
    let t = FingerTree::from_sequence(Max::new(), [3, 1, 4, 1, 5, 9, 2, 6]);
    assert_eq!(t.measure(), Some(9));

    let (l, r) = t.split(|m| matches!(m, Some(n) if *n >= 5));
    let l_seq: Vec<i32> = l.to_sequence().iter().map(|v| **v).collect();
    assert_eq!(l_seq, vec![3, 1, 4, 1]);
    assert_eq!(*r.peek_first().unwrap(), 5);
}

#[test]
fn s5_concat_one_through_fifty_and_fifty_one_through_one_hundred() {
    let a = FingerTree::from_sequence(Count::new(), 1..=50);
    let b = FingerTree::from_sequence(Count::new(), 51..=100);
    let joined = a.concat(&b);
    assert_eq!(sequence(&joined), (1..=100).collect::<Vec<_>>());
    assert_eq!(joined.measure(), 100);
}

#[test]
fn s6_alternating_push_and_pop_from_both_ends() {
    let mut t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
    let mut expected = std::collections::VecDeque::new();
    for i in 0..1000 {
        if i % 2 == 0 {
            t = t.push_first(i);
            expected.push_front(i);
        } else {
            t = t.push_last(i);
            expected.push_back(i);
        }
    }
    let got: Vec<i32> = sequence(&t);
    let expected: Vec<i32> = expected.into_iter().collect();
    assert_eq!(got, expected);

    for i in 0..500 {
        let (first, rest) = t.pop_first().unwrap();
        assert_eq!(*first, got[i]);
        let (rest, last) = rest.pop_last().unwrap();
        assert_eq!(*last, got[got.len() - 1 - i]);
        t = rest;
    }
    assert!(t.is_empty());
}

// Measurer laws (spec §4.1): identity and associativity, checked for the shipped measurers.

proptest! {
    #[test]
    fn count_measurer_is_a_lawful_monoid(a in 0usize..1000, b in 0usize..1000, c in 0usize..1000) {
        let mr = Count::<i32>::new();
        prop_assert_eq!(mr.sum(&mr.identity(), &a), a);
        prop_assert_eq!(mr.sum(&a, &mr.identity()), a);
        prop_assert_eq!(mr.sum(&mr.sum(&a, &b), &c), mr.sum(&a, &mr.sum(&b, &c)));
    }
}
