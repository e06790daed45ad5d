//! Splitting by a monotone predicate (spec §4.6): `split`, `split_tree`, `take_until`,
//! `drop_until`.

use crate::digit::Digit;
use crate::lazy::Lazy;
use crate::measure::Measurer;
use crate::node::Elem;
use crate::tree::{deep_l, deep_r, from_digit, push_first, FingerTree, Repr};

/// Scan `items` left to right, accumulating from `acc`, and return the first index whose
/// inclusive fold makes `p` true, split three ways: everything strictly before it, the pivot
/// itself, and everything strictly after.
///
/// Panics if `p` never becomes true — callers only invoke this once they've already confirmed
/// `p` holds on `acc ⊕ items.measure()`, so termination is guaranteed by the monotone-predicate
/// contract (spec §4.6).
fn split_items<Mr: Measurer>(
    mr: &Mr,
    items: Vec<Elem<Mr>>,
    p: &dyn Fn(&Mr::Measure) -> bool,
    mut acc: Mr::Measure,
) -> (Vec<Elem<Mr>>, Elem<Mr>, Vec<Elem<Mr>>) {
    let mut left = Vec::with_capacity(items.len());
    let mut iter = items.into_iter();
    for item in iter.by_ref() {
        let new_acc = mr.sum(&acc, &item.measure(mr));
        if p(&new_acc) {
            let right: Vec<Elem<Mr>> = iter.collect();
            return (left, item, right);
        }
        left.push(item);
        acc = new_acc;
    }
    unreachable!("split_items: predicate never held despite caller's precondition check")
}

fn digit_from_vec<Mr: Measurer>(mr: &Mr, items: Vec<Elem<Mr>>) -> Option<Digit<Mr>> {
    if items.is_empty() {
        None
    } else {
        Some(Digit::from_vec(mr, items.into()))
    }
}

/// `split-tree` (spec §4.6): descend prefix, then spine, then suffix, returning the left
/// sub-tree, the pivot element, and the right sub-tree.
pub(crate) fn split_tree<Mr: Measurer>(
    mr: &Mr,
    repr: Repr<Mr>,
    p: &dyn Fn(&Mr::Measure) -> bool,
    acc: Mr::Measure,
) -> (Repr<Mr>, Elem<Mr>, Repr<Mr>) {
    match repr {
        Repr::Empty => unreachable!("split_tree called on an empty tree"),
        Repr::Single(x) => (Repr::Empty, x, Repr::Empty),
        Repr::Deep {
            prefix,
            spine,
            suffix,
            ..
        } => {
            let acc_pre = mr.sum(&acc, &prefix.measure());
            if p(&acc_pre) {
                let (l, pivot, r) = split_items(mr, prefix.into_items().into_vec(), p, acc);
                let left = digit_from_vec(mr, l).map_or(Repr::Empty, |d| from_digit(mr, d));
                let right = deep_l(mr, digit_from_vec(mr, r), spine, suffix);
                (left, pivot, right)
            } else {
                let acc_mid = mr.sum(&acc_pre, &spine.measure());
                if p(&acc_mid) {
                    let forced = spine.force().clone();
                    let (ls, node, rs) = split_tree(mr, forced, p, acc_pre.clone());
                    let ls_measure = ls.measure(mr);
                    let acc_for_children = mr.sum(&acc_pre, &ls_measure);
                    let children = node.into_children().into_vec();
                    let (jl, pivot, jr) = split_items(mr, children, p, acc_for_children);

                    let rs_measure = rs.measure(mr);
                    let left = deep_r(
                        mr,
                        prefix,
                        Lazy::forced(ls_measure, ls),
                        digit_from_vec(mr, jl),
                    );
                    let right = deep_l(
                        mr,
                        digit_from_vec(mr, jr),
                        Lazy::forced(rs_measure, rs),
                        suffix,
                    );
                    (left, pivot, right)
                } else {
                    let (l, pivot, r) = split_items(mr, suffix.into_items().into_vec(), p, acc_mid);
                    let left = deep_r(mr, prefix, spine, digit_from_vec(mr, l));
                    let right = digit_from_vec(mr, r).map_or(Repr::Empty, |d| from_digit(mr, d));
                    (left, pivot, right)
                }
            }
        }
    }
}

/// `split(t, p)` (spec §4.6): a predicate true at ε returns `(empty, t)`; a predicate never true
/// on the whole tree's measure returns `(t, empty)`.
pub(crate) fn split<Mr: Measurer>(
    mr: &Mr,
    repr: Repr<Mr>,
    p: &dyn Fn(&Mr::Measure) -> bool,
) -> (Repr<Mr>, Repr<Mr>) {
    if repr.is_empty() {
        return (Repr::Empty, Repr::Empty);
    }
    let total = repr.measure(mr);
    if !p(&total) {
        return (repr, Repr::Empty);
    }
    let (left, pivot, right) = split_tree(mr, repr, p, mr.identity());
    (left, push_first(mr, right, pivot))
}

impl<Mr: Measurer> FingerTree<Mr> {
    /// Split at the first position where `p` flips from false to true over the left-to-right
    /// accumulated measure. `p` must be monotone (spec §4.6): once true along a prefix scan, it
    /// stays true for every longer prefix.
    #[must_use]
    pub fn split<P>(&self, p: P) -> (Self, Self)
    where
        P: Fn(&Mr::Measure) -> bool,
    {
        let (left, right) = split(&self.mr, self.repr.clone(), &p);
        (
            FingerTree { mr: self.mr.clone(), repr: left },
            FingerTree { mr: self.mr.clone(), repr: right },
        )
    }

    /// The left component of [`FingerTree::split`].
    #[must_use]
    pub fn take_until<P>(&self, p: P) -> Self
    where
        P: Fn(&Mr::Measure) -> bool,
    {
        self.split(p).0
    }

    /// The right component of [`FingerTree::split`] — everything from the first position where
    /// `p` holds, inclusive.
    #[must_use]
    pub fn drop_until<P>(&self, p: P) -> Self
    where
        P: Fn(&Mr::Measure) -> bool,
    {
        self.split(p).1
    }
}

#[cfg(test)]
mod tests {
    use crate::measures::{Count, Max};
    use crate::FingerTree;

    fn seq(t: &FingerTree<Count<i32>>) -> Vec<i32> {
        t.to_sequence().iter().map(|v| **v).collect()
    }

    #[test]
    fn split_by_position_count() {
        let t = FingerTree::from_sequence(Count::new(), 1..=100);
        let (l, r) = t.split(|n| *n > 30);
        assert_eq!(seq(&l), (1..=30).collect::<Vec<_>>());
        assert_eq!(seq(&r), (31..=100).collect::<Vec<_>>());
        assert_eq!(l.measure(), 30);
        assert_eq!(r.measure(), 70);
    }

    #[test]
    fn split_with_predicate_true_at_identity_returns_empty_left() {
        let t = FingerTree::from_sequence(Count::new(), 1..=10);
        let (l, r) = t.split(|_| true);
        assert!(l.is_empty());
        assert_eq!(r.measure(), 10);
    }

    #[test]
    fn split_with_predicate_never_true_returns_whole_tree_on_left() {
        let t = FingerTree::from_sequence(Count::new(), 1..=10);
        let (l, r) = t.split(|_| false);
        assert_eq!(l.measure(), 10);
        assert!(r.is_empty());
    }

    #[test]
    fn take_until_and_drop_until_partition_the_sequence() {
        let t = FingerTree::from_sequence(Count::new(), 1..=50);
        let left = t.take_until(|n| *n > 20);
        let right = t.drop_until(|n| *n > 20);
        assert_eq!(seq(&left), (1..=20).collect::<Vec<_>>());
        assert_eq!(right.measure(), 30);
    }

    #[test]
    fn split_on_empty_tree_returns_two_empties() {
        let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        let (l, r) = t.split(|n| *n > 0);
        assert!(l.is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn split_with_max_measurer_finds_the_peak() {
        let t = FingerTree::from_sequence(Max::new(), [3, 1, 4, 1, 5, 9, 2, 6]);
        let (l, r) = t.split(|m| matches!(m, Some(n) if *n >= 5));
        let l_seq: Vec<i32> = l.to_sequence().iter().map(|v| **v).collect();
        assert_eq!(l_seq, vec![3, 1, 4, 1]);
        assert_eq!(*r.peek_first().unwrap(), 5);
    }
}
