//! [`Repr`] (the Empty/Single/Deep tree shape) and [`FingerTree`] (the public handle that pairs a
//! `Repr` with the [`Measurer`] instance it was built from).
//!
//! Spec §3/§4.3/§4.4. See `SPEC_FULL.md` §3 for why `Repr` is self-recursive rather than
//! depth-indexed.

use std::sync::Arc;

use crate::digit::Digit;
use crate::error::FingerTreeError;
use crate::lazy::Lazy;
use crate::measure::Measurer;
use crate::node::{node3, Elem};

/// The tree shape: `Empty`, a single element, or a `Deep` node with a lazy spine one level
/// deeper than `prefix`/`suffix`.
pub(crate) enum Repr<Mr: Measurer> {
    Empty,
    Single(Elem<Mr>),
    Deep {
        measure: Mr::Measure,
        prefix: Digit<Mr>,
        spine: Arc<Lazy<Mr>>,
        suffix: Digit<Mr>,
    },
}

impl<Mr: Measurer> Clone for Repr<Mr> {
    /// O(1) for `Empty`/`Single`, O(digit size) — bounded by 4 — for `Deep`: every child is
    /// reached through an `Arc`, so this never deep-copies user data.
    fn clone(&self) -> Self {
        match self {
            Repr::Empty => Repr::Empty,
            Repr::Single(x) => Repr::Single(x.clone()),
            Repr::Deep {
                measure,
                prefix,
                spine,
                suffix,
            } => Repr::Deep {
                measure: measure.clone(),
                prefix: prefix.clone(),
                spine: Arc::clone(spine),
                suffix: suffix.clone(),
            },
        }
    }
}

impl<Mr: Measurer> Repr<Mr> {
    pub(crate) fn measure(&self, mr: &Mr) -> Mr::Measure {
        match self {
            Repr::Empty => mr.identity(),
            Repr::Single(x) => x.measure(mr),
            Repr::Deep { measure, .. } => measure.clone(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Repr::Empty)
    }
}

// ---------------------------------------------------------------------------
// §4.3 Tree constructors
// ---------------------------------------------------------------------------

pub(crate) fn deep<Mr: Measurer>(
    mr: &Mr,
    prefix: Digit<Mr>,
    spine: Arc<Lazy<Mr>>,
    suffix: Digit<Mr>,
) -> Repr<Mr> {
    let measure = mr.sum(&mr.sum(&prefix.measure(), &spine.measure()), &suffix.measure());
    Repr::Deep {
        measure,
        prefix,
        spine,
        suffix,
    }
}

/// Build a tree holding exactly the elements of `digit` (1–4 of them), with an empty spine.
/// Reuses [`push_last`] rather than hand-rolling a second construction path — since a `Digit`
/// never holds more than 4 elements the extra indirection costs nothing observable.
pub(crate) fn from_digit<Mr: Measurer>(mr: &Mr, digit: Digit<Mr>) -> Repr<Mr> {
    let mut items = digit.into_items().into_iter();
    let first = items
        .next()
        .expect("Digit is never empty (spec invariant 1)");
    let mut repr = Repr::Single(first);
    for item in items {
        repr = push_last(mr, repr, item);
    }
    repr
}

/// `deep-L`: smart constructor used when the prefix has just been emptied by a pop. Pulls one
/// element from the spine to repopulate the prefix if possible, or collapses to a single-ended
/// tree built from `suffix` if the spine is also empty.
pub(crate) fn deep_l<Mr: Measurer>(
    mr: &Mr,
    prefix: Option<Digit<Mr>>,
    spine: Arc<Lazy<Mr>>,
    suffix: Digit<Mr>,
) -> Repr<Mr> {
    match prefix {
        Some(p) => deep(mr, p, spine, suffix),
        None => match spine.force() {
            Repr::Empty => from_digit(mr, suffix),
            forced => {
                let (node, rest_spine) =
                    pop_first(mr, forced.clone()).expect("non-empty spine has a first element");
                let new_prefix = Digit::from_vec(mr, node.into_children());
                let rest_measure = rest_spine.measure(mr);
                deep(mr, new_prefix, Lazy::forced(rest_measure, rest_spine), suffix)
            }
        },
    }
}

/// `deep-R`: mirror of [`deep_l`], used when the suffix has just been emptied.
pub(crate) fn deep_r<Mr: Measurer>(
    mr: &Mr,
    prefix: Digit<Mr>,
    spine: Arc<Lazy<Mr>>,
    suffix: Option<Digit<Mr>>,
) -> Repr<Mr> {
    match suffix {
        Some(s) => deep(mr, prefix, spine, s),
        None => match spine.force() {
            Repr::Empty => from_digit(mr, prefix),
            forced => {
                let (rest_spine, node) =
                    pop_last(mr, forced.clone()).expect("non-empty spine has a last element");
                let new_suffix = Digit::from_vec(mr, node.into_children());
                let rest_measure = rest_spine.measure(mr);
                deep(mr, prefix, Lazy::forced(rest_measure, rest_spine), new_suffix)
            }
        },
    }
}

// ---------------------------------------------------------------------------
// §4.4 End operations
// ---------------------------------------------------------------------------

pub(crate) fn push_first<Mr: Measurer>(mr: &Mr, repr: Repr<Mr>, item: Elem<Mr>) -> Repr<Mr> {
    match repr {
        Repr::Empty => Repr::Single(item),
        Repr::Single(y) => deep(
            mr,
            Digit::one(mr, item),
            Lazy::forced(mr.identity(), Repr::Empty),
            Digit::one(mr, y),
        ),
        Repr::Deep {
            prefix,
            spine,
            suffix,
            ..
        } => {
            if prefix.len() < 4 {
                deep(mr, prefix.push_left(mr, item), spine, suffix)
            } else {
                // prefix = [a, b, c, d] (full); new prefix = [item, a], b/c/d cascade into the
                // spine as a single node3 (spec §4.4).
                let mut items = prefix.into_items();
                let d = items.pop().expect("full digit has 4 items");
                let c = items.pop().expect("full digit has 4 items");
                let b = items.pop().expect("full digit has 4 items");
                let a = items.pop().expect("full digit has 4 items");
                let overflow = node3(mr, b, c, d);
                let new_prefix = Digit::from_vec(mr, smallvec::smallvec![item, a]);

                #[cfg(feature = "tracing")]
                tracing::trace!("push_first cascading full prefix into spine");

                deep(mr, new_prefix, cascade_push_first(mr, spine, overflow), suffix)
            }
        }
    }
}

/// `push-last`: mirror of [`push_first`].
pub(crate) fn push_last<Mr: Measurer>(mr: &Mr, repr: Repr<Mr>, item: Elem<Mr>) -> Repr<Mr> {
    match repr {
        Repr::Empty => Repr::Single(item),
        Repr::Single(y) => deep(
            mr,
            Digit::one(mr, y),
            Lazy::forced(mr.identity(), Repr::Empty),
            Digit::one(mr, item),
        ),
        Repr::Deep {
            prefix,
            spine,
            suffix,
            ..
        } => {
            if suffix.len() < 4 {
                deep(mr, prefix, spine, suffix.push_right(mr, item))
            } else {
                let mut items = suffix.into_items();
                let a = items.remove(0);
                let b = items.remove(0);
                let c = items.remove(0);
                let d = items.remove(0);
                let overflow = node3(mr, a, b, c);
                let new_suffix = Digit::from_vec(mr, smallvec::smallvec![d, item]);

                #[cfg(feature = "tracing")]
                tracing::trace!("push_last cascading full suffix into spine");

                deep(mr, prefix, cascade_push_last(mr, spine, overflow), new_suffix)
            }
        }
    }
}

/// Build the `Lazy` spine for a `push_first` cascade: `lazy push-first(node, old spine)`
/// (spec §4.4), without forcing `old_spine`.
fn cascade_push_first<Mr: Measurer>(
    mr: &Mr,
    old_spine: Arc<Lazy<Mr>>,
    node: Elem<Mr>,
) -> Arc<Lazy<Mr>> {
    let mr = mr.clone();
    let node_measure = node.measure(&mr);
    let new_measure = mr.sum(&old_spine.measure(), &node_measure);
    Lazy::suspended(new_measure, move || {
        let forced = old_spine.force().clone();
        push_first(&mr, forced, node)
    })
}

/// Mirror of [`cascade_push_first`] for `push_last`.
fn cascade_push_last<Mr: Measurer>(
    mr: &Mr,
    old_spine: Arc<Lazy<Mr>>,
    node: Elem<Mr>,
) -> Arc<Lazy<Mr>> {
    let mr = mr.clone();
    let node_measure = node.measure(&mr);
    let new_measure = mr.sum(&old_spine.measure(), &node_measure);
    Lazy::suspended(new_measure, move || {
        let forced = old_spine.force().clone();
        push_last(&mr, forced, node)
    })
}

/// `pop-first`: spec §4.4. Fails with [`FingerTreeError::EmptyTree`] on an empty tree.
pub(crate) fn pop_first<Mr: Measurer>(
    mr: &Mr,
    repr: Repr<Mr>,
) -> Result<(Elem<Mr>, Repr<Mr>), FingerTreeError> {
    match repr {
        Repr::Empty => Err(FingerTreeError::EmptyTree),
        Repr::Single(x) => Ok((x, Repr::Empty)),
        Repr::Deep {
            prefix,
            spine,
            suffix,
            ..
        } => {
            if let Some((head, rest_prefix)) = prefix.pop_left(mr) {
                Ok((head, deep(mr, rest_prefix, spine, suffix)))
            } else {
                let head = prefix.first().clone();
                Ok((head, deep_l(mr, None, spine, suffix)))
            }
        }
    }
}

/// `pop-last`: mirror of [`pop_first`].
pub(crate) fn pop_last<Mr: Measurer>(
    mr: &Mr,
    repr: Repr<Mr>,
) -> Result<(Repr<Mr>, Elem<Mr>), FingerTreeError> {
    match repr {
        Repr::Empty => Err(FingerTreeError::EmptyTree),
        Repr::Single(x) => Ok((Repr::Empty, x)),
        Repr::Deep {
            prefix,
            spine,
            suffix,
            ..
        } => {
            if let Some((rest_suffix, last)) = suffix.pop_right(mr) {
                Ok((deep(mr, prefix, spine, rest_suffix), last))
            } else {
                let last = suffix.first().clone();
                Ok((deep_r(mr, prefix, spine, None), last))
            }
        }
    }
}

fn peek_first<Mr: Measurer>(repr: &Repr<Mr>) -> Result<&Elem<Mr>, FingerTreeError> {
    match repr {
        Repr::Empty => Err(FingerTreeError::EmptyTree),
        Repr::Single(x) => Ok(x),
        Repr::Deep { prefix, .. } => Ok(prefix.first()),
    }
}

fn peek_last<Mr: Measurer>(repr: &Repr<Mr>) -> Result<&Elem<Mr>, FingerTreeError> {
    match repr {
        Repr::Empty => Err(FingerTreeError::EmptyTree),
        Repr::Single(x) => Ok(x),
        Repr::Deep { suffix, .. } => Ok(suffix.last()),
    }
}

// ---------------------------------------------------------------------------
// Public handle
// ---------------------------------------------------------------------------

/// A persistent, immutable, lazily-evaluated finger tree over `Mr::Item`, measured by `Mr`.
///
/// Cloning a `FingerTree` is O(1): it shares every reachable node with the original (spec §3,
/// invariant 5).
pub struct FingerTree<Mr: Measurer> {
    pub(crate) mr: Mr,
    pub(crate) repr: Repr<Mr>,
}

impl<Mr: Measurer> Clone for FingerTree<Mr> {
    fn clone(&self) -> Self {
        FingerTree {
            mr: self.mr.clone(),
            repr: self.repr.clone(),
        }
    }
}

impl<Mr> std::fmt::Debug for FingerTree<Mr>
where
    Mr: Measurer,
    Mr::Item: std::fmt::Debug,
{
    /// Renders as a flat list of elements — semantic content, not the internal tree shape.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.to_sequence()).finish()
    }
}

impl<Mr: Measurer> FingerTree<Mr> {
    /// An empty tree carrying `measurer`.
    pub fn empty(measurer: Mr) -> Self {
        FingerTree {
            mr: measurer,
            repr: Repr::Empty,
        }
    }

    /// Build a tree by iterated `push_last` over `items`, in order.
    pub fn from_sequence<I>(measurer: Mr, items: I) -> Self
    where
        I: IntoIterator<Item = Mr::Item>,
    {
        let mut repr = Repr::Empty;
        for item in items {
            repr = push_last(&measurer, repr, Elem::leaf(item));
        }
        FingerTree { mr: measurer, repr }
    }

    /// `true` if this tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.repr.is_empty()
    }

    /// The root's cached measurement — the ⊕-fold of every element's measure, left to right.
    pub fn measure(&self) -> Mr::Measure {
        self.repr.measure(&self.mr)
    }

    /// A reference to the [`Measurer`] this tree was built with.
    pub fn measurer(&self) -> &Mr {
        &self.mr
    }

    /// Prepend `item`, returning a new tree. Amortized O(1).
    #[must_use]
    pub fn push_first(&self, item: Mr::Item) -> Self {
        let repr = push_first(&self.mr, self.repr.clone(), Elem::leaf(item));
        FingerTree { mr: self.mr.clone(), repr }
    }

    /// Append `item`, returning a new tree. Amortized O(1).
    #[must_use]
    pub fn push_last(&self, item: Mr::Item) -> Self {
        let repr = push_last(&self.mr, self.repr.clone(), Elem::leaf(item));
        FingerTree { mr: self.mr.clone(), repr }
    }

    /// Remove and return the first element and the remaining tree.
    ///
    /// # Errors
    /// Returns [`FingerTreeError::EmptyTree`] if `self` is empty.
    pub fn pop_first(&self) -> Result<(Arc<Mr::Item>, Self), FingerTreeError> {
        let (elem, repr) = pop_first(&self.mr, self.repr.clone())?;
        let value = elem
            .into_leaf()
            .unwrap_or_else(|_| unreachable!("depth-0 pop always yields a leaf"));
        Ok((value, FingerTree { mr: self.mr.clone(), repr }))
    }

    /// Remove and return the remaining tree and the last element.
    ///
    /// # Errors
    /// Returns [`FingerTreeError::EmptyTree`] if `self` is empty.
    pub fn pop_last(&self) -> Result<(Self, Arc<Mr::Item>), FingerTreeError> {
        let (repr, elem) = pop_last(&self.mr, self.repr.clone())?;
        let value = elem
            .into_leaf()
            .unwrap_or_else(|_| unreachable!("depth-0 pop always yields a leaf"));
        Ok((FingerTree { mr: self.mr.clone(), repr }, value))
    }

    /// The first element, without removing it.
    ///
    /// # Errors
    /// Returns [`FingerTreeError::EmptyTree`] if `self` is empty.
    pub fn peek_first(&self) -> Result<&Mr::Item, FingerTreeError> {
        peek_first(&self.repr).map(|elem| {
            elem.as_leaf()
                .unwrap_or_else(|| unreachable!("depth-0 peek always yields a leaf"))
        })
    }

    /// The last element, without removing it.
    ///
    /// # Errors
    /// Returns [`FingerTreeError::EmptyTree`] if `self` is empty.
    pub fn peek_last(&self) -> Result<&Mr::Item, FingerTreeError> {
        peek_last(&self.repr).map(|elem| {
            elem.as_leaf()
                .unwrap_or_else(|| unreachable!("depth-0 peek always yields a leaf"))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::measures::Count;
    use crate::FingerTree;

    #[test]
    fn empty_tree_is_empty() {
        let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        assert!(t.is_empty());
        assert_eq!(t.measure(), 0);
        assert!(t.peek_first().is_err());
        assert!(t.peek_last().is_err());
        assert!(t.pop_first().is_err());
        assert!(t.pop_last().is_err());
    }

    #[test]
    fn push_first_then_peek_first() {
        let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        let t = t.push_first(1).push_first(2).push_first(3);
        assert_eq!(*t.peek_first().unwrap(), 3);
        assert_eq!(*t.peek_last().unwrap(), 1);
        assert_eq!(t.measure(), 3);
    }

    #[test]
    fn push_last_builds_in_order() {
        let mut t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        for i in 0..20 {
            t = t.push_last(i);
        }
        let seq: Vec<i32> = t.to_sequence().iter().map(|v| **v).collect();
        assert_eq!(seq, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn push_first_cascades_through_a_full_prefix() {
        // 5 elements force at least one cascade into the spine (prefix caps at 4).
        let mut t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        for i in (0..10).rev() {
            t = t.push_first(i);
        }
        let seq: Vec<i32> = t.to_sequence().iter().map(|v| **v).collect();
        assert_eq!(seq, (0..10).collect::<Vec<_>>());
        assert_eq!(t.measure(), 10);
    }

    #[test]
    fn pop_first_after_push_first_is_inverse() {
        let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        let t = t.push_first(1);
        let (x, rest) = t.pop_first().unwrap();
        assert_eq!(*x, 1);
        assert!(rest.is_empty());
    }

    #[test]
    fn pop_last_after_push_last_is_inverse() {
        let t: FingerTree<Count<i32>> = FingerTree::empty(Count::new());
        let t = t.push_last(1);
        let (rest, x) = t.pop_last().unwrap();
        assert_eq!(*x, 1);
        assert!(rest.is_empty());
    }

    #[test]
    fn from_sequence_round_trips_large_tree() {
        let t = FingerTree::from_sequence(Count::new(), 1..=1000);
        assert_eq!(*t.peek_first().unwrap(), 1);
        assert_eq!(*t.peek_last().unwrap(), 1000);
        assert_eq!(t.measure(), 1000);

        let mut rest = t;
        let mut out = Vec::new();
        while !rest.is_empty() {
            let (head, tail) = rest.pop_first().unwrap();
            out.push(*head);
            rest = tail;
        }
        assert_eq!(out, (1..=1000).collect::<Vec<_>>());
    }

    #[test]
    fn pop_draining_from_both_ends_meets_in_the_middle() {
        let mut t = FingerTree::from_sequence(Count::new(), 1..=100);
        let mut front = Vec::new();
        let mut back = Vec::new();
        for _ in 0..50 {
            let (x, rest) = t.pop_first().unwrap();
            front.push(*x);
            let (rest, y) = rest.pop_last().unwrap();
            back.push(*y);
            t = rest;
        }
        assert!(t.is_empty());
        back.reverse();
        let mut expected: Vec<i32> = (1..=100).collect();
        let expected_back = expected.split_off(50);
        assert_eq!(front, expected);
        assert_eq!(back, expected_back);
    }

    #[test]
    fn clone_shares_structure_and_is_independent() {
        let t = FingerTree::from_sequence(Count::new(), 1..=10);
        let t2 = t.clone();
        let t3 = t2.push_last(11);
        assert_eq!(t.measure(), 10);
        assert_eq!(t3.measure(), 11);
    }
}
