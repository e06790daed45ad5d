//! [`Elem`], the depth-erased leaf-or-node value stored inside [`Digit`](crate::digit::Digit)s
//! and spine [`Node`](Elem)s (spec §3, "Rust-specific type note" in `SPEC_FULL.md` §3).
//!
//! The finger tree paper gives nodes a type that grows one level deeper per spine — `Node a =
//! Node2 v a a | Node3 v a a a`, with the spine holding a `FingerTree (Node a)`. Rust can't
//! express that recursion without unbounded monomorphization, so this crate folds leaf-or-node
//! into one self-recursive enum and lets depth be a runtime invariant instead of a type-level
//! one: a [`Digit`](crate::digit::Digit) feeding a spine only ever contains `Elem::Node2`/`Node3`
//! values, never a bare `Leaf`, and that's enforced by construction (only [`node2`]/[`node3`]
//! feed a spine) rather than checked.

use std::sync::Arc;

use crate::measure::Measurer;

/// A value living inside a [`Digit`](crate::digit::Digit): either a leaf element (depth 0) or a
/// 2- or 3-ary grouping of `Elem`s one level deeper.
///
/// Cloning an `Elem` only ever bumps an [`Arc`] refcount — it never duplicates user data or
/// recomputes a cached measure.
pub struct Elem<Mr: Measurer>(Repr<Mr>);

enum Repr<Mr: Measurer> {
    Leaf(Arc<Mr::Item>),
    Node2(Arc<NodeData2<Mr>>),
    Node3(Arc<NodeData3<Mr>>),
}

// `#[derive(Clone)]` would require `Mr: Clone` to hold for the derived impl bound, which it
// already does (`Measurer: Clone`), but it would also (incorrectly) require `Mr::Item: Clone`
// and `Mr::Measure: Clone` at the derive-macro level before considering that they're behind an
// `Arc`. Write it by hand instead.
impl<Mr: Measurer> Clone for Elem<Mr> {
    fn clone(&self) -> Self {
        Elem(match &self.0 {
            Repr::Leaf(v) => Repr::Leaf(Arc::clone(v)),
            Repr::Node2(n) => Repr::Node2(Arc::clone(n)),
            Repr::Node3(n) => Repr::Node3(Arc::clone(n)),
        })
    }
}

pub(crate) struct NodeData2<Mr: Measurer> {
    pub(crate) measure: Mr::Measure,
    pub(crate) a: Elem<Mr>,
    pub(crate) b: Elem<Mr>,
}

pub(crate) struct NodeData3<Mr: Measurer> {
    pub(crate) measure: Mr::Measure,
    pub(crate) a: Elem<Mr>,
    pub(crate) b: Elem<Mr>,
    pub(crate) c: Elem<Mr>,
}

impl<Mr: Measurer> Elem<Mr> {
    /// Wrap a single user element as a depth-0 leaf.
    pub(crate) fn leaf(item: Mr::Item) -> Self {
        Elem(Repr::Leaf(Arc::new(item)))
    }

    pub(crate) fn leaf_from_arc(item: Arc<Mr::Item>) -> Self {
        Elem(Repr::Leaf(item))
    }

    /// The cached measure of this element. O(1): never recomputed for `Node2`/`Node3`, and a
    /// single `Measurer::measure` call for `Leaf`.
    pub(crate) fn measure(&self, mr: &Mr) -> Mr::Measure {
        match &self.0 {
            Repr::Leaf(v) => mr.measure(v),
            Repr::Node2(n) => n.measure.clone(),
            Repr::Node3(n) => n.measure.clone(),
        }
    }

    /// `true` if this is a depth-0 leaf holding a user element directly.
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.0, Repr::Leaf(_))
    }

    /// Unwrap a leaf, or return it unchanged as an error if it's a node. Used by the top-level
    /// `peek_first`/`peek_last`/`pop_first`/`pop_last` once they've descended to depth 0.
    pub(crate) fn into_leaf(self) -> Result<Arc<Mr::Item>, Self> {
        match self.0 {
            Repr::Leaf(v) => Ok(v),
            other => Err(Elem(other)),
        }
    }

    pub(crate) fn as_leaf(&self) -> Option<&Mr::Item> {
        match &self.0 {
            Repr::Leaf(v) => Some(v),
            _ => None,
        }
    }

    /// Clone out the backing `Arc` of a leaf, without consuming `self`. Used by `to_sequence`,
    /// which needs an owned handle per element but otherwise only ever borrows the tree.
    pub(crate) fn as_leaf_arc(&self) -> Option<Arc<Mr::Item>> {
        match &self.0 {
            Repr::Leaf(v) => Some(Arc::clone(v)),
            _ => None,
        }
    }

    /// Borrow this node's children in order, without consuming `self`. Panics on a `Leaf` —
    /// callers only call this once they've already checked [`Elem::as_leaf`].
    pub(crate) fn child_refs(&self) -> smallvec::SmallVec<[&Elem<Mr>; 3]> {
        match &self.0 {
            Repr::Leaf(_) => unreachable!("child_refs called on a leaf element"),
            Repr::Node2(n) => smallvec::smallvec![&n.a, &n.b],
            Repr::Node3(n) => smallvec::smallvec![&n.a, &n.b, &n.c],
        }
    }

    /// Expand a node one level, handing back its 2 or 3 children as an iterator-friendly
    /// small collection. Panics if called on a `Leaf` — callers only ever call this while
    /// descending the spine, where every element is already known to be a node.
    pub(crate) fn into_children(self) -> smallvec::SmallVec<[Elem<Mr>; 3]> {
        match self.0 {
            Repr::Node2(n) => match Arc::try_unwrap(n) {
                Ok(n) => smallvec::smallvec![n.a, n.b],
                Err(n) => smallvec::smallvec![n.a.clone(), n.b.clone()],
            },
            Repr::Node3(n) => match Arc::try_unwrap(n) {
                Ok(n) => smallvec::smallvec![n.a, n.b, n.c],
                Err(n) => smallvec::smallvec![n.a.clone(), n.b.clone(), n.c.clone()],
            },
            Repr::Leaf(_) => unreachable!("into_children called on a leaf element"),
        }
    }
}

/// Build a 2-ary node, caching its measure as `mr.sum(a.measure(), b.measure())`.
pub(crate) fn node2<Mr: Measurer>(mr: &Mr, a: Elem<Mr>, b: Elem<Mr>) -> Elem<Mr> {
    let measure = mr.sum(&a.measure(mr), &b.measure(mr));
    Elem(Repr::Node2(Arc::new(NodeData2 { measure, a, b })))
}

/// Build a 3-ary node, caching its measure as `mr.sum(mr.sum(a, b), c)` (left-to-right fold, per
/// spec §3 invariant 3).
pub(crate) fn node3<Mr: Measurer>(mr: &Mr, a: Elem<Mr>, b: Elem<Mr>, c: Elem<Mr>) -> Elem<Mr> {
    let ab = mr.sum(&a.measure(mr), &b.measure(mr));
    let measure = mr.sum(&ab, &c.measure(mr));
    Elem(Repr::Node3(Arc::new(NodeData3 { measure, a, b, c })))
}

impl<Mr> std::fmt::Debug for Elem<Mr>
where
    Mr: Measurer,
    Mr::Item: std::fmt::Debug,
{
    /// Renders the *content* (the leaves, in order), not the physical node shape — matching this
    /// crate's convention of `Debug` describing semantic content over internal layout.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        fn push_leaves<'a, Mr: Measurer>(
            elem: &'a Elem<Mr>,
            list: &mut std::fmt::DebugList<'_, '_>,
        ) where
            Mr::Item: std::fmt::Debug,
        {
            match &elem.0 {
                Repr::Leaf(v) => {
                    list.entry(&**v);
                }
                Repr::Node2(n) => {
                    push_leaves(&n.a, list);
                    push_leaves(&n.b, list);
                }
                Repr::Node3(n) => {
                    push_leaves(&n.a, list);
                    push_leaves(&n.b, list);
                    push_leaves(&n.c, list);
                }
            }
        }
        push_leaves(self, &mut list);
        list.finish()
    }
}
