//! Concatenation (spec §4.5): `concat3`/`nodes_of`, and the public `concat`/`concat_all` surface.

use std::sync::Arc;

use crate::lazy::Lazy;
use crate::measure::Measurer;
use crate::node::{node2, node3, Elem};
use crate::tree::{deep, push_first, push_last, FingerTree, Repr};

/// Convert a flat run of 2–12 same-level children into a sequence of `Node2`/`Node3` elements
/// one level deeper, maximizing arity-3 nodes and never emitting arity 1 or 4 (spec §4.5's exact
/// table). Peels a `node3` off the front until 2, 3, or 4 children remain.
pub(crate) fn nodes_of<Mr: Measurer>(mr: &Mr, mut items: Vec<Elem<Mr>>) -> Vec<Elem<Mr>> {
    #[cfg(feature = "tracing")]
    tracing::trace!(children = items.len(), "nodes_of arity selection");

    let mut out = Vec::with_capacity(items.len() / 2 + 1);
    loop {
        match items.len() {
            0 | 1 => unreachable!("nodes_of called with fewer than 2 children"),
            2 => {
                let b = items.pop().expect("len == 2");
                let a = items.pop().expect("len == 1 after pop");
                out.push(node2(mr, a, b));
                return out;
            }
            3 => {
                let c = items.pop().expect("len == 3");
                let b = items.pop().expect("len == 2 after pop");
                let a = items.pop().expect("len == 1 after pop");
                out.push(node3(mr, a, b, c));
                return out;
            }
            4 => {
                let d = items.pop().expect("len == 4");
                let c = items.pop().expect("len == 3 after pop");
                let b = items.pop().expect("len == 2 after pop");
                let a = items.pop().expect("len == 1 after pop");
                out.push(node2(mr, a, b));
                out.push(node2(mr, c, d));
                return out;
            }
            _ => {
                let rest = items.split_off(3);
                let mut head = items;
                items = rest;
                let c = head.pop().expect("head has 3 items");
                let b = head.pop().expect("head has 2 items");
                let a = head.pop().expect("head has 1 item");
                out.push(node3(mr, a, b, c));
            }
        }
    }
}

fn prepend_all<Mr: Measurer>(mr: &Mr, middle: Vec<Elem<Mr>>, mut right: Repr<Mr>) -> Repr<Mr> {
    for item in middle.into_iter().rev() {
        right = push_first(mr, right, item);
    }
    right
}

fn append_all<Mr: Measurer>(mr: &Mr, mut left: Repr<Mr>, middle: Vec<Elem<Mr>>) -> Repr<Mr> {
    for item in middle {
        left = push_last(mr, left, item);
    }
    left
}

/// Build the lazy middle spine for a `Deep`+`Deep` concat: `lazy concat(sl, nodes_of(...), sr)`
/// (spec §4.5), without forcing either input spine.
fn cascade_concat<Mr: Measurer>(
    mr: &Mr,
    sl: Arc<Lazy<Mr>>,
    nodes: Vec<Elem<Mr>>,
    sr: Arc<Lazy<Mr>>,
) -> Arc<Lazy<Mr>> {
    let mr_owned = mr.clone();
    let nodes_measure = mr.sum_all(nodes.iter().map(|n| n.measure(mr)));
    let measure = mr.sum(&mr.sum(&sl.measure(), &nodes_measure), &sr.measure());
    Lazy::suspended(measure, move || {
        let left = sl.force().clone();
        let right = sr.force().clone();
        concat3(&mr_owned, left, nodes, right)
    })
}

/// `concat(left, middle, right)` (spec §4.5). `middle` holds 0–8 elements arising during
/// recursion; the public entry point always calls this with an empty `middle`.
pub(crate) fn concat3<Mr: Measurer>(
    mr: &Mr,
    left: Repr<Mr>,
    middle: Vec<Elem<Mr>>,
    right: Repr<Mr>,
) -> Repr<Mr> {
    match (left, right) {
        (Repr::Empty, right) => prepend_all(mr, middle, right),
        (left, Repr::Empty) => append_all(mr, left, middle),
        (Repr::Single(x), right) => {
            let absorbed = prepend_all(mr, middle, right);
            push_first(mr, absorbed, x)
        }
        (left, Repr::Single(y)) => {
            let absorbed = append_all(mr, left, middle);
            push_last(mr, absorbed, y)
        }
        (
            Repr::Deep {
                prefix: pl,
                spine: sl,
                suffix: fl,
                ..
            },
            Repr::Deep {
                prefix: pr,
                spine: sr,
                suffix: fr,
                ..
            },
        ) => {
            let mut combined: Vec<Elem<Mr>> = fl.into_items().into_iter().collect();
            combined.extend(middle);
            combined.extend(pr.into_items());
            let nodes = nodes_of(mr, combined);
            let spine = cascade_concat(mr, sl, nodes, sr);
            deep(mr, pl, spine, fr)
        }
    }
}

impl<Mr: Measurer> FingerTree<Mr> {
    /// Concatenate `self` and `other`, preserving order. O(log(min(|self|, |other|))).
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let repr = concat3(&self.mr, self.repr.clone(), Vec::new(), other.repr.clone());
        FingerTree {
            mr: self.mr.clone(),
            repr,
        }
    }

    /// Concatenate every tree in `trees`, in order. Folds from an `empty` accumulator seeded
    /// with the first tree's measurer, so the first tree's elements are never double-counted
    /// (the accumulator starts at measure ε). `None` if `trees` is empty — there is then no
    /// measurer to seed a result with.
    pub fn concat_all<I>(trees: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = trees.into_iter();
        let first = iter.next()?;
        let seed = FingerTree::empty(first.mr.clone());
        let mut acc = seed.concat(&first);
        for tree in iter {
            acc = acc.concat(&tree);
        }
        Some(acc)
    }
}
