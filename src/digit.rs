//! [`Digit`]: the 1–4 element prefix/suffix group at the ends of a `Deep` tree (spec §3, §4.2).

use smallvec::SmallVec;

use crate::measure::Measurer;
use crate::node::Elem;

/// An ordered group of 1 to 4 [`Elem`]s, with a cached left-to-right-folded measure.
///
/// Backed by an inline [`SmallVec`] (never spills to the heap — a `Digit` is capacity-4 by
/// construction), the same small-buffer-optimization idiom this codebase already uses for
/// bounded inline storage.
pub(crate) struct Digit<Mr: Measurer> {
    measure: Mr::Measure,
    items: SmallVec<[Elem<Mr>; 4]>,
}

impl<Mr> std::fmt::Debug for Digit<Mr>
where
    Mr: Measurer,
    Mr::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<Mr: Measurer> Clone for Digit<Mr> {
    fn clone(&self) -> Self {
        Digit {
            measure: self.measure.clone(),
            items: self.items.clone(),
        }
    }
}

impl<Mr: Measurer> Digit<Mr> {
    pub(crate) fn one(mr: &Mr, item: Elem<Mr>) -> Self {
        let measure = item.measure(mr);
        Digit {
            measure,
            items: smallvec::smallvec![item],
        }
    }

    /// Build a digit from 1–4 items, left to right. Panics (an internal invariant violation, not
    /// a user-reachable error) if `items` is empty or has more than 4 elements.
    pub(crate) fn from_vec(mr: &Mr, items: SmallVec<[Elem<Mr>; 4]>) -> Self {
        assert!(
            !items.is_empty() && items.len() <= 4,
            "Digit must have between 1 and 4 children, got {}",
            items.len()
        );
        let measure = mr.sum_all(items.iter().map(|e| e.measure(mr)));
        Digit { measure, items }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn measure(&self) -> Mr::Measure {
        self.measure.clone()
    }

    pub(crate) fn first(&self) -> &Elem<Mr> {
        &self.items[0]
    }

    pub(crate) fn last(&self) -> &Elem<Mr> {
        &self.items[self.items.len() - 1]
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Elem<Mr>> {
        self.items.iter()
    }

    pub(crate) fn into_items(self) -> SmallVec<[Elem<Mr>; 4]> {
        self.items
    }

    pub(crate) fn as_slice(&self) -> &[Elem<Mr>] {
        &self.items
    }

    /// `push-left` (spec §4.2). Valid only when `len() < 4`; callers (the end-operation cascade)
    /// always check this first since overflow triggers a cascade into the spine rather than a
    /// failed push.
    pub(crate) fn push_left(&self, mr: &Mr, item: Elem<Mr>) -> Self {
        debug_assert!(self.items.len() < 4, "pushing into a full digit");
        let mut items = SmallVec::with_capacity(self.items.len() + 1);
        items.push(item);
        items.extend(self.items.iter().cloned());
        let measure = mr.sum_all(items.iter().map(|e| e.measure(mr)));
        Digit { measure, items }
    }

    /// `push-right` (spec §4.2). Mirror of [`Digit::push_left`].
    pub(crate) fn push_right(&self, mr: &Mr, item: Elem<Mr>) -> Self {
        debug_assert!(self.items.len() < 4, "pushing into a full digit");
        let mut items = self.items.clone();
        items.push(item);
        let measure = mr.sum_all(items.iter().map(|e| e.measure(mr)));
        Digit { measure, items }
    }

    /// `pop-left` (spec §4.2): returns `(head, remaining digit)`, or `None` if popping would
    /// leave an empty digit — the caller handles that via the deep-L rebalance rule.
    pub(crate) fn pop_left(&self, mr: &Mr) -> Option<(Elem<Mr>, Digit<Mr>)> {
        if self.items.len() <= 1 {
            return None;
        }
        let head = self.items[0].clone();
        let rest: SmallVec<[Elem<Mr>; 4]> = self.items[1..].iter().cloned().collect();
        let measure = mr.sum_all(rest.iter().map(|e| e.measure(mr)));
        Some((head, Digit { measure, items: rest }))
    }

    /// `pop-right` (spec §4.2): mirror of [`Digit::pop_left`].
    pub(crate) fn pop_right(&self, mr: &Mr) -> Option<(Digit<Mr>, Elem<Mr>)> {
        if self.items.len() <= 1 {
            return None;
        }
        let last = self.items[self.items.len() - 1].clone();
        let rest: SmallVec<[Elem<Mr>; 4]> =
            self.items[..self.items.len() - 1].iter().cloned().collect();
        let measure = mr.sum_all(rest.iter().map(|e| e.measure(mr)));
        Some((Digit { measure, items: rest }, last))
    }

}
