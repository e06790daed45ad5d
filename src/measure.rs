//! The [`Measurer`] contract: the user-supplied monoid that makes a [`FingerTree`] more than an
//! unordered bag of values (spec §4.1).
//!
//! A `Measurer` is a small, cheaply-[`Clone`]able value carrying three pure, total operations:
//! `identity`, `measure`, and `sum`. It must satisfy the monoid laws — `sum(identity(), x) ==
//! sum(x, identity()) == x`, and `sum` must be associative — or tree invariants silently stop
//! holding; this crate does not and cannot detect a lawless `Measurer`.
//!
//! [`FingerTree`]: crate::tree::FingerTree

/// A monoid over measurements of `Self::Item`, supplied once per [`FingerTree`](crate::tree::FingerTree)
/// and propagated through every tree derived from it.
///
/// Implementations are typically zero-sized marker types (see [`crate::measures`]) so that
/// cloning a `Measurer` alongside a tree is free.
///
/// `Measurer` (and its associated types) is bound by `Send + Sync + 'static`: spec §5 requires
/// that trees "may be shared read-only across threads", and the lazy spine's suspended producer
/// closures capture a `Measurer` and elements across a potential thread boundary when forced.
/// Rather than thread that bound through every function in this crate individually, it's baked
/// into the trait itself.
pub trait Measurer: Clone + Send + Sync + 'static {
    /// The element type stored in the tree.
    type Item: Send + Sync;

    /// The monoid value accumulated over elements. Must be cheap to [`Clone`] — it's cached at
    /// every [`Digit`](crate::digit::Digit), [`Node`](crate::node::Elem), and spine boundary.
    type Measure: Clone + Send + Sync;

    /// The monoid identity, ε.
    fn identity(&self) -> Self::Measure;

    /// Measure a single freshly-introduced element.
    fn measure(&self, item: &Self::Item) -> Self::Measure;

    /// Combine two measurements, `a ⊕ b`. Not required to be commutative, but must be
    /// associative and have `identity()` as its two-sided identity.
    fn sum(&self, a: &Self::Measure, b: &Self::Measure) -> Self::Measure;

    /// Left-to-right fold of `sum` over an iterator of measurements, starting from `identity()`.
    /// A default built on `sum`/`identity`; override only if a `Measurer` can do better than a
    /// naive fold (e.g. batch accumulation).
    fn sum_all<I>(&self, measures: I) -> Self::Measure
    where
        I: IntoIterator<Item = Self::Measure>,
    {
        measures
            .into_iter()
            .fold(self.identity(), |acc, m| self.sum(&acc, &m))
    }
}
