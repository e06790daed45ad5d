//! Error kinds raised at the public boundary of a [`FingerTree`](crate::tree::FingerTree).
//!
//! All of these are programmer errors (spec §7): the core does not retry or
//! propagate partial work, it aborts the single offending operation.

/// Errors raised by the public surface of a [`FingerTree`](crate::tree::FingerTree).
#[derive(Debug, thiserror::Error)]
pub enum FingerTreeError {
    /// `pop_first`/`pop_last`/`peek_first`/`peek_last` called on an empty tree.
    #[error("operation requires a non-empty tree")]
    EmptyTree,

    /// A value was supplied where a [`Measurer`](crate::measure::Measurer) was required, but it
    /// does not behave like one (only checked at public-entry points; internal code trusts its
    /// `Measurer`).
    #[error("supplied measurer does not satisfy the monoid contract")]
    BadMeasurer,

    /// Reserved for operations that are syntactically public but semantically illegal at the
    /// tree's current shape. Currently unreachable from any public API in this crate, but kept
    /// as a distinct variant so callers can match on it without a wildcard arm silently
    /// swallowing a future addition.
    #[error("operation is not supported in the tree's current shape")]
    Unsupported,

    /// An internal invariant (e.g. "a `Deep` digit is never empty") was violated. This can only
    /// happen as a result of a bug in this crate, or a `Measurer` impl that isn't a lawful
    /// monoid; it is checked defensively at a handful of boundary points rather than assumed
    /// impossible.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
}
