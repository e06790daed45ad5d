//! [`Lazy`]: the suspended spine of a `Deep` tree (spec §3, §4.8, §5).
//!
//! Only the spine field of a `Deep` node is lazy. The thunk carries its measure up front (so a
//! `Deep`'s own cached measure never has to force its spine to compute `prefix ⊕ spine ⊕
//! suffix`), and memoizes its result so repeated forcing — e.g. repeated `peek_first` calls
//! walking the same path — doesn't redo work.
//!
//! A spine thunk needs an "exactly once, safe under concurrent forcing" guarantee. Rather than
//! hand-roll that with raw atomics and `UnsafeCell`, this reaches for the `std` equivalent of that
//! idiom — [`OnceLock`] — guarded by a lock (`parking_lot::Mutex`) around the one-shot producer
//! closure, matching discipline (b) from spec §5 ("guard the force with a one-shot lock").
//!
//! A `Lazy` is always stored behind an [`Arc`] by its owning `Deep` (see [`crate::tree::Repr`]),
//! so sharing a spine across structurally-shared trees is a plain refcount bump — [`Lazy`]
//! itself never needs to be cloned or re-suspended.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::measure::Measurer;
use crate::tree::Repr;

type Producer<Mr> = Box<dyn FnOnce() -> Repr<Mr> + Send>;

/// A suspended, memoized [`Repr`] one spine level deeper than its enclosing `Deep`.
pub(crate) struct Lazy<Mr: Measurer> {
    measure: Mr::Measure,
    cell: OnceLock<Repr<Mr>>,
    producer: Mutex<Option<Producer<Mr>>>,
}

impl<Mr: Measurer> Lazy<Mr> {
    /// Wrap an already-built [`Repr`] — no suspension, just a forced `Lazy`. Used when a spine
    /// value is cheap to construct immediately (e.g. the empty spine under a freshly-built
    /// `Deep`).
    pub(crate) fn forced(measure: Mr::Measure, repr: Repr<Mr>) -> Arc<Self> {
        let cell = OnceLock::new();
        let _ = cell.set(repr);
        Arc::new(Lazy {
            measure,
            cell,
            producer: Mutex::new(None),
        })
    }

    /// Suspend a computation of the next spine level. `measure` must equal the measure that
    /// `producer` will eventually compute — the whole point of laziness here is that callers
    /// never need to force the thunk just to learn its measure.
    pub(crate) fn suspended<F>(measure: Mr::Measure, producer: F) -> Arc<Self>
    where
        F: FnOnce() -> Repr<Mr> + Send + 'static,
    {
        Arc::new(Lazy {
            measure,
            cell: OnceLock::new(),
            producer: Mutex::new(Some(Box::new(producer))),
        })
    }

    /// The spine's cached measure, without forcing.
    pub(crate) fn measure(&self) -> Mr::Measure {
        self.measure.clone()
    }

    /// Force the thunk, memoizing the result. Safe under concurrent callers: [`OnceLock`]
    /// guarantees the producer closure runs to completion at most once, with every other caller
    /// blocking until that run finishes and then observing its result.
    pub(crate) fn force(&self) -> &Repr<Mr> {
        self.cell.get_or_init(|| {
            #[cfg(feature = "tracing")]
            tracing::trace!("forcing finger tree spine");

            let producer = self
                .producer
                .lock()
                .take()
                .expect("Lazy forced without a cached value or a producer — forced twice?");
            producer()
        })
    }
}
