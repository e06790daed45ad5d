//! A persistent, immutable, lazily-evaluated finger tree, parameterized by a user-supplied
//! measurement monoid ([`Measurer`]). Amortized O(1) push/pop at both ends, O(log n)
//! concatenation, and O(log n) splitting by any monotone predicate over accumulated
//! measurements.
//!
//! With different measurers the same structure yields random-access sequences
//! ([`measures::Count`]), priority queues ([`measures::Max`]), or anything else expressible as a
//! monoid fold over a sequence — see [`Measurer`].
//!
//! ```
//! use finger_tree::FingerTree;
//! use finger_tree::measures::{self, Count};
//!
//! let t = FingerTree::from_sequence(Count::new(), 1..=5);
//! assert_eq!(measures::len(&t), 5);
//! assert_eq!(*t.peek_first().unwrap(), 1);
//! assert_eq!(*t.peek_last().unwrap(), 5);
//! ```

mod concat;
mod digit;
mod error;
mod iter;
mod lazy;
mod measure;
pub mod measures;
mod node;
#[cfg(feature = "serde")]
mod serde_impls;
mod split;
mod tree;

pub use error::FingerTreeError;
pub use measure::Measurer;
pub use tree::FingerTree;
