//! A singly-linked sequence with constant-time front operations and
//! constant-time insertion and removal after a checked [`Position`].
//!
//! ```
//! use linked_sequence::LinkedSequence;
//!
//! let mut seq = LinkedSequence::from([1, 3]);
//! let first = seq.begin();
//! seq.insert_after(first, 2).unwrap();
//! assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//!
//! seq.erase_after(seq.before_begin()).unwrap();
//! assert_eq!(seq.front(), Some(&2));
//! assert!(seq.get(first).is_none());
//! ```

mod cursor;
mod errors;
mod iter;
mod linked_sequence;
mod node;
mod position;
#[cfg(feature = "serde")]
mod serde_impl;

pub use cursor::{Cursor, CursorMut};
pub use errors::{Result, SequenceError};
pub use iter::{IntoIter, Iter, IterMut, IterPositions};
pub use linked_sequence::{swap, LinkedSequence};
pub use position::Position;
