use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::{linked_sequence::LinkedSequence, node::Slot, position::Position};

/// Iterator over values front to back.
pub struct Iter<'a, T> {
    seq: &'a LinkedSequence<T>,
    next: Option<usize>,
    remaining: usize,
}

/// Iterator over mutable values front to back.
pub struct IterMut<'a, T> {
    slots: *mut Slot<T>,
    capacity: usize,
    next: Option<usize>,
    remaining: usize,
    marker: PhantomData<&'a mut T>,
}

/// Iterator over `(Position, &T)` front to back.
pub struct IterPositions<'a, T> {
    seq: &'a LinkedSequence<T>,
    next: Option<usize>,
    remaining: usize,
}

/// Owning iterator; pops values off the front.
pub struct IntoIter<T> {
    seq: LinkedSequence<T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(seq: &'a LinkedSequence<T>, head: Option<usize>, len: usize) -> Self {
        Iter {
            seq,
            next: head,
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            seq: self.seq,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.seq.node(self.next?);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slots: &'a mut [Slot<T>], head: Option<usize>, len: usize) -> Self {
        IterMut {
            slots: slots.as_mut_ptr(),
            capacity: slots.len(),
            next: head,
            remaining: len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        assert!(index < self.capacity, "link out of bounds");
        // SAFETY: `index` is in bounds and the storage is mutably borrowed for
        // 'a. The chain is acyclic, so each slot is visited at most once and
        // the references handed out never alias.
        let slot = unsafe { &mut *self.slots.add(index) };
        let node = slot.node_mut().expect("linked slot is occupied");
        self.next = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: IterMut behaves like `&'a mut [T]`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterPositions<'a, T> {
    pub(crate) fn new(seq: &'a LinkedSequence<T>, head: Option<usize>, len: usize) -> Self {
        IterPositions {
            seq,
            next: head,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for IterPositions<'a, T> {
    type Item = (Position, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let node = self.seq.node(index);
        self.next = node.next;
        self.remaining -= 1;
        Some((self.seq.position_of(index), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterPositions<'_, T> {}
impl<T> FusedIterator for IterPositions<'_, T> {}

impl<T> IntoIter<T> {
    pub(crate) fn new(seq: LinkedSequence<T>) -> Self {
        IntoIter { seq }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.seq.len(), Some(self.seq.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_is_exact_and_multi_pass() {
        let seq = LinkedSequence::from([1, 2, 3]);
        let mut it = seq.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some(&1));

        let fork = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), vec![&2, &3]);
        assert_eq!(fork.len(), 2);
        assert_eq!(fork.collect::<Vec<_>>(), vec![&2, &3]);
    }

    #[test]
    fn iter_mut_updates_in_chain_order() {
        let mut seq = LinkedSequence::new();
        seq.push_front(3).unwrap();
        seq.push_front(2).unwrap();
        seq.push_front(1).unwrap();
        for (i, v) in seq.iter_mut().enumerate() {
            *v *= 10 + i as i32;
        }
        assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![10, 22, 36]);

        for v in &mut seq {
            *v += 1;
        }
        assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![11, 23, 37]);
    }

    #[test]
    fn iter_positions_match_lookup() {
        let seq = LinkedSequence::from(["a", "b", "c"]);
        let mut expected = seq.begin();
        for (position, value) in seq.iter_positions() {
            assert_eq!(position, expected);
            assert_eq!(seq.get(position), Some(value));
            expected = seq.next_position(position).unwrap();
        }
        assert_eq!(expected, seq.end());
    }

    #[test]
    fn into_iter_drains_front_to_back() {
        let seq = LinkedSequence::from(vec![String::from("x"), String::from("y")]);
        let mut it = seq.into_iter();
        assert_eq!(it.len(), 2);
        assert_eq!(it.next().as_deref(), Some("x"));
        assert_eq!(it.len(), 1);
        drop(it);
    }
}
