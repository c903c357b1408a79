use core::fmt;

use crate::{errors::Result, linked_sequence::LinkedSequence, position::Position};

/// A read-only cursor over a [`LinkedSequence`].
///
/// Cursors are cheap to copy and every copy advances independently.
pub struct Cursor<'a, T> {
    seq: &'a LinkedSequence<T>,
    position: Position,
}

/// A cursor that can modify the value it is on and the links after it.
pub struct CursorMut<'a, T> {
    seq: &'a mut LinkedSequence<T>,
    position: Position,
}

/// Step `position` forward, failing fast on a past-the-end cursor.
fn advance<T>(seq: &LinkedSequence<T>, position: Position) -> Position {
    match seq.next_position(position) {
        Ok(next) => next,
        Err(err) => panic!("cannot advance cursor: {err}"),
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(seq: &'a LinkedSequence<T>, position: Position) -> Self {
        Cursor { seq, position }
    }

    /// The position the cursor is on.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Is the cursor past the end?
    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// The value under the cursor; `None` before the first node and past the end.
    pub fn current(&self) -> Option<&'a T> {
        self.seq.get(self.position)
    }

    /// The value after the cursor, without moving.
    pub fn peek_next(&self) -> Option<&'a T> {
        let next = self.seq.next_position(self.position).ok()?;
        self.seq.get(next)
    }

    /// Move to the next node.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is past the end.
    pub fn move_next(&mut self) -> &mut Self {
        self.position = advance(self.seq, self.position);
        self
    }

    /// Move to the next node, returning the cursor as it was before the move.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is past the end.
    pub fn post_advance(&mut self) -> Self {
        let old = *self;
        self.move_next();
        old
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(seq: &'a mut LinkedSequence<T>, position: Position) -> Self {
        CursorMut { seq, position }
    }

    /// The position the cursor is on.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Is the cursor past the end?
    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// The value under the cursor; `None` before the first node and past the end.
    pub fn current(&self) -> Option<&T> {
        self.seq.get(self.position)
    }

    /// Mutable access to the value under the cursor.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.seq.get_mut(self.position)
    }

    /// Move to the next node.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is past the end.
    pub fn move_next(&mut self) -> &mut Self {
        self.position = advance(self.seq, self.position);
        self
    }

    /// Move to the next node, returning the position it was on before the move.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is past the end.
    pub fn post_advance(&mut self) -> Position {
        let old = self.position;
        self.move_next();
        old
    }

    /// Borrow as a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.seq, self.position)
    }

    /// Insert a value after the cursor. The cursor does not move.
    pub fn insert_after(&mut self, value: T) -> Result<Position> {
        self.seq.insert_after(self.position, value)
    }

    /// Remove the value after the cursor. The cursor does not move.
    pub fn remove_after(&mut self) -> Result<T> {
        self.seq.remove_after(self.position)
    }
}

impl<'b, T> PartialEq<Cursor<'b, T>> for Cursor<'_, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'b, T> PartialEq<CursorMut<'b, T>> for Cursor<'_, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.position == other.position
    }
}

impl<'b, T> PartialEq<Cursor<'b, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.position == other.position
    }
}

impl<'b, T> PartialEq<CursorMut<'b, T>> for CursorMut<'_, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.position == other.position
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("current", &self.current())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position)
            .field("current", &self.current())
            .finish()
    }
}
