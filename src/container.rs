//! Ordered Container
//!
//! [`OrderedContainer`] is a singly-linked sequence. The cells of the chain
//! live in a [`CellArena`] owned by the container, and each live cell is
//! referenced by exactly one link: the head slot of the container or the
//! `next` link of its predecessor. The tail pointer is only a shortcut for
//! appending and never owns a cell.
//!
//! Cells are created only by [`append`](OrderedContainer::append), always at
//! the tail, and destroyed only by [`remove`](OrderedContainer::remove), which
//! hands the successor of the removed cell over to its predecessor (or to the
//! head slot). So the chain can never form a cycle.

use std::fmt;
use std::iter;

use tracing::{debug, trace};

use crate::cursor::{Cursor, Iter};
use crate::error::ContainerError;
use crate::fingerprint::{combine, ElementHash, FINGERPRINT_SEED};
use crate::infra::storage::{CellArena, CellPtr};

/// A link cell, owning one element and the link to the next cell.
pub(crate) struct Cell<T> {
    pub(crate) value: T,
    pub(crate) next: Option<CellPtr<Cell<T>>>,
}

pub(crate) type CellRef<T> = CellPtr<Cell<T>>;

/// An ordered, singly-linked container.
///
/// Indices are 0-based and the valid range is `[0, size)`. They are signed so
/// that a negative index is rejected with
/// [`ContainerError::IndexOutOfRange`] like any other out-of-range index.
///
/// # Examples
///
/// ```
/// use linkseq::OrderedContainer;
///
/// let mut container = OrderedContainer::new();
/// container.append("one");
/// container.append("two");
/// container.append("three");
///
/// assert_eq!(container.size(), 3);
/// assert_eq!(container.get(1), Ok(&"two"));
///
/// container.remove(1).unwrap();
/// assert_eq!(container.render(), "[one, three]");
/// ```
pub struct OrderedContainer<T> {
    /// The storage of all live cells.
    cells: CellArena<Cell<T>>,
    /// The first cell, [`None`] iff the container is empty.
    head: Option<CellRef<T>>,
    /// The last cell, [`None`] iff the container is empty.
    tail: Option<CellRef<T>>,
    /// The number of cells reachable from `head`.
    len: usize,
    /// Bumped by every structural mutation, checked by [`Cursor`].
    stamp: u64,
}

impl<T> Default for OrderedContainer<T> {
    fn default() -> Self {
        Self {
            cells: CellArena::default(),
            head: None,
            tail: None,
            len: 0,
            stamp: 0,
        }
    }
}

impl<T> OrderedContainer<T> {
    /// Create an empty container.
    pub fn new() -> Self { Self::default() }

    /// Add a value as the new last element.
    ///
    /// The tail is tracked, so this takes constant time.
    pub fn append(&mut self, value: T) {
        let cell = self.cells.alloc(Cell { value, next: None });

        match self.tail {
            Some(tail) => self.cells.deref_mut(tail).next = Some(cell),
            None => self.head = Some(cell),
        }

        self.tail = Some(cell);
        self.len += 1;
        self.touch();

        trace!(size = self.len, "appended element");
    }

    /// Get the element at `index`.
    ///
    /// # Returns
    ///
    /// - [`Ok`] with a reference to the element.
    /// - [`ContainerError::IndexOutOfRange`] if `index < 0` or
    ///   `index >= size`.
    pub fn get(&self, index: isize) -> Result<&T, ContainerError> {
        let index = self.check_index(index)?;
        let cell = self.cell_at(index);
        Ok(&self.cells.deref(cell).value)
    }

    /// Get a mutable reference to the element at `index`.
    ///
    /// Replacing an element in place does not change the structure, so
    /// outstanding [`Cursor`]s stay valid.
    pub fn get_mut(&mut self, index: isize) -> Result<&mut T, ContainerError> {
        let index = self.check_index(index)?;
        let cell = self.cell_at(index);
        Ok(&mut self.cells.deref_mut(cell).value)
    }

    /// Remove the element at `index` and return it.
    ///
    /// All later elements shift down by one position. The bounds check
    /// happens before any relinking, so an error leaves the container as it
    /// was.
    ///
    /// # Returns
    ///
    /// - [`Ok`] with the removed element.
    /// - [`ContainerError::IndexOutOfRange`] if `index < 0` or
    ///   `index >= size`.
    pub fn remove(&mut self, index: isize) -> Result<T, ContainerError> {
        let index = self.check_index(index)?;

        let (prev, target) = if index == 0 {
            let head = self.head.unwrap_or_else(|| unreachable!("non-empty container has a head"));
            (None, head)
        } else {
            let prev = self.cell_at(index - 1);
            let target = self
                .cells
                .deref(prev)
                .next
                .unwrap_or_else(|| unreachable!("index checked against length"));
            (Some(prev), target)
        };

        // the predecessor (or the head slot) adopts the successor of the target
        let next = self.cells.deref(target).next;
        match prev {
            Some(prev) => self.cells.deref_mut(prev).next = next,
            None => self.head = next,
        }

        if self.tail == Some(target) {
            self.tail = prev;
        }

        let cell = self
            .cells
            .try_dealloc(target)
            .unwrap_or_else(|| unreachable!("linked cell is not allocated"));

        self.len -= 1;
        self.touch();

        debug_assert_eq!(self.cells.len(), self.len);
        debug_assert_eq!(self.head.is_none(), self.tail.is_none());

        trace!(index, size = self.len, "removed element");

        Ok(cell.value)
    }

    /// Get the number of elements.
    pub fn size(&self) -> usize { self.len }

    /// If the container has no elements.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Create a lazy forward iterator starting at the current head.
    pub fn iter(&self) -> Iter<'_, T> { Iter::new(self, self.head, self.len) }

    /// Create a detached cursor starting at the current head.
    ///
    /// Unlike [`iter`](Self::iter), the cursor does not borrow the container,
    /// so the container may be mutated while the cursor is alive. The cursor
    /// detects that and refuses to continue.
    pub fn cursor(&self) -> Cursor<T> { Cursor::new(self.head, self.stamp) }

    /// Render the elements as `[e0, e1, ..., en-1]`.
    ///
    /// This is the same as the [`Display`](fmt::Display) output.
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        self.to_string()
    }

    /// Compute the order-sensitive fingerprint of the elements.
    ///
    /// Starting from `1`, every element in traversal order updates the
    /// accumulator as `acc * 31 + hash(element)`, wrapping on overflow.
    pub fn fingerprint(&self) -> i32
    where
        T: ElementHash,
    {
        self.fingerprint_with(T::element_hash)
    }

    /// Compute the fingerprint with a caller supplied element hash.
    pub fn fingerprint_with<F>(&self, mut hash: F) -> i32
    where
        F: FnMut(&T) -> i32,
    {
        self.iter()
            .fold(FINGERPRINT_SEED, |acc, value| combine(acc, hash(value)))
    }

    pub(crate) fn cells(&self) -> &CellArena<Cell<T>> { &self.cells }

    pub(crate) fn stamp(&self) -> u64 { self.stamp }

    fn touch(&mut self) { self.stamp = self.stamp.wrapping_add(1); }

    fn check_index(&self, index: isize) -> Result<usize, ContainerError> {
        match usize::try_from(index) {
            Ok(i) if i < self.len => Ok(i),
            _ => {
                debug!(index, size = self.len, "index out of range");
                Err(ContainerError::IndexOutOfRange {
                    index,
                    size: self.len,
                })
            }
        }
    }

    /// Walk from the head to the cell at a checked index.
    fn cell_at(&self, index: usize) -> CellRef<T> {
        iter::successors(self.head, |&cell| self.cells.deref(cell).next)
            .nth(index)
            .unwrap_or_else(|| unreachable!("index checked against length"))
    }
}

impl<T: Clone> Clone for OrderedContainer<T> {
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        for value in self {
            cloned.append(value.clone());
        }
        cloned
    }
}

impl<T: fmt::Display> fmt::Display for OrderedContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self).finish() }
}

impl<'a, T> IntoIterator for &'a OrderedContainer<T> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}
