//! Forward traversal over an [`OrderedContainer`].
//!
//! - [`Iter`] borrows the container. It is the lazy single-pass view behind
//!   [`OrderedContainer::iter`] and `for` loops. The borrow checker forbids
//!   mutating the container while it is alive.
//! - [`Cursor`] does not borrow the container, the container is passed in on
//!   every step instead. The container may be mutated between steps, and the
//!   cursor fails with [`ContainerError::ConcurrentModification`] when it is.
//!
//! Both offer the explicit `has_next` / `take_next` protocol, where taking
//! from an exhausted traversal fails with
//! [`ContainerError::IteratorExhausted`].

use std::iter::FusedIterator;

use crate::container::{CellRef, OrderedContainer};
use crate::error::ContainerError;

/// A forward iterator over the elements of an [`OrderedContainer`].
///
/// # Lifetimes
///
/// - `a`: The lifetime of the borrowed container.
pub struct Iter<'a, T> {
    container: &'a OrderedContainer<T>,
    /// The next-to-visit cell.
    curr: Option<CellRef<T>>,
    /// The number of elements not yet visited.
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(
        container: &'a OrderedContainer<T>,
        head: Option<CellRef<T>>,
        remaining: usize,
    ) -> Self {
        Self {
            container,
            curr: head,
            remaining,
        }
    }

    /// If there are more elements to visit.
    pub fn has_next(&self) -> bool { self.curr.is_some() }

    /// Take the next element and advance by one cell.
    ///
    /// # Returns
    ///
    /// - [`Ok`] with the next element.
    /// - [`ContainerError::IteratorExhausted`] if there are no more elements.
    pub fn take_next(&mut self) -> Result<&'a T, ContainerError> {
        let curr = self.curr.ok_or(ContainerError::IteratorExhausted)?;
        let cell = self.container.cells().deref(curr);
        self.curr = cell.next;
        self.remaining -= 1;
        Ok(&cell.value)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> { self.take_next().ok() }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            curr: self.curr,
            remaining: self.remaining,
        }
    }
}

/// A detached forward cursor over an [`OrderedContainer`].
///
/// There is no lifetime parameter for the cursor, because the cursor does not
/// reference the container directly. The cursor must only be used with the
/// container that created it.
///
/// # Examples
///
/// ```
/// use linkseq::{ContainerError, OrderedContainer};
///
/// let mut container = OrderedContainer::new();
/// container.append(1);
/// container.append(2);
///
/// let mut cursor = container.cursor();
/// assert_eq!(cursor.take_next(&container), Ok(&1));
///
/// container.append(3);
/// assert_eq!(
///     cursor.take_next(&container),
///     Err(ContainerError::ConcurrentModification)
/// );
/// ```
pub struct Cursor<T> {
    /// The next-to-visit cell.
    curr: Option<CellRef<T>>,
    /// The modification stamp of the container when the cursor was created.
    stamp: u64,
}

impl<T> Cursor<T> {
    pub(crate) fn new(head: Option<CellRef<T>>, stamp: u64) -> Self { Self { curr: head, stamp } }

    /// If there are more elements to visit, as of the last step.
    pub fn has_next(&self) -> bool { self.curr.is_some() }

    /// Take the next element from `container` and advance by one cell.
    ///
    /// # Returns
    ///
    /// - [`Ok`] with the next element.
    /// - [`ContainerError::ConcurrentModification`] if the container was
    ///   appended to or removed from since the cursor was created.
    /// - [`ContainerError::IteratorExhausted`] if there are no more elements.
    pub fn take_next<'a>(
        &mut self,
        container: &'a OrderedContainer<T>,
    ) -> Result<&'a T, ContainerError> {
        if container.stamp() != self.stamp {
            return Err(ContainerError::ConcurrentModification);
        }

        let curr = self.curr.ok_or(ContainerError::IteratorExhausted)?;
        let cell = container
            .cells()
            .try_deref(curr)
            .ok_or(ContainerError::ConcurrentModification)?;
        self.curr = cell.next;
        Ok(&cell.value)
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            curr: self.curr,
            stamp: self.stamp,
        }
    }
}
