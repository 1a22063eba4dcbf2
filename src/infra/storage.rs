//! Cell Storage
//!
//! This module provides [`CellArena`] and [`CellPtr`], the storage behind the
//! link chain of an [`OrderedContainer`](crate::OrderedContainer).
//!
//! Cells are addressed by index instead of being boxed one inside another, so
//! the chain never needs recursive ownership types. Each arena belongs to
//! exactly one container, and the container is the only holder of pointers
//! into it.
//!
//! A deallocated slot goes onto a free list and is reused by the next
//! allocation. The pointers are not generational, so a pointer must not be
//! used after its slot has been deallocated.

use std::marker::PhantomData;
use std::{fmt, mem};

/// A pointer to a cell stored in a [`CellArena`].
///
/// The pointer can only be allocated by [`CellArena`]. The internal of this
/// pointer is a raw index into the arena.
pub struct CellPtr<Data> {
    /// The raw index of the pointer.
    index: usize,
    _phantom: PhantomData<Data>,
}

impl<Data> CellPtr<Data> {
    fn from_index(index: usize) -> Self {
        Self {
            index,
            _phantom: PhantomData,
        }
    }

    /// Get the raw index of the pointer.
    pub fn index(self) -> usize { self.index }
}

impl<Data> Clone for CellPtr<Data> {
    fn clone(&self) -> Self { *self }
}

impl<Data> Copy for CellPtr<Data> {}

impl<Data> PartialEq for CellPtr<Data> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<Data> Eq for CellPtr<Data> {}

impl<Data> fmt::Debug for CellPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "*{}", self.index) }
}

/// A slot in a cell arena.
enum Slot<Data> {
    /// The slot is vacant.
    ///
    /// The free list is ordered by de-allocation, the last deallocated slot
    /// will be the first one reused.
    Vacant {
        /// The index of the next vacant slot.
        next: Option<usize>,
    },
    /// The slot is occupied.
    Occupied(Data),
}

/// An index-based arena with a free list.
///
/// # Examples
///
/// ```
/// use linkseq::infra::storage::CellArena;
///
/// let mut arena = CellArena::default();
///
/// let one = arena.alloc(1);
/// let two = arena.alloc(2);
/// assert_ne!(one, two);
///
/// *arena.deref_mut(two) = 3;
/// assert_eq!(arena.try_deref(two), Some(&3));
///
/// assert_eq!(arena.try_dealloc(one), Some(1));
/// assert_eq!(arena.try_deref(one), None);
/// assert_eq!(arena.len(), 1);
/// ```
pub struct CellArena<Data> {
    /// The slots in the arena.
    slots: Vec<Slot<Data>>,
    /// The head of the free list, also the last deallocated slot.
    free_head: Option<usize>,
    /// The number of occupied slots.
    live: usize,
}

impl<Data> Default for CellArena<Data> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }
}

impl<Data> CellArena<Data> {
    /// Store data into the arena and return the allocated pointer.
    pub fn alloc(&mut self, data: Data) -> CellPtr<Data> {
        self.live += 1;
        match self.free_head.take() {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free_head = match slot {
                    // the vacant slot is taken, so its successor becomes the new `free_head`
                    Slot::Vacant { next } => *next,
                    Slot::Occupied(_) => unreachable!("occupied slot on the free list"),
                };
                *slot = Slot::Occupied(data);
                CellPtr::from_index(index)
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot::Occupied(data));
                CellPtr::from_index(index)
            }
        }
    }

    /// Deallocate the data of the pointer from the arena.
    ///
    /// # Returns
    ///
    /// - `Some(Data)`: The data of the deallocated pointer.
    /// - `None`: The pointer is invalid, nothing is changed.
    pub fn try_dealloc(&mut self, ptr: CellPtr<Data>) -> Option<Data> {
        match self.slots.get(ptr.index)? {
            Slot::Vacant { .. } => return None,
            Slot::Occupied(_) => {}
        }
        let old = mem::replace(
            &mut self.slots[ptr.index],
            Slot::Vacant {
                next: self.free_head,
            },
        );
        self.free_head = Some(ptr.index);
        self.live -= 1;
        match old {
            Slot::Occupied(data) => Some(data),
            Slot::Vacant { .. } => unreachable!(),
        }
    }

    /// Try to dereference a pointer.
    ///
    /// # Returns
    ///
    /// - `Some(&Data)`: A reference to the data in the arena.
    /// - `None`: The pointer is invalid.
    pub fn try_deref(&self, ptr: CellPtr<Data>) -> Option<&Data> {
        match self.slots.get(ptr.index)? {
            Slot::Occupied(data) => Some(data),
            Slot::Vacant { .. } => None,
        }
    }

    /// Try to mutably dereference a pointer.
    pub fn try_deref_mut(&mut self, ptr: CellPtr<Data>) -> Option<&mut Data> {
        match self.slots.get_mut(ptr.index)? {
            Slot::Occupied(data) => Some(data),
            Slot::Vacant { .. } => None,
        }
    }

    /// Convenient method to dereference a pointer known to be live.
    pub fn deref(&self, ptr: CellPtr<Data>) -> &Data {
        self.try_deref(ptr).expect("invalid pointer dereferenced")
    }

    /// Convenient method to mutably dereference a pointer known to be live.
    pub fn deref_mut(&mut self, ptr: CellPtr<Data>) -> &mut Data {
        self.try_deref_mut(ptr)
            .expect("invalid pointer dereferenced")
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize { self.live }

    /// If no slot is occupied.
    pub fn is_empty(&self) -> bool { self.live == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_arena() {
        let mut arena = CellArena::default();
        let ptr1 = arena.alloc(1);
        let ptr2 = arena.alloc(2);
        let ptr3 = arena.alloc(3);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.try_deref(ptr1), Some(&1));
        assert_eq!(arena.try_deref(ptr2), Some(&2));
        assert_eq!(arena.try_deref(ptr3), Some(&3));

        assert_eq!(arena.try_dealloc(ptr2), Some(2));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.try_deref(ptr2), None);

        let ptr4 = arena.alloc(4);
        // not a generational arena, so ptr4 reuses the slot of ptr2
        assert_eq!(ptr2, ptr4);
        assert_eq!(arena.try_deref(ptr4), Some(&4));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_cell_arena_free_list_order() {
        let mut arena = CellArena::default();
        let ptr1 = arena.alloc('a');
        let ptr2 = arena.alloc('b');
        let _ptr3 = arena.alloc('c');

        arena.try_dealloc(ptr1).unwrap();
        arena.try_dealloc(ptr2).unwrap();

        // the last deallocated slot is reused first
        assert_eq!(arena.alloc('d'), ptr2);
        assert_eq!(arena.alloc('e'), ptr1);
        assert_eq!(arena.alloc('f').index(), 3);
    }

    #[test]
    fn test_cell_arena_double_free() {
        let mut arena = CellArena::default();
        let ptr1 = arena.alloc(1);
        assert_eq!(arena.try_dealloc(ptr1), Some(1));
        assert_eq!(arena.try_dealloc(ptr1), None);
        assert!(arena.is_empty());

        // the double free must not corrupt the free list
        let ptr2 = arena.alloc(2);
        let ptr3 = arena.alloc(3);
        assert_ne!(ptr2, ptr3);
    }

    #[test]
    fn test_cell_arena_invalid_index() {
        let mut arena = CellArena::default();
        let ptr1 = arena.alloc(1);
        let mut ptr2 = ptr1;
        ptr2.index = 1; // should not happen in normal usage
        assert_eq!(arena.try_dealloc(ptr2), None);
        assert_eq!(arena.try_deref(ptr2), None);
        assert_eq!(arena.try_deref_mut(ptr2), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_cell_arena_deref_mut() {
        let mut arena = CellArena::default();
        let ptr1 = arena.alloc(String::from("one"));
        arena.deref_mut(ptr1).push('!');
        assert_eq!(arena.deref(ptr1), "one!");
    }
}
