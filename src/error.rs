use thiserror::Error;

/// The error type for the container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ContainerError {
    /// The index is negative or not less than the current size.
    ///
    /// The caller should revalidate the index against
    /// [`size`](crate::OrderedContainer::size) before retrying.
    #[error("index {index} out of range for container of size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: isize,
        /// The size of the container when the access was rejected.
        size: usize,
    },
    /// No more elements are available from the iterator or cursor.
    #[error("iterator exhausted")]
    IteratorExhausted,
    /// The container was mutated after the [`Cursor`](crate::Cursor) was
    /// created.
    #[error("container modified during cursor traversal")]
    ConcurrentModification,
}
