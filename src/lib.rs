//! An ordered, singly-linked container.
//!
//! [`OrderedContainer`] supports appending at the tail, indexed access and
//! removal, forward iteration, rendering as `[e0, e1, ...]` and an
//! order-sensitive [fingerprint](OrderedContainer::fingerprint).

pub mod infra;

mod container;
mod cursor;
mod error;
mod fingerprint;

pub use container::OrderedContainer;
pub use cursor::{Cursor, Iter};
pub use error::ContainerError;
pub use fingerprint::{combine, ElementHash, FINGERPRINT_MULTIPLIER, FINGERPRINT_SEED};
