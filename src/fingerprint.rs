//! Element Hashing
//!
//! [`OrderedContainer::fingerprint`](crate::OrderedContainer::fingerprint)
//! folds one 32-bit hash per element into an order-sensitive accumulator. The
//! per-element hash comes from [`ElementHash`], which is derived structurally
//! from the value, so it is deterministic across runs and platforms (unlike
//! [`std::hash::Hash`] with a randomly seeded hasher).
//!
//! An absent element is modelled as [`None`] in an `OrderedContainer<Option<T>>`
//! and always hashes to `0`.

/// The multiplier of the fingerprint recurrence.
pub const FINGERPRINT_MULTIPLIER: i32 = 31;

/// The initial accumulator of the fingerprint recurrence.
pub const FINGERPRINT_SEED: i32 = 1;

/// A deterministic 32-bit hash of a single element.
pub trait ElementHash {
    /// Get the hash of this element.
    fn element_hash(&self) -> i32;
}

/// Combine one more element hash into the accumulator.
///
/// All arithmetic wraps on overflow.
pub fn combine(acc: i32, element_hash: i32) -> i32 {
    acc.wrapping_mul(FINGERPRINT_MULTIPLIER)
        .wrapping_add(element_hash)
}

/// Fold 64 bits into 32 by xor-ing the high half into the low half.
fn fold_u64(bits: u64) -> i32 { (bits ^ (bits >> 32)) as i32 }

macro_rules! impl_element_hash_narrow {
    ($($ty:ty),*) => {
        $(
            impl ElementHash for $ty {
                fn element_hash(&self) -> i32 { *self as i32 }
            }
        )*
    };
}

macro_rules! impl_element_hash_wide {
    ($($ty:ty),*) => {
        $(
            impl ElementHash for $ty {
                fn element_hash(&self) -> i32 { fold_u64(*self as u64) }
            }
        )*
    };
}

impl_element_hash_narrow!(i8, i16, i32, u8, u16, u32);
impl_element_hash_wide!(i64, u64, isize, usize);

impl ElementHash for char {
    fn element_hash(&self) -> i32 { *self as i32 }
}

impl ElementHash for bool {
    fn element_hash(&self) -> i32 {
        if *self {
            1231
        } else {
            1237
        }
    }
}

impl ElementHash for f32 {
    /// The bit pattern, with every NaN collapsed to the canonical one.
    fn element_hash(&self) -> i32 {
        if self.is_nan() {
            f32::NAN.to_bits() as i32
        } else {
            self.to_bits() as i32
        }
    }
}

impl ElementHash for f64 {
    fn element_hash(&self) -> i32 {
        if self.is_nan() {
            fold_u64(f64::NAN.to_bits())
        } else {
            fold_u64(self.to_bits())
        }
    }
}

impl ElementHash for str {
    /// Polynomial hash over the UTF-16 code units.
    fn element_hash(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |h, unit| combine(h, unit as i32))
    }
}

impl ElementHash for String {
    fn element_hash(&self) -> i32 { self.as_str().element_hash() }
}

impl<T: ElementHash> ElementHash for Option<T> {
    fn element_hash(&self) -> i32 {
        match self {
            Some(value) => value.element_hash(),
            None => 0,
        }
    }
}

impl<T: ElementHash + ?Sized> ElementHash for &T {
    fn element_hash(&self) -> i32 { (**self).element_hash() }
}

impl<T: ElementHash + ?Sized> ElementHash for Box<T> {
    fn element_hash(&self) -> i32 { (**self).element_hash() }
}
