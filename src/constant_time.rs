// Copyright 2015-2016 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHORS DISCLAIM ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR ANY
// SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION
// OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN
// CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

//! Constant-time operations.

use crate::error;

/// Returns `Ok(())` if `a == b` and `Err(error::Unspecified)` otherwise.
/// The comparison of `a` and `b` is done in constant time with respect to the
/// contents of each, but NOT in constant time with respect to the lengths of
/// `a` and `b`.
pub fn verify_slices_are_equal(a: &[u8], b: &[u8]) -> Result<(), error::Unspecified> {
    verify_equal(a.iter().copied(), b.iter().copied())
}

/// Types that have a zero value.
pub(crate) trait Zero {
    /// The zero value.
    fn zero() -> Self;
}

/// All operations in the supertraits are assumed to be constant time.
pub(crate) trait CryptoValue:
    Zero
    + Into<CryptoWord>
    + core::ops::BitXor<Self, Output = Self>
    + core::ops::BitOr<Self, Output = Self>
{
}

impl Zero for u8 {
    fn zero() -> Self {
        0
    }
}

impl CryptoValue for u8 {}

impl Zero for u32 {
    fn zero() -> Self {
        0
    }
}

impl CryptoValue for u32 {}

#[inline]
pub(crate) fn verify_equal<T>(
    a: impl ExactSizeIterator<Item = T>,
    b: impl ExactSizeIterator<Item = T>,
) -> Result<(), error::Unspecified>
where
    T: CryptoValue,
{
    if a.len() != b.len() {
        return Err(error::Unspecified);
    }
    let zero_if_equal = a.zip(b).fold(T::zero(), |accum, (a, b)| accum | (a ^ b));
    match value_barrier_w(zero_if_equal.into()) {
        0 => Ok(()),
        _ => Err(error::Unspecified),
    }
}

/// The integer type that's the "natural" unsigned machine word size.
pub type CryptoWord = CryptoWord_;

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        type CryptoWord_ = u64;
    } else {
        type CryptoWord_ = u32;
    }
}

// Hides `a` from the optimizer so that the fold above is not turned into an
// early-exit comparison.
#[inline(never)]
fn value_barrier_w(a: CryptoWord) -> CryptoWord {
    core::hint::black_box(a)
}

/// Returns an all-ones mask if `a == 0` and an all-zeros mask otherwise.
#[inline]
pub(crate) fn is_zero_mask_w(a: CryptoWord) -> CryptoWord {
    let a = value_barrier_w(a);
    // The top bit of `!a & (a - 1)` is set only when `a` is zero.
    let top = (!a & a.wrapping_sub(1)) >> (CryptoWord::BITS - 1);
    top.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_slices_are_equal() {
        assert_eq!(verify_slices_are_equal(b"", b""), Ok(()));
        assert_eq!(verify_slices_are_equal(b"abc", b"abc"), Ok(()));
        assert_eq!(
            verify_slices_are_equal(b"abc", b"abd"),
            Err(error::Unspecified)
        );
        assert_eq!(
            verify_slices_are_equal(b"abc", b"ab"),
            Err(error::Unspecified)
        );
    }

    #[test]
    fn test_verify_equal_words() {
        let a = [1u32, 2, 0x8000_0000];
        let mut b = a;
        assert!(verify_equal(a.iter().copied(), b.iter().copied()).is_ok());
        b[2] = 0;
        assert!(verify_equal(a.iter().copied(), b.iter().copied()).is_err());
    }

    #[test]
    fn test_is_zero_mask_w() {
        assert_eq!(is_zero_mask_w(0), CryptoWord::MAX);
        assert_eq!(is_zero_mask_w(1), 0);
        assert_eq!(is_zero_mask_w(CryptoWord::MAX), 0);
        assert_eq!(is_zero_mask_w(1 << (CryptoWord::BITS - 1)), 0);
    }
}
