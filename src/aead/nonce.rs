// Copyright 2018 Brian Smith.
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

use crate::error;

/// A nonce for a single AEAD opening or sealing operation.
///
/// The user must ensure, for a particular key, that each nonce is unique.
///
/// Nonces are between 0 and `MAX_NONCE_LEN` bytes long; the length is checked
/// against the algorithm's `nonce_len()` when the nonce is used.
///
/// `Nonce` intentionally doesn't implement `Clone` to ensure that each one is
/// consumed at most once.
pub struct Nonce {
    bytes: [u8; MAX_NONCE_LEN],
    len: usize,
}

impl Nonce {
    /// Constructs a `Nonce` with the given value, assuming that the value is
    /// unique for the lifetime of the key it is being used with.
    ///
    /// Fails if `value` is longer than `MAX_NONCE_LEN`.
    #[inline]
    pub fn try_assume_unique_for_key(value: &[u8]) -> Result<Self, error::Unspecified> {
        if value.len() > MAX_NONCE_LEN {
            return Err(error::Unspecified);
        }
        let mut bytes = [0u8; MAX_NONCE_LEN];
        bytes[..value.len()].copy_from_slice(value);
        Ok(Self {
            bytes,
            len: value.len(),
        })
    }

    /// Constructs a `Nonce` with the given value, assuming that the value is
    /// unique for the lifetime of the key it is being used with.
    ///
    /// Using an array longer than `MAX_NONCE_LEN` fails to compile.
    #[inline]
    pub fn assume_unique_for_key<const N: usize>(value: [u8; N]) -> Self {
        let () = FitsInNonce::<N>::OK;
        let mut bytes = [0u8; MAX_NONCE_LEN];
        bytes[..N].copy_from_slice(&value);
        Self { bytes, len: N }
    }

    /// The length of the nonce in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Copies the nonce into a fixed-size array.
    ///
    /// Callers have already checked that the nonce is exactly `N` bytes.
    #[inline]
    pub(super) fn to_array<const N: usize>(&self) -> [u8; N] {
        let mut r = [0u8; N];
        r.copy_from_slice(&self.bytes[..N]);
        r
    }
}

impl AsRef<[u8]> for Nonce {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// The maximum length of a nonce for the algorithms in this module.
pub const MAX_NONCE_LEN: usize = 32;

struct FitsInNonce<const N: usize>;

impl<const N: usize> FitsInNonce<N> {
    const OK: () = assert!(N <= MAX_NONCE_LEN);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        let nonce = Nonce::assume_unique_for_key([7u8; 6]);
        assert_eq!(nonce.len(), 6);
        assert_eq!(nonce.as_ref(), &[7u8; 6]);
        assert_eq!(nonce.to_array::<6>(), [7u8; 6]);

        assert!(Nonce::try_assume_unique_for_key(&[0u8; MAX_NONCE_LEN]).is_ok());
        assert!(Nonce::try_assume_unique_for_key(&[0u8; MAX_NONCE_LEN + 1]).is_err());
        assert_eq!(Nonce::try_assume_unique_for_key(&[]).map(|n| n.len()), Ok(0));
    }
}
