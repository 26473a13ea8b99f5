// Copyright 2016-2024 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHOR DISCLAIMS ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION
// OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN
// CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

#[cfg(feature = "std")]
extern crate std;

/// An error with absolutely no details.
///
/// This unit type is the error type of nearly every fallible operation in
/// this crate. A failed tag check, a nonce of the wrong length, and an input
/// longer than an algorithm accepts all look the same to the caller; telling
/// them apart would mostly serve to hand an attacker a side channel.
///
/// `Result<T, lwc::error::Unspecified>` is mostly equivalent to
/// `Result<T, ()>`. However, `lwc::error::Unspecified` implements
/// [`std::error::Error`] and users can implement
/// `From<lwc::error::Unspecified>` to map this to their own error types:
///
/// ```
/// use lwc::aead;
///
/// enum Error {
///     CryptoError,
///     // [...]
/// }
///
/// impl From<lwc::error::Unspecified> for Error {
///     fn from(_: lwc::error::Unspecified) -> Self { Error::CryptoError }
/// }
///
/// fn seal_greeting(key: &[u8; 16], nonce: &[u8; 16]) -> Result<Vec<u8>, Error> {
///     let key = aead::UnboundKey::new(&aead::GIFT_COFB, key)?;
///     let key = aead::LessSafeKey::new(key);
///     let nonce = aead::Nonce::try_assume_unique_for_key(nonce)?;
///     let mut in_out = b"hello".to_vec();
///     key.seal_in_place_append_tag(nonce, aead::Aad::empty(), &mut in_out)?;
///     Ok(in_out)
/// }
///
/// # let sealed = seal_greeting(&[0; 16], &[0; 16]);
/// # assert!(sealed.is_ok());
/// ```
///
/// [`std::error::Error`]: https://doc.rust-lang.org/std/error/trait.Error.html
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unspecified;

// This is required for the implementation of `std::error::Error`.
impl core::fmt::Display for Unspecified {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("lwc::error::Unspecified")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Unspecified {}
