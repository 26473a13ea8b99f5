// Copyright 2024 Brian Smith.
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

pub struct InputTooLongError<T = usize> {
    /// Note that this might not actually be the (exact) length of the input,
    /// and its units might be lost. It may be the length of the whole input,
    /// the length of only the associated data, or a count of blocks.
    #[allow(dead_code)]
    imprecise_input_length: T,
}

impl<T> InputTooLongError<T> {
    #[cold]
    #[inline(never)]
    pub(crate) fn new(imprecise_input_length: T) -> Self {
        Self {
            imprecise_input_length,
        }
    }
}
