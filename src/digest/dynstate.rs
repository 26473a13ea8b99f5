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

use crate::{
    gimli,
    sparkle::{SPARKLE_384_WORDS, SPARKLE_512_WORDS},
};

// Invariant: Each algorithm constructs its state with one of the `new_*`
// functions and the active variant never changes after that.
#[derive(Clone)]
pub(super) enum DynState {
    Gimli(gimli::State),
    Sparkle384([u32; SPARKLE_384_WORDS]),
    Sparkle512([u32; SPARKLE_512_WORDS]),
}

impl DynState {
    pub const fn new_gimli() -> Self {
        Self::Gimli([0; gimli::STATE_LEN])
    }

    pub const fn new_sparkle384() -> Self {
        Self::Sparkle384([0; SPARKLE_384_WORDS])
    }

    pub const fn new_sparkle512() -> Self {
        Self::Sparkle512([0; SPARKLE_512_WORDS])
    }

    pub fn as_gimli(&mut self) -> &mut gimli::State {
        match self {
            Self::Gimli(state) => state,
            _ => unreachable!(),
        }
    }

    pub fn as_sparkle384(&mut self) -> &mut [u32; SPARKLE_384_WORDS] {
        match self {
            Self::Sparkle384(state) => state,
            _ => unreachable!(),
        }
    }

    pub fn as_sparkle512(&mut self) -> &mut [u32; SPARKLE_512_WORDS] {
        match self {
            Self::Sparkle512(state) => state,
            _ => unreachable!(),
        }
    }
}
