// Copyright 2020 Brian Smith.
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

use super::{
    algorithm::AlgorithmID,
    check_tag,
    init_key_bytes,
    sponge::{Duplex, Permutation},
    Aad, Algorithm, Flags, KeyInner, Nonce, OpenError, Tag,
};
use crate::{error, gimli};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 16;
const TAG_LEN: usize = 16;

/// GIMLI-24-CIPHER: 256-bit key, 128-bit nonce, 128-bit tag.
pub static GIMLI24: Algorithm = Algorithm {
    name: "GIMLI-24",
    key_len: KEY_LEN,
    nonce_len: NONCE_LEN,
    tag_len: TAG_LEN,
    max_input_len: u64::MAX,
    flags: Flags::LITTLE_ENDIAN,
    init: init_key_bytes,
    seal,
    open,
    id: AlgorithmID::GIMLI24,
};

struct Gimli24;

impl Permutation for Gimli24 {
    const STATE_LEN: usize = gimli::STATE_LEN;
    const RATE: usize = 16;

    type State = gimli::State;

    fn permute(state: &mut gimli::State) {
        gimli::permute(state)
    }
}

/// The state starts as the nonce followed by the key.
fn start(key: &KeyInner, nonce: &Nonce, aad: Aad<&[u8]>) -> Duplex<Gimli24> {
    let mut state = [0u8; gimli::STATE_LEN];
    state[..NONCE_LEN].copy_from_slice(nonce.as_ref());
    state[NONCE_LEN..].copy_from_slice(key.bytes());
    let mut duplex = Duplex::new(state);
    duplex.absorb(aad.as_ref());
    duplex
}

fn seal(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
) -> Result<Tag, error::InputTooLongError> {
    let mut duplex = start(key, nonce, aad);
    duplex.encrypt(in_out);
    Ok(Tag::new(duplex.squeeze(TAG_LEN)))
}

fn open(
    key: &KeyInner,
    nonce: &Nonce,
    aad: Aad<&[u8]>,
    in_out: &mut [u8],
    received_tag: &Tag,
) -> Result<(), OpenError> {
    let mut duplex = start(key, nonce, aad);
    duplex.decrypt(in_out);
    check_tag(in_out, duplex.squeeze(TAG_LEN), received_tag.as_ref())?;
    Ok(())
}
