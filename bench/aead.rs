// Copyright 2015-2021 Brian Smith.
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
#![allow(missing_docs)]

use criterion::criterion_main;
use lwc::{aead, error};

// A typical sensor reading or control message.
const SMALL_LEN: usize = 16;

// An IEEE 802.15.4 frame payload.
const FRAME_LEN: usize = 102;

// A CoAP message header plus options; a common AAD for constrained devices.
const COAP_AD: [u8; 8] = [
    0x44, // Version 1, confirmable, 4-byte token.
    0x01, // GET
    0x12, 0x34, // Message ID.
    0xde, 0xad, 0xbe, 0xef, // Token.
];

/// A big-endian counter in the last bytes of a `len`-byte nonce.
struct NonceSequence {
    len: usize,
    counter: u64,
}

impl NonceSequence {
    const fn new(len: usize) -> Self {
        Self { len, counter: 0 }
    }

    fn nonce(len: usize, counter: u64) -> Result<aead::Nonce, error::Unspecified> {
        let mut result = [0u8; aead::MAX_NONCE_LEN];
        let counter = u64::to_be_bytes(counter);
        // PAEF nonces are shorter than the counter.
        let n = core::cmp::min(len, counter.len());
        result[(len - n)..len].copy_from_slice(&counter[(counter.len() - n)..]);
        aead::Nonce::try_assume_unique_for_key(&result[..len])
    }
}

impl aead::NonceSequence for NonceSequence {
    fn advance(&mut self) -> Result<aead::Nonce, error::Unspecified> {
        let nonce = Self::nonce(self.len, self.counter)?;
        self.counter = self.counter.checked_add(1).ok_or(error::Unspecified)?;
        Ok(nonce)
    }
}

macro_rules! function_bench_name {
    ( $benchmark_name:ident, $algorithm:expr, $operation:ident) => {{
        const FUNC_NAME_BASE: &str = concat!(
            "aead_",
            stringify!($operation),
            "_",
            stringify!($benchmark_name),
            "_",
            stringify!($algorithm)
        );

        FUNC_NAME_BASE.replace("&aead::", "")
    }};
}

macro_rules! bench {
    ( $benchmark_name:ident, $algorithm:expr, $chunk_len:expr, $ad:expr ) => {
        pub(super) fn $benchmark_name(c: &mut criterion::Criterion) {
            use super::NonceSequence;
            use criterion::{black_box, BatchSize};
            use lwc::{
                aead::{self, BoundKey},
                rand::{SecureRandom, SystemRandom},
            };

            let rng = SystemRandom::new();

            let mut key_bytes = vec![0u8; $algorithm.key_len()];
            rng.fill(&mut key_bytes).unwrap();

            {
                let key = aead::UnboundKey::new($algorithm, &key_bytes).unwrap();
                let mut key =
                    aead::SealingKey::new(key, NonceSequence::new($algorithm.nonce_len()));

                let mut in_out = black_box(vec![0u8; $chunk_len]);

                c.bench_function(
                    &function_bench_name!($benchmark_name, $algorithm, seal),
                    |b| {
                        b.iter(|| -> Result<(), lwc::error::Unspecified> {
                            let aad = aead::Aad::from(black_box($ad));
                            let _tag = key.seal_in_place_separate_tag(aad, &mut in_out)?;
                            Ok(())
                        })
                    },
                );
            }

            {
                let key =
                    aead::LessSafeKey::new(aead::UnboundKey::new($algorithm, &key_bytes).unwrap());
                let nonce_len = $algorithm.nonce_len();

                let ciphertext = {
                    let nonce = NonceSequence::nonce(nonce_len, 0).unwrap();
                    let mut in_out = vec![0u8; $chunk_len];
                    let aad = aead::Aad::from($ad);
                    key.seal_in_place_append_tag(nonce, aad, &mut in_out)
                        .unwrap();
                    in_out
                };

                let num_batches = (std::cmp::max(1, 8192 / ciphertext.len()) * 10) as u64;

                c.bench_function(
                    &function_bench_name!($benchmark_name, $algorithm, open),
                    |b| {
                        b.iter_batched(
                            || ciphertext.clone(),
                            |mut ciphertext| -> Result<(), lwc::error::Unspecified> {
                                let nonce = NonceSequence::nonce(nonce_len, 0)?;

                                let aad = aead::Aad::from(black_box($ad));
                                let _result = key.open_in_place(nonce, aad, &mut ciphertext)?;

                                Ok(())
                            },
                            BatchSize::NumBatches(num_batches),
                        )
                    },
                );
            }
        }
    };
}

macro_rules! benches {
    ( $name:ident, $algorithm:expr ) => {
        mod $name {
            use criterion::criterion_group;

            bench!(small, $algorithm, super::SMALL_LEN, super::COAP_AD);
            bench!(frame, $algorithm, super::FRAME_LEN, super::COAP_AD);
            bench!(bulk_1024, $algorithm, 1024, super::COAP_AD);

            criterion_group!($name, small, frame, bulk_1024);
        }

        // Export Criterion benchmark groups
        pub use $name::*;
    };
}

benches!(comet_128_cham, &aead::COMET_128_CHAM);
benches!(comet_64_cham, &aead::COMET_64_CHAM);
benches!(comet_64_speck, &aead::COMET_64_SPECK);
benches!(delirium, &aead::DELIRIUM);
benches!(dumbo, &aead::DUMBO);
benches!(estate_twegift_128, &aead::ESTATE_TWEGIFT_128);
benches!(gift_cofb, &aead::GIFT_COFB);
benches!(gimli24, &aead::GIMLI24);
benches!(isap_k_128, &aead::ISAP_K_128);
benches!(isap_k_128a, &aead::ISAP_K_128A);
benches!(jumbo, &aead::JUMBO);
benches!(paef_forkskinny_128_192, &aead::PAEF_FORKSKINNY_128_192);
benches!(paef_forkskinny_128_256, &aead::PAEF_FORKSKINNY_128_256);
benches!(paef_forkskinny_128_288, &aead::PAEF_FORKSKINNY_128_288);
benches!(paef_forkskinny_64_192, &aead::PAEF_FORKSKINNY_64_192);
benches!(pyjamask_128, &aead::PYJAMASK_128);
benches!(pyjamask_96, &aead::PYJAMASK_96);
benches!(saef_forkskinny_128_192, &aead::SAEF_FORKSKINNY_128_192);
benches!(saef_forkskinny_128_256, &aead::SAEF_FORKSKINNY_128_256);
benches!(schwaemm_128_128, &aead::SCHWAEMM_128_128);
benches!(schwaemm_192_192, &aead::SCHWAEMM_192_192);
benches!(schwaemm_256_128, &aead::SCHWAEMM_256_128);
benches!(schwaemm_256_256, &aead::SCHWAEMM_256_256);
benches!(spix, &aead::SPIX);
benches!(spoc_128, &aead::SPOC_128);
benches!(spoc_64, &aead::SPOC_64);
benches!(spook_128_384_mu, &aead::SPOOK_128_384_MU);
benches!(spook_128_384_su, &aead::SPOOK_128_384_SU);
benches!(spook_128_512_mu, &aead::SPOOK_128_512_MU);
benches!(spook_128_512_su, &aead::SPOOK_128_512_SU);
benches!(tinyjambu_128, &aead::TINYJAMBU_128);
benches!(tinyjambu_192, &aead::TINYJAMBU_192);
benches!(tinyjambu_256, &aead::TINYJAMBU_256);

criterion_main!(
    comet_128_cham,
    comet_64_cham,
    comet_64_speck,
    delirium,
    dumbo,
    estate_twegift_128,
    gift_cofb,
    gimli24,
    isap_k_128,
    isap_k_128a,
    jumbo,
    paef_forkskinny_128_192,
    paef_forkskinny_128_256,
    paef_forkskinny_128_288,
    paef_forkskinny_64_192,
    pyjamask_128,
    pyjamask_96,
    saef_forkskinny_128_192,
    saef_forkskinny_128_256,
    schwaemm_128_128,
    schwaemm_192_192,
    schwaemm_256_128,
    schwaemm_256_256,
    spix,
    spoc_128,
    spoc_64,
    spook_128_384_mu,
    spook_128_384_su,
    spook_128_512_mu,
    spook_128_512_su,
    tinyjambu_128,
    tinyjambu_192,
    tinyjambu_256
);
