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

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use wasm_bindgen_test::{wasm_bindgen_test as test, wasm_bindgen_test_configure};

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
wasm_bindgen_test_configure!(run_in_browser);

use core::ops::RangeFrom;
use lwc::{aead, error, test, test_file};

/// Generate the known answer test functions for the given algorithm and test
/// case input file, where each test is implemented by a test in `$test`.
///
/// All of these tests can be run in parallel.
macro_rules! test_known_answer {
    ( $alg:ident, $test_file:expr, [ $( $test:ident ),+, ] ) => {
        $(
            #[test]
            fn $test() {
                test_aead(
                    &aead::$alg,
                    super::super::$test,
                    test_file!($test_file));
            }
        )+
    }
}

/// Generate the tests for a given algorithm.
///
/// All of these tests can be run in parallel.
macro_rules! test_aead {
    { $( { $alg:ident, $test_file:expr } ),+, } => {
        mod aead_test { // Make `cargo test aead` include these files.
            $(
                #[allow(non_snake_case)]
                mod $alg { // Provide a separate namespace for each algorithm's test.
                    use super::super::*;

                    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
                    use wasm_bindgen_test::wasm_bindgen_test as test;

                    test_known_answer!(
                        $alg,
                        $test_file,
                        [
                            less_safe_key_open_in_place,
                            less_safe_key_open_within,
                            less_safe_key_seal_in_place_append_tag,
                            less_safe_key_seal_in_place_separate_tag,
                            opening_key_open_in_place,
                            opening_key_open_within,
                            sealing_key_seal_in_place_append_tag,
                            sealing_key_seal_in_place_separate_tag,
                            test_open_in_place_seperate_tag,
                            test_open_rejects_modified_input,
                        ]);

                    #[test]
                    fn key_sizes() {
                        super::super::key_sizes(&aead::$alg);
                    }

                    #[test]
                    fn nonce_sizes() {
                        super::super::nonce_sizes(&aead::$alg);
                    }

                    #[test]
                    fn lesssafekey_clone() {
                        super::super::test_aead_lesssafekey_clone_for_algorithm(&aead::$alg);
                    }
                }
            )+
        }
    }
}

test_aead! {
    { COMET_128_CHAM, "aead_comet_128_cham_128_128_tests.txt" },
    { COMET_64_CHAM, "aead_comet_64_cham_64_128_tests.txt" },
    { COMET_64_SPECK, "aead_comet_64_speck_64_128_tests.txt" },
    { DELIRIUM, "aead_delirium_tests.txt" },
    { DUMBO, "aead_dumbo_tests.txt" },
    { ESTATE_TWEGIFT_128, "aead_estate_twegift_128_tests.txt" },
    { GIFT_COFB, "aead_gift_cofb_tests.txt" },
    { GIMLI24, "aead_gimli_24_tests.txt" },
    { ISAP_K_128, "aead_isap_k_128_tests.txt" },
    { ISAP_K_128A, "aead_isap_k_128a_tests.txt" },
    { JUMBO, "aead_jumbo_tests.txt" },
    { PAEF_FORKSKINNY_128_192, "aead_paef_forkskinny_128_192_tests.txt" },
    { PAEF_FORKSKINNY_128_256, "aead_paef_forkskinny_128_256_tests.txt" },
    { PAEF_FORKSKINNY_128_288, "aead_paef_forkskinny_128_288_tests.txt" },
    { PAEF_FORKSKINNY_64_192, "aead_paef_forkskinny_64_192_tests.txt" },
    { PYJAMASK_128, "aead_pyjamask_128_aead_tests.txt" },
    { PYJAMASK_96, "aead_pyjamask_96_aead_tests.txt" },
    { SAEF_FORKSKINNY_128_192, "aead_saef_forkskinny_128_192_tests.txt" },
    { SAEF_FORKSKINNY_128_256, "aead_saef_forkskinny_128_256_tests.txt" },
    { SCHWAEMM_128_128, "aead_schwaemm128_128_tests.txt" },
    { SCHWAEMM_192_192, "aead_schwaemm192_192_tests.txt" },
    { SCHWAEMM_256_128, "aead_schwaemm256_128_tests.txt" },
    { SCHWAEMM_256_256, "aead_schwaemm256_256_tests.txt" },
    { SPIX, "aead_spix_tests.txt" },
    { SPOC_128, "aead_spoc_128_tests.txt" },
    { SPOC_64, "aead_spoc_64_tests.txt" },
    { SPOOK_128_384_MU, "aead_spook_128_384_mu_tests.txt" },
    { SPOOK_128_384_SU, "aead_spook_128_384_su_tests.txt" },
    { SPOOK_128_512_MU, "aead_spook_128_512_mu_tests.txt" },
    { SPOOK_128_512_SU, "aead_spook_128_512_su_tests.txt" },
    { TINYJAMBU_128, "aead_tinyjambu_128_tests.txt" },
    { TINYJAMBU_192, "aead_tinyjambu_192_tests.txt" },
    { TINYJAMBU_256, "aead_tinyjambu_256_tests.txt" },
}

struct KnownAnswerTestCase<'a> {
    key: &'a [u8],
    nonce: &'a [u8],
    plaintext: &'a [u8],
    aad: aead::Aad<&'a [u8]>,
    ciphertext: &'a [u8],
    tag: &'a [u8],
}

impl KnownAnswerTestCase<'_> {
    fn nonce(&self) -> aead::Nonce {
        aead::Nonce::try_assume_unique_for_key(self.nonce).unwrap()
    }
}

fn test_aead(
    aead_alg: &'static aead::Algorithm,
    f: impl Fn(&'static aead::Algorithm, KnownAnswerTestCase) -> Result<(), error::Unspecified>,
    test_file: test::File,
) {
    test::run(test_file, |section, test_case| {
        assert_eq!(section, "");
        let key = test_case.consume_bytes("KEY");
        let nonce = test_case.consume_bytes("NONCE");
        let plaintext = test_case.consume_bytes("IN");
        let aad = test_case.consume_bytes("AD");
        let ct = test_case.consume_bytes("CT");
        let tag = test_case.consume_bytes("TAG");

        assert_eq!(nonce.len(), aead_alg.nonce_len());
        assert_eq!(tag.len(), aead_alg.tag_len());

        let test_case = KnownAnswerTestCase {
            key: &key,
            nonce: &nonce,
            plaintext: &plaintext,
            aad: aead::Aad::from(&aad),
            ciphertext: &ct,
            tag: &tag,
        };

        f(aead_alg, test_case)
    })
}

fn test_seal_append_tag<Seal>(
    tc: &KnownAnswerTestCase,
    seal: Seal,
) -> Result<(), error::Unspecified>
where
    Seal: FnOnce(aead::Nonce, &mut Vec<u8>) -> Result<(), error::Unspecified>,
{
    let mut in_out = Vec::from(tc.plaintext);
    seal(tc.nonce(), &mut in_out)?;

    let mut expected_ciphertext_and_tag = Vec::from(tc.ciphertext);
    expected_ciphertext_and_tag.extend_from_slice(tc.tag);

    assert_eq!(in_out, expected_ciphertext_and_tag);

    Ok(())
}

fn test_seal_separate_tag<Seal>(
    tc: &KnownAnswerTestCase,
    seal: Seal,
) -> Result<(), error::Unspecified>
where
    Seal: Fn(aead::Nonce, &mut [u8]) -> Result<aead::Tag, error::Unspecified>,
{
    let mut in_out = Vec::from(tc.plaintext);
    let actual_tag = seal(tc.nonce(), &mut in_out)?;
    assert_eq!(actual_tag.as_ref(), tc.tag);
    assert_eq!(in_out, tc.ciphertext);

    Ok(())
}

fn test_open_in_place<OpenInPlace>(
    tc: &KnownAnswerTestCase<'_>,
    open_in_place: OpenInPlace,
) -> Result<(), error::Unspecified>
where
    OpenInPlace:
        for<'a> FnOnce(aead::Nonce, &'a mut [u8]) -> Result<&'a mut [u8], error::Unspecified>,
{
    let mut in_out = Vec::from(tc.ciphertext);
    in_out.extend_from_slice(tc.tag);

    let actual_plaintext = open_in_place(tc.nonce(), &mut in_out)?;

    assert_eq!(actual_plaintext, tc.plaintext);
    assert_eq!(&in_out[..tc.plaintext.len()], tc.plaintext);
    Ok(())
}

fn test_open_in_place_seperate_tag(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    let key = make_less_safe_key(alg, tc.key);

    let mut in_out = Vec::from(tc.ciphertext);
    let tag = tc.tag.try_into().unwrap();

    // Test the simplest behavior.
    {
        let actual_plaintext =
            key.open_in_place_separate_tag(tc.nonce(), tc.aad, tag, &mut in_out, 0..)?;

        assert_eq!(actual_plaintext, tc.plaintext);
        assert_eq!(&in_out[..tc.plaintext.len()], tc.plaintext);
    }

    // Test that ciphertext range shifing works as expected.
    {
        let range = in_out.len()..;
        in_out.extend_from_slice(tc.ciphertext);

        let actual_plaintext =
            key.open_in_place_separate_tag(tc.nonce(), tc.aad, tag, &mut in_out, range)?;

        assert_eq!(actual_plaintext, tc.plaintext);
        assert_eq!(&in_out[..tc.plaintext.len()], tc.plaintext);
    }

    Ok(())
}

/// Flipping any bit of the ciphertext, the tag, the AAD or the nonce must be
/// detected, and the would-be plaintext must be wiped.
fn test_open_rejects_modified_input(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    let key = make_less_safe_key(alg, tc.key);

    let mut ciphertext_and_tag = Vec::from(tc.ciphertext);
    ciphertext_and_tag.extend_from_slice(tc.tag);

    for i in [0, ciphertext_and_tag.len() / 2, ciphertext_and_tag.len() - 1] {
        let mut in_out = ciphertext_and_tag.clone();
        in_out[i] ^= 0x01;
        assert!(key.open_in_place(tc.nonce(), tc.aad, &mut in_out).is_err());
        assert!(in_out[..tc.ciphertext.len()].iter().all(|b| *b == 0));
    }

    if !tc.aad.as_ref().is_empty() {
        let mut aad = Vec::from(tc.aad.as_ref());
        aad[0] ^= 0x80;
        let mut in_out = ciphertext_and_tag.clone();
        assert!(key
            .open_in_place(tc.nonce(), aead::Aad::from(&aad), &mut in_out)
            .is_err());
    }

    let mut nonce = Vec::from(tc.nonce);
    let last = nonce.len() - 1;
    nonce[last] ^= 0x01;
    let nonce = aead::Nonce::try_assume_unique_for_key(&nonce)?;
    let mut in_out = ciphertext_and_tag;
    assert!(key.open_in_place(nonce, tc.aad, &mut in_out).is_err());

    Ok(())
}

fn test_open_within<OpenWithin>(
    tc: &KnownAnswerTestCase<'_>,
    open_within: OpenWithin,
) -> Result<(), error::Unspecified>
where
    OpenWithin: for<'a> Fn(
        aead::Nonce,
        &'a mut [u8],
        RangeFrom<usize>,
    ) -> Result<&'a mut [u8], error::Unspecified>,
{
    // With `slow_tests` in release builds, test all prefix lengths from 0 to
    // 4096 bytes. Otherwise only test a smaller subset.

    // The block and rate sizes here range from 4 bytes (TinyJAMBU) to 48
    // bytes (Shadow-384 state), so cover each side of their multiples.
    static MINIMAL_IN_PREFIX_LENS: [usize; 20] = [
        // No input prefix to overwrite; i.e. the opening is exactly
        // "in place."
        0, 1, 2, 3, 4, 5, 7, 8, 9, 12, 15, 16, 17, 18, 31, 32, 33, 48, 64, 255,
    ];

    let mut more_comprehensive_in_prefix_lengths = [0; 4096];
    let in_prefix_lengths = if cfg!(debug_assertions) || !cfg!(feature = "slow_tests") {
        &MINIMAL_IN_PREFIX_LENS[..]
    } else {
        #[allow(clippy::needless_range_loop)]
        for b in 0..more_comprehensive_in_prefix_lengths.len() {
            more_comprehensive_in_prefix_lengths[b] = b;
        }
        &more_comprehensive_in_prefix_lengths[..]
    };
    let mut in_out = vec![123u8; 4096];

    for &in_prefix_len in in_prefix_lengths.iter() {
        in_out.truncate(0);
        in_out.resize(in_prefix_len, 123);
        in_out.extend_from_slice(tc.ciphertext);
        in_out.extend_from_slice(tc.tag);

        let actual_plaintext = open_within(tc.nonce(), &mut in_out, in_prefix_len..)?;
        assert_eq!(actual_plaintext, tc.plaintext);
        assert_eq!(&in_out[..tc.plaintext.len()], tc.plaintext);
    }

    Ok(())
}

fn sealing_key_seal_in_place_append_tag(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_seal_append_tag(&tc, |nonce, in_out| {
        let mut key: aead::SealingKey<OneNonceSequence> = make_key(alg, tc.key, nonce);
        key.seal_in_place_append_tag(tc.aad, in_out)
    })
}

fn sealing_key_seal_in_place_separate_tag(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_seal_separate_tag(&tc, |nonce, in_out| {
        let mut key: aead::SealingKey<_> = make_key(alg, tc.key, nonce);
        key.seal_in_place_separate_tag(tc.aad, in_out)
    })
}

fn opening_key_open_in_place(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_open_in_place(&tc, |nonce, in_out| {
        let mut key: aead::OpeningKey<_> = make_key(alg, tc.key, nonce);
        key.open_in_place(tc.aad, in_out)
    })
}

fn opening_key_open_within(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_open_within(&tc, |nonce, in_out, ciphertext_and_tag| {
        let mut key: aead::OpeningKey<OneNonceSequence> = make_key(alg, tc.key, nonce);
        key.open_within(tc.aad, in_out, ciphertext_and_tag)
    })
}

fn less_safe_key_seal_in_place_append_tag(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_seal_append_tag(&tc, |nonce, in_out| {
        let key = make_less_safe_key(alg, tc.key);
        key.seal_in_place_append_tag(nonce, tc.aad, in_out)
    })
}

fn less_safe_key_open_in_place(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_open_in_place(&tc, |nonce, in_out| {
        let key = make_less_safe_key(alg, tc.key);
        key.open_in_place(nonce, tc.aad, in_out)
    })
}

fn less_safe_key_seal_in_place_separate_tag(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_seal_separate_tag(&tc, |nonce, in_out| {
        let key = make_less_safe_key(alg, tc.key);
        key.seal_in_place_separate_tag(nonce, tc.aad, in_out)
    })
}

fn less_safe_key_open_within(
    alg: &'static aead::Algorithm,
    tc: KnownAnswerTestCase,
) -> Result<(), error::Unspecified> {
    test_open_within(&tc, |nonce, in_out, ciphertext_and_tag| {
        let key = make_less_safe_key(alg, tc.key);
        key.open_within(nonce, tc.aad, in_out, ciphertext_and_tag)
    })
}

#[allow(clippy::range_plus_one)]
fn key_sizes(aead_alg: &'static aead::Algorithm) {
    let key_len = aead_alg.key_len();
    let key_data = vec![0u8; key_len * 2];

    // Key is the right size.
    assert!(aead::UnboundKey::new(aead_alg, &key_data[..key_len]).is_ok());

    // Key is one byte too small.
    assert!(aead::UnboundKey::new(aead_alg, &key_data[..(key_len - 1)]).is_err());

    // Key is one byte too large.
    assert!(aead::UnboundKey::new(aead_alg, &key_data[..(key_len + 1)]).is_err());

    // Key is half the required size.
    assert!(aead::UnboundKey::new(aead_alg, &key_data[..(key_len / 2)]).is_err());

    // Key is twice the required size.
    assert!(aead::UnboundKey::new(aead_alg, &key_data[..(key_len * 2)]).is_err());

    // Key is empty.
    assert!(aead::UnboundKey::new(aead_alg, &[]).is_err());

    // Key is one byte.
    assert!(aead::UnboundKey::new(aead_alg, &[0]).is_err());
}

// A nonce of the wrong length is rejected when it is used, before anything
// is written to `in_out`.
fn nonce_sizes(aead_alg: &'static aead::Algorithm) {
    let key = make_less_safe_key(aead_alg, &vec![0u8; aead_alg.key_len()]);
    let nonce_len = aead_alg.nonce_len();
    let nonce = [0u8; aead::MAX_NONCE_LEN];

    for len in [0, 1, nonce_len - 1, nonce_len + 1, aead::MAX_NONCE_LEN] {
        if len == nonce_len || len > aead::MAX_NONCE_LEN {
            continue;
        }
        let nonce = aead::Nonce::try_assume_unique_for_key(&nonce[..len]).unwrap();
        let mut in_out = vec![7u8; 3];
        assert!(key
            .seal_in_place_separate_tag(nonce, aead::Aad::empty(), &mut in_out)
            .is_err());
        assert_eq!(in_out, [7u8; 3]);
    }

    let nonce = aead::Nonce::try_assume_unique_for_key(&nonce[..nonce_len]).unwrap();
    let mut in_out = vec![7u8; 3];
    assert!(key
        .seal_in_place_separate_tag(nonce, aead::Aad::empty(), &mut in_out)
        .is_ok());
}

#[test]
fn test_nonce_max_len() {
    let nonce = [0u8; aead::MAX_NONCE_LEN + 1];
    assert!(aead::Nonce::try_assume_unique_for_key(&nonce[..aead::MAX_NONCE_LEN]).is_ok());
    assert!(aead::Nonce::try_assume_unique_for_key(&nonce).is_err());
}

#[test]
fn test_open_rejects_short_input() {
    let key = make_less_safe_key(&aead::GIFT_COFB, &[0u8; 16]);
    for len in 0..aead::GIFT_COFB.tag_len() {
        let mut in_out = vec![0u8; len];
        let nonce = aead::Nonce::assume_unique_for_key([0u8; 16]);
        assert!(key
            .open_in_place(nonce, aead::Aad::empty(), &mut in_out)
            .is_err());
    }
}

#[test]
fn test_open_rejects_wrong_tag_len() {
    let key = make_less_safe_key(&aead::DUMBO, &[0u8; 16]);
    let mut in_out = vec![0u8; 10];
    let tag = aead::Tag::try_from(&[0u8; 16][..]).unwrap();
    let nonce = aead::Nonce::assume_unique_for_key([0u8; 12]);
    assert!(key
        .open_in_place_separate_tag(nonce, aead::Aad::empty(), tag, &mut in_out, 0..)
        .is_err());
}

#[test]
fn test_paef_length_limit() {
    // The block counter of PAEF-ForkSkinny-128-256 has 13 bits, and the
    // final block is counted separately.
    const MAX_LEN: usize = ((1 << 13) - 1) * 16;

    let key = make_less_safe_key(&aead::PAEF_FORKSKINNY_128_256, &[0u8; 16]);
    let nonce = || aead::Nonce::assume_unique_for_key([0u8; 14]);

    let mut in_out = vec![0u8; MAX_LEN + 1];
    assert!(key
        .seal_in_place_separate_tag(nonce(), aead::Aad::empty(), &mut in_out)
        .is_err());
    assert!(in_out.iter().all(|b| *b == 0));

    let aad = vec![0u8; MAX_LEN + 1];
    let mut in_out = vec![0u8; 1];
    assert!(key
        .seal_in_place_separate_tag(nonce(), aead::Aad::from(&aad), &mut in_out)
        .is_err());

    let mut in_out = vec![0u8; MAX_LEN + 1 + aead::PAEF_FORKSKINNY_128_256.tag_len()];
    assert!(key
        .open_in_place(nonce(), aead::Aad::empty(), &mut in_out)
        .is_err());

    // A too-long ciphertext behind a prefix is rejected before it is moved.
    let prefix_len = 5;
    let mut in_out: Vec<u8> = (0..prefix_len + MAX_LEN + 1 + 16)
        .map(|i| i as u8)
        .collect();
    let original = in_out.clone();
    assert!(key
        .open_within(nonce(), aead::Aad::empty(), &mut in_out, prefix_len..)
        .is_err());
    assert_eq!(in_out, original);
}

#[test]
fn test_paef_longest_input() {
    const MAX_LEN: usize = ((1 << 13) - 1) * 16;

    let key = make_less_safe_key(&aead::PAEF_FORKSKINNY_128_256, &[0u8; 16]);
    let nonce = || aead::Nonce::assume_unique_for_key([0u8; 14]);

    let plaintext: Vec<u8> = (0..MAX_LEN).map(|i| i as u8).collect();
    let aad = vec![0xa5u8; MAX_LEN];
    let mut in_out = plaintext.clone();
    key.seal_in_place_append_tag(nonce(), aead::Aad::from(&aad), &mut in_out)
        .unwrap();
    assert_eq!(in_out.len(), MAX_LEN + 16);
    assert_ne!(&in_out[..MAX_LEN], &plaintext[..]);

    let opened = key
        .open_in_place(nonce(), aead::Aad::from(&aad), &mut in_out)
        .unwrap();
    assert_eq!(&opened[..], &plaintext[..]);
}

#[test]
fn test_flags() {
    use aead::Flags;
    assert!(aead::SPOOK_128_512_SU.flags().contains(Flags::LITTLE_ENDIAN));
    assert!(aead::ISAP_K_128A.flags().contains(Flags::SC_PROTECT_KEY));
    assert!(!aead::ISAP_K_128A.flags().contains(Flags::LITTLE_ENDIAN));
    assert_eq!(aead::SPIX.flags(), Flags::NONE);
    assert!(aead::SPIX.flags().contains(Flags::NONE));
}

#[test]
fn test_names() {
    assert_eq!(aead::COMET_64_SPECK.name(), "COMET-64_SPECK-64/128");
    assert_eq!(aead::SPOOK_128_384_MU.name(), "Spook-128-384-mu");
    assert_eq!(aead::SPOC_64.name(), "SpoC-64");
    assert_eq!(aead::DELIRIUM.name(), "Delirium");
}

#[test]
fn aead_test_aad_traits() {
    test::compile_time_assert_copy::<aead::Aad<&'_ [u8]>>();
    test::compile_time_assert_eq::<aead::Aad<Vec<u8>>>(); // `!Copy`

    let aad_123 = aead::Aad::from(vec![1, 2, 3]); // `!Copy`
    assert_eq!(aad_123, aad_123.clone()); // Cover `Clone` and `PartialEq`
    assert_eq!(
        format!("{:?}", aead::Aad::from(&[1, 2, 3])),
        "Aad([1, 2, 3])"
    );
}

#[test]
fn test_tag_traits() {
    test::compile_time_assert_send::<aead::Tag>();
    test::compile_time_assert_sync::<aead::Tag>();

    test::compile_time_assert_copy::<aead::Tag>();
    test::compile_time_assert_clone::<aead::Tag>();

    let tag = aead::Tag::try_from(&[4u8; 16][..]).unwrap();
    let _tag_2 = tag; // Cover `Copy`
    assert_eq!(tag.as_ref(), tag.clone().as_ref()); // Cover `Clone`

    assert!(aead::Tag::try_from(&[0u8; aead::MAX_TAG_LEN + 1][..]).is_err());
}

#[test]
fn test_aead_key_debug() {
    let key_bytes = [0; 32];
    let nonce = [0; 16];

    let key = aead::UnboundKey::new(&aead::SPOOK_128_512_MU, &key_bytes).unwrap();
    assert_eq!(
        "UnboundKey { algorithm: SPOOK_128_512_MU }",
        format!("{:?}", key)
    );

    let sealing_key: aead::SealingKey<OneNonceSequence> = make_key(
        &aead::SPOOK_128_512_MU,
        &key_bytes,
        aead::Nonce::try_assume_unique_for_key(&nonce).unwrap(),
    );
    assert_eq!(
        "SealingKey { algorithm: SPOOK_128_512_MU }",
        format!("{:?}", sealing_key)
    );

    let opening_key: aead::OpeningKey<OneNonceSequence> = make_key(
        &aead::SPOOK_128_512_MU,
        &key_bytes,
        aead::Nonce::try_assume_unique_for_key(&nonce).unwrap(),
    );
    assert_eq!(
        "OpeningKey { algorithm: SPOOK_128_512_MU }",
        format!("{:?}", opening_key)
    );

    let key: aead::LessSafeKey = make_less_safe_key(&aead::SPOOK_128_512_MU, &key_bytes);
    assert_eq!(
        "LessSafeKey { algorithm: SPOOK_128_512_MU }",
        format!("{:?}", key)
    );
}

fn test_aead_lesssafekey_clone_for_algorithm(algorithm: &'static aead::Algorithm) {
    let test_bytes: Vec<u8> = (0..32).collect();
    let key_bytes = &test_bytes[..algorithm.key_len()];
    let nonce_bytes = &test_bytes[..algorithm.nonce_len()];

    let key1: aead::LessSafeKey =
        aead::LessSafeKey::new(aead::UnboundKey::new(algorithm, key_bytes).unwrap());
    let key2 = key1.clone();

    // LessSafeKey doesn't support AsRef or PartialEq, so instead just check that both keys produce
    // the same encrypted output.
    let mut buf1: Vec<u8> = (0..100).collect();
    let mut buf2 = buf1.clone();
    let tag1 = key1
        .seal_in_place_separate_tag(
            aead::Nonce::try_assume_unique_for_key(nonce_bytes).unwrap(),
            aead::Aad::empty(),
            &mut buf1,
        )
        .unwrap();
    let tag2 = key2
        .seal_in_place_separate_tag(
            aead::Nonce::try_assume_unique_for_key(nonce_bytes).unwrap(),
            aead::Aad::empty(),
            &mut buf2,
        )
        .unwrap();
    assert_eq!(tag1.as_ref(), tag2.as_ref());
    assert_eq!(buf1, buf2);
}

#[test]
fn test_nonce_sequence_exhaustion() {
    let nonce = aead::Nonce::assume_unique_for_key([0u8; 16]);
    let mut key: aead::SealingKey<OneNonceSequence> =
        make_key(&aead::SPIX, &[0u8; 16], nonce);
    let mut in_out = vec![1u8; 5];
    assert!(key
        .seal_in_place_append_tag(aead::Aad::empty(), &mut in_out)
        .is_ok());
    assert!(key
        .seal_in_place_append_tag(aead::Aad::empty(), &mut in_out)
        .is_err());
}

fn make_key<K: aead::BoundKey<OneNonceSequence>>(
    algorithm: &'static aead::Algorithm,
    key: &[u8],
    nonce: aead::Nonce,
) -> K {
    let key = aead::UnboundKey::new(algorithm, key).unwrap();
    let nonce_sequence = OneNonceSequence::new(nonce);
    K::new(key, nonce_sequence)
}

fn make_less_safe_key(algorithm: &'static aead::Algorithm, key: &[u8]) -> aead::LessSafeKey {
    let key = aead::UnboundKey::new(algorithm, key).unwrap();
    aead::LessSafeKey::new(key)
}

struct OneNonceSequence(Option<aead::Nonce>);

impl OneNonceSequence {
    /// Constructs the sequence allowing `advance()` to be called once.
    fn new(nonce: aead::Nonce) -> Self {
        Self(Some(nonce))
    }
}

impl aead::NonceSequence for OneNonceSequence {
    fn advance(&mut self) -> Result<aead::Nonce, error::Unspecified> {
        self.0.take().ok_or(error::Unspecified)
    }
}
