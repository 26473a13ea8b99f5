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

//! Lightweight authenticated encryption and hashing.
//!
//! The AEADs and hash functions here are the lightweight designs from the
//! NIST Lightweight Cryptography process, each built from a small block
//! cipher or permutation and a mode of operation. Every AEAD shares one
//! calling convention, [`aead::LessSafeKey`] and friends, and every hash
//! shares [`digest::Context`].
//!
//! # Feature Flags
//!
//! <table>
//! <tr><th>Feature
//!     <th>Description
//! <tr><td><code>alloc (default)</code>
//!     <td>Enable features that require use of the heap.
//! <tr><td><code>slow_tests</code>
//!     <td>Run the exhaustive variants of some tests in release builds.
//! <tr><td><code>std</code>
//!     <td>Enable features that use libstd, in particular
//!         <code>std::error::Error</code> integration. Implies `alloc`.
//! <tr><td><code>test_logging</code>
//!     <td>Echo every line of the test vector files as it is parsed.
//! <tr><td><code>wasm32_unknown_unknown_js</code>
//!     <td>When this feature is enabled, for the wasm32-unknown-unknown target,
//!         Web APIs will be used to implement features like `lwc::rand` that
//!         require an operating environment of some kind. This has no effect
//!         for any other target.
//! </table>

#![allow(
    clippy::collapsible_if,
    clippy::identity_op,
    clippy::len_without_is_empty,
    clippy::let_unit_value,
    clippy::many_single_char_names,
    clippy::needless_range_loop,
    clippy::new_without_default,
    clippy::too_many_arguments,
    clippy::unreadable_literal,
    missing_copy_implementations,
    missing_debug_implementations,
    non_camel_case_types,
    non_snake_case
)]
#![deny(variant_size_differences)]
#![forbid(
    unused_results,
    unsafe_code,
)]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

#[macro_use]
mod debug;

#[macro_use]
mod polyfill;

#[cfg(feature = "alloc")]
#[macro_use]
#[doc(hidden)]
pub mod test;

#[cfg(feature = "alloc")]
mod testutil;

pub mod aead;
pub mod constant_time;

pub mod digest;
mod endian;
pub mod error;
mod gimli;
pub mod rand;
mod sparkle;
