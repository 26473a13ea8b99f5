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

/// Defines an error type whose constructors are `#[cold]`, so the optimizer
/// lays out the success path as the fall-through path.
///
/// Every struct field and variant must carry a non-constant value; otherwise
/// the constructor is treated as invariant code, hoisted, and the `#[cold]`
/// attribute is lost.
///
/// The type lives in its own submodule `$mod_name` so that the only way to
/// build a value is through the generated constructor functions.
/// `#[inline(never)]` keeps the MIR inliner from erasing the cold call.
macro_rules! cold_exhaustive_error {
    // struct
    {
        struct $mod_name:ident::$Error:ident with $vis:vis constructor {
            $field:ident: $ValueType:ty
        }
    } => {
        mod $mod_name {
            #[allow(unused_imports)]
            use super::*;

            pub struct $Error { #[allow(dead_code)] $field: $ValueType }

            impl $Error {
                #[cold]
                #[inline(never)]
                $vis fn new($field: $ValueType) -> Self {
                    Self { $field }
                }
            }
        }
    };

    // enum
    {
        enum $mod_name:ident::$Error:ident {
            $(
                $constructor:ident => $Variant:ident($ValueType:ty),
            )+
        }
    } => {
        mod $mod_name {
            #[allow(unused_imports)]
            use super::*;

            pub enum $Error {
                $(
                    $Variant(#[allow(dead_code)] $ValueType)
                ),+
            }

            impl $Error {
                $(
                    #[cold]
                    #[inline(never)]
                    pub(super) fn $constructor(value: $ValueType) -> Self {
                        Self::$Variant(value)
                    }
                )+
            }
        }
    };
}
