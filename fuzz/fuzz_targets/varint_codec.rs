// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the string length prefix varint.
//!
//! Every string in the dictionary starts with one. A decoder that panics on
//! a truncated or overlong prefix takes the whole query path down with it.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wikindex::binary::{decode_string, decode_varint, encode_varint, MAX_VARINT_BYTES};

fuzz_target!(|data: &[u8]| {
    // Never panics; garbage is an Err
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed >= 1 && consumed <= MAX_VARINT_BYTES);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("canonical encoding must decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
    }

    // A decoded string never claims more bytes than it was given
    if let Ok((text, consumed)) = decode_string(data) {
        assert!(consumed <= data.len());
        assert!(text.len() < consumed);
    }
});
