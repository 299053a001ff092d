//! Fuzz target for parsing and sanitizing module metadata.
//!
//! Goal: parse + sanitize **never panic**, and a sanitized document
//! re-encodes, re-parses, and sanitizes again to the same bytes.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_module_document
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use modsan_domain::{ExclusionSet, sanitize};
use modsan_types::{Coordinate, parse_document, to_pretty_bytes};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(document) = parse_document(text) else {
        return;
    };

    let set = ExclusionSet::single(Coordinate::aggregator());
    let Ok(first) = sanitize(&document, &set) else {
        return;
    };

    let bytes = to_pretty_bytes(&first.document, 4).expect("encode sanitized document");
    let reparsed = parse_document(std::str::from_utf8(&bytes).expect("utf8 output"))
        .expect("reparse sanitized document");
    let second = sanitize(&reparsed, &set).expect("sanitized document keeps its shape");
    assert!(!second.is_changed());
    assert_eq!(
        to_pretty_bytes(&second.document, 4).expect("encode"),
        bytes
    );
});
