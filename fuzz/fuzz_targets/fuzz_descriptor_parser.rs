//! Fuzz target for module descriptor parsing.
//!
//! The parser may reject any input but must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_descriptor_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = modgate_repo::fuzz::parse_descriptor(text);
    }
});
