//! Fuzz target for dependency resolution across a catalog of descriptors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_catalog_enumeration
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Probe {
    descriptors: Vec<String>,
}

fuzz_target!(|probe: Probe| {
    let descriptors: Vec<String> = probe.descriptors.into_iter().take(16).collect();
    let admitted = modgate_repo::fuzz::enumerate_all(&descriptors);
    assert!(admitted <= descriptors.len());
});
