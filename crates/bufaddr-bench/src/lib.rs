//! Benchmark profiles for bufaddr.
//!
//! - [`mixed_arrays`]: a deterministic set of arrays across every element
//!   kind and a spread of sizes, for exercising the accessor's checks.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use bufaddr_core::{ElementKind, NumArray};

/// Build `count` arrays cycling through every [`ElementKind`], with
/// element counts cycling through 1, 16, 256 and 4096.
pub fn mixed_arrays(count: usize) -> Vec<NumArray> {
    const SIZES: [usize; 4] = [1, 16, 256, 4096];
    (0..count)
        .filter_map(|i| {
            let kind = ElementKind::ALL[i % ElementKind::ALL.len()];
            NumArray::zeros(kind, &[SIZES[i % SIZES.len()]]).ok()
        })
        .collect()
}
