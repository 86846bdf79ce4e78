//! Reusable array fixtures.
//!
//! - [`one_of_each_kind`]: a small attached [`NumArray`] per element kind.
//! - [`detached_arrays`]: arrays that must never yield an address.

use bufaddr_core::{ElementKind, NumArray};

/// One attached `len`-element array for every [`ElementKind`].
pub fn one_of_each_kind(len: usize) -> Vec<NumArray> {
    ElementKind::ALL
        .iter()
        .filter_map(|&kind| NumArray::zeros(kind, &[len]).ok())
        .collect()
}

/// Arrays without storage: zero-sized shapes, explicitly detached, and
/// released after allocation.
pub fn detached_arrays() -> Vec<NumArray> {
    let mut released = NumArray::from_vec(vec![1.0f64; 4]);
    released.release();
    vec![
        NumArray::detached(ElementKind::Float64),
        NumArray::from_vec(Vec::<f32>::new()),
        NumArray::zeros(ElementKind::Complex128, &[3, 0, 2]).unwrap_or_else(|_| {
            NumArray::detached(ElementKind::Complex128)
        }),
        released,
    ]
}
