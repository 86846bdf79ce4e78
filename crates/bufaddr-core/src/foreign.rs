//! [`ForeignBuffer`]: a descriptor of memory owned by another runtime.

use crate::element::ElementKind;
use crate::handle::ArrayHandle;

/// Pointer, length, kind and layout of a buffer owned elsewhere.
///
/// Built by bindings that receive arrays from a foreign runtime (a numpy
/// array, a C allocation). Constructing one only records numbers and is
/// safe; whoever builds it vouches that the memory stays alive and
/// unmutated for as long as the descriptor and any address derived from
/// it are in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForeignBuffer {
    ptr: *const u8,
    len: usize,
    kind: ElementKind,
    contiguous: bool,
}

impl ForeignBuffer {
    /// Describe a contiguous buffer of `len` elements of `kind` at `ptr`.
    pub fn new(ptr: *const u8, len: usize, kind: ElementKind) -> Self {
        Self {
            ptr,
            len,
            kind,
            contiguous: true,
        }
    }

    /// Describe a strided buffer whose first element is at `ptr`.
    pub fn strided(ptr: *const u8, len: usize, kind: ElementKind) -> Self {
        Self {
            contiguous: false,
            ..Self::new(ptr, len, kind)
        }
    }
}

impl ArrayHandle for ForeignBuffer {
    fn element_kind(&self) -> ElementKind {
        self.kind
    }

    fn data_ptr(&self) -> *const u8 {
        self.ptr
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_contiguous(&self) -> bool {
        self.contiguous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_what_it_is_given() {
        let data = [0u32; 4];
        let fb = ForeignBuffer::new(data.as_ptr().cast(), 4, ElementKind::UInt32);
        assert_eq!(fb.data_ptr(), data.as_ptr().cast::<u8>());
        assert_eq!(fb.len(), 4);
        assert_eq!(fb.element_kind(), ElementKind::UInt32);
        assert!(fb.is_contiguous());
    }

    #[test]
    fn strided_is_not_contiguous() {
        let data = [0u32; 4];
        let fb = ForeignBuffer::strided(data.as_ptr().cast(), 2, ElementKind::UInt32);
        assert!(!fb.is_contiguous());
        assert_eq!(fb.len(), 2);
    }
}
