//! The [`ArrayHandle`] trait: read-only view of an array's backing store.

use crate::element::{Element, ElementKind};

/// Read-only access to the metadata of an externally owned numeric array.
///
/// Implementors describe where an array's elements live; they never hand
/// out ownership. The accessor reads these four properties exactly once
/// per call, so an implementation must not allocate, copy, or
/// materialize lazy data to answer them.
pub trait ArrayHandle {
    /// Scalar type of the elements.
    fn element_kind(&self) -> ElementKind;

    /// Pointer to the first element, or null when there is no storage.
    fn data_ptr(&self) -> *const u8;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the array holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether elements are laid out back-to-back.
    fn is_contiguous(&self) -> bool {
        true
    }
}

impl<T: Element> ArrayHandle for [T] {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn data_ptr(&self) -> *const u8 {
        self.as_ptr().cast()
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: Element, const N: usize> ArrayHandle for [T; N] {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn data_ptr(&self) -> *const u8 {
        self.as_ptr().cast()
    }

    fn len(&self) -> usize {
        N
    }
}

impl<T: Element> ArrayHandle for Vec<T> {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn data_ptr(&self) -> *const u8 {
        self.as_ptr().cast()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Element> ArrayHandle for Box<[T]> {
    fn element_kind(&self) -> ElementKind {
        T::KIND
    }

    fn data_ptr(&self) -> *const u8 {
        self.as_ptr().cast()
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}
