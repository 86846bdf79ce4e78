//! Test utilities and mock handles for bufaddr development.
//!
//! Provides [`MockArrayHandle`], an [`ArrayHandle`] whose every property
//! is settable and whose reads are counted, plus array fixtures in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;

use bufaddr_core::{ArrayHandle, ElementKind};

pub mod fixtures;

/// Mock implementation of [`ArrayHandle`].
///
/// Points at a real `Vec<u64>` it owns so addresses are valid and
/// 8-byte aligned. [`relocate`](MockArrayHandle::relocate) swaps in a new
/// allocation to simulate an owner moving the storage;
/// [`detach`](MockArrayHandle::detach) drops it.
pub struct MockArrayHandle {
    storage: Option<Vec<u64>>,
    len: usize,
    kind: ElementKind,
    contiguous: bool,
    ptr_reads: Cell<usize>,
}

impl MockArrayHandle {
    /// A contiguous handle of `len` elements of `kind`.
    pub fn new(kind: ElementKind, len: usize) -> Self {
        Self {
            storage: Some(Self::backing(kind, len)),
            len,
            kind,
            contiguous: true,
            ptr_reads: Cell::new(0),
        }
    }

    fn backing(kind: ElementKind, len: usize) -> Vec<u64> {
        let bytes = kind.size() * len.max(1);
        vec![0u64; bytes.div_ceil(8)]
    }

    /// Mark the handle as strided.
    pub fn strided(mut self) -> Self {
        self.contiguous = false;
        self
    }

    /// Override the reported element count without touching storage.
    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    /// Replace the backing allocation, as an owner resizing in place would.
    pub fn relocate(&mut self) {
        let fresh = Self::backing(self.kind, self.len);
        // Keep the old allocation alive until the new one exists so the
        // two never share an address.
        let _old = self.storage.replace(fresh);
    }

    /// Drop the backing allocation; `data_ptr` becomes null.
    pub fn detach(&mut self) {
        self.storage = None;
    }

    /// How many times `data_ptr` has been called.
    pub fn ptr_reads(&self) -> usize {
        self.ptr_reads.get()
    }

    /// Address of the current allocation, for comparison in tests.
    pub fn expected_ptr(&self) -> *const u8 {
        self.storage
            .as_ref()
            .map_or(std::ptr::null(), |s| s.as_ptr().cast())
    }
}

impl ArrayHandle for MockArrayHandle {
    fn element_kind(&self) -> ElementKind {
        self.kind
    }

    fn data_ptr(&self) -> *const u8 {
        self.ptr_reads.set(self.ptr_reads.get() + 1);
        self.expected_ptr()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_contiguous(&self) -> bool {
        self.contiguous
    }
}
