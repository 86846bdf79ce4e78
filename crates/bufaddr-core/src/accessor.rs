//! The buffer address accessor.
//!
//! [`BufferAddressAccessor`] turns an [`ArrayHandle`] into the
//! [`AddressValue`] of its first element after checking, in order:
//!
//! 1. the argument is an array handle at all ([`AccessError::WrongType`],
//!    only reachable through [`address_of_any`](BufferAddressAccessor::address_of_any));
//! 2. it has storage: non-null pointer and at least one element
//!    ([`AccessError::DetachedBuffer`]);
//! 3. its layout is contiguous, if required ([`AccessError::NonContiguous`]);
//! 4. its byte extent fits the address space ([`AccessError::LengthOverflow`]);
//! 5. the address honours element and configured alignment
//!    ([`AccessError::Misaligned`]).
//!
//! Nothing is cached. Every call reads the handle afresh, so two calls
//! with no mutation in between return the same address.
//!
//! # Caller hazard: stale addresses
//!
//! The returned address is valid only while the array is alive and is
//! neither resized nor moved. Using it after the owner frees the storage
//! is undefined behaviour in whatever consumes it. Within Rust the borrow
//! checker already refuses to let a freed handle reach the accessor:
//!
//! ```compile_fail
//! use bufaddr_core::get_buffer_address;
//!
//! let samples = vec![0.0f64; 10];
//! let view: &Vec<f64> = &samples;
//! drop(samples);
//! let _ = get_buffer_address(view);
//! ```
//!
//! Releasing a [`NumArray`]'s storage is reported explicitly instead:
//!
//! ```
//! use bufaddr_core::{get_buffer_address, AccessError, ElementKind, NumArray};
//!
//! let mut a = NumArray::zeros(ElementKind::Float64, &[10]).unwrap();
//! let before = get_buffer_address(&a).unwrap(); // dangles after release
//! a.release();
//! assert_eq!(get_buffer_address(&a), Err(AccessError::DetachedBuffer));
//! # let _ = before;
//! ```
//!
//! Concurrent mutation of the same handle while the accessor reads it is
//! likewise the caller's responsibility; no synchronisation happens here.

use std::any::Any;

use crate::address::AddressValue;
use crate::array::NumArray;
use crate::config::AccessorConfig;
use crate::element::ElementKind;
use crate::error::{AccessError, ConfigError};
use crate::foreign::ForeignBuffer;
use crate::handle::ArrayHandle;

/// A validated description of a backing store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferRegion {
    /// Address of the first element.
    pub address: AddressValue,
    /// Element count.
    pub len: usize,
    /// `len * kind.size()`.
    pub byte_len: usize,
    /// Element kind.
    pub kind: ElementKind,
}

impl BufferRegion {
    /// One past the last byte of the region.
    pub fn end(&self) -> u64 {
        // Cannot overflow: checked when the region was built.
        self.address.get() + self.byte_len as u64
    }

    /// Whether two regions share any byte.
    pub fn overlaps(&self, other: &BufferRegion) -> bool {
        self.address.get() < other.end() && other.address.get() < self.end()
    }

    /// Whether `address` falls inside the region.
    pub fn contains(&self, address: AddressValue) -> bool {
        (self.address.get()..self.end()).contains(&address.get())
    }
}

/// Resolve the address of `handle`'s backing buffer with the default
/// [`AccessorConfig`].
///
/// ```
/// let samples = vec![0.0f64; 10];
/// let addr = bufaddr_core::get_buffer_address(&samples).unwrap();
/// assert_eq!(addr.as_usize(), samples.as_ptr() as usize);
/// ```
pub fn get_buffer_address<H: ArrayHandle + ?Sized>(
    handle: &H,
) -> Result<AddressValue, AccessError> {
    BufferAddressAccessor::default().address_of(handle)
}

/// Explicitly constructed accessor carrying its validation policy.
///
/// Hand one of these to the code that needs buffer addresses instead of
/// reaching for a global.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferAddressAccessor {
    config: AccessorConfig,
}

impl BufferAddressAccessor {
    /// Build an accessor, validating `config` first.
    pub fn new(config: AccessorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &AccessorConfig {
        &self.config
    }

    /// Address of the first element of `handle`'s backing buffer.
    pub fn address_of<H: ArrayHandle + ?Sized>(
        &self,
        handle: &H,
    ) -> Result<AddressValue, AccessError> {
        self.describe(handle).map(|region| region.address)
    }

    /// Full validated description of `handle`'s backing buffer.
    pub fn describe<H: ArrayHandle + ?Sized>(
        &self,
        handle: &H,
    ) -> Result<BufferRegion, AccessError> {
        let kind = handle.element_kind();
        let len = handle.len();
        let address =
            AddressValue::from_ptr(handle.data_ptr()).ok_or(AccessError::DetachedBuffer)?;
        if len == 0 {
            return Err(AccessError::DetachedBuffer);
        }
        if self.config.require_contiguous && !handle.is_contiguous() {
            return Err(AccessError::NonContiguous);
        }
        let byte_len = kind.byte_len(len).ok_or(AccessError::LengthOverflow)?;
        address
            .offset_bytes(byte_len)
            .ok_or(AccessError::LengthOverflow)?;
        let align = kind.align().max(self.config.min_alignment);
        if !address.is_aligned_to(align) {
            return Err(AccessError::Misaligned { address, align });
        }
        Ok(BufferRegion {
            address,
            len,
            byte_len,
            kind,
        })
    }

    /// Address of a dynamically typed value.
    ///
    /// Recognises [`NumArray`], [`ForeignBuffer`], and `Vec<T>` /
    /// `Box<[T]>` for every [`Element`](crate::Element) type. Anything
    /// else is [`AccessError::WrongType`], reported before the value is
    /// touched.
    pub fn address_of_any(&self, value: &dyn Any) -> Result<AddressValue, AccessError> {
        self.describe_any(value).map(|region| region.address)
    }

    /// [`describe`](Self::describe) for a dynamically typed value.
    pub fn describe_any(&self, value: &dyn Any) -> Result<BufferRegion, AccessError> {
        if let Some(a) = value.downcast_ref::<NumArray>() {
            return self.describe(a);
        }
        if let Some(fb) = value.downcast_ref::<ForeignBuffer>() {
            return self.describe(fb);
        }

        macro_rules! try_containers {
            ($($ty:ty),*) => {
                $(
                    if let Some(v) = value.downcast_ref::<Vec<$ty>>() {
                        return self.describe(v);
                    }
                    if let Some(b) = value.downcast_ref::<Box<[$ty]>>() {
                        return self.describe(b);
                    }
                )*
            };
        }
        try_containers!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, [f32; 2], [f64; 2]);

        Err(AccessError::WrongType {
            found: "a value that is not an array handle".into(),
        })
    }

    /// [`address_of_any`](Self::address_of_any) for a statically known
    /// value, naming its type in any [`AccessError::WrongType`].
    pub fn address_of_value<V: Any>(&self, value: &V) -> Result<AddressValue, AccessError> {
        self.address_of_any(value).map_err(|e| match e {
            AccessError::WrongType { .. } => AccessError::WrongType {
                found: std::any::type_name::<V>().to_string(),
            },
            other => other,
        })
    }
}
