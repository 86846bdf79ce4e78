//! bufaddr: safe exposure of numeric-array buffer addresses.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the bufaddr sub-crates. Hand the address of an array's first element to
//! native code (an HDF5 reader, a message-passing layer) for zero-copy
//! I/O, with the array's emptiness, layout and alignment checked first.
//!
//! # Quick start
//!
//! ```rust
//! use bufaddr::prelude::*;
//!
//! // Allocate 10 doubles and expose their buffer.
//! let field = NumArray::zeros(ElementKind::Float64, &[10]).unwrap();
//! let addr = get_buffer_address(&field).unwrap();
//! assert_eq!(addr.as_ptr::<f64>(), field.as_slice::<f64>().unwrap().as_ptr());
//!
//! // Inject a stricter policy where it is needed.
//! let accessor = BufferAddressAccessor::new(AccessorConfig {
//!     require_contiguous: true,
//!     min_alignment: 8,
//! })
//! .unwrap();
//! let region = accessor.describe(&field).unwrap();
//! assert_eq!(region.byte_len, 80);
//!
//! // No storage, no address.
//! let empty = NumArray::zeros(ElementKind::Float64, &[0]).unwrap();
//! assert_eq!(get_buffer_address(&empty), Err(AccessError::DetachedBuffer));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `bufaddr-core` | Handles, arrays, addresses, the accessor, errors |
//! | [`ffi`] | `bufaddr-ffi` | C ABI entry points and status codes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and the accessor (`bufaddr-core`).
///
/// Contains [`types::ArrayHandle`], [`types::NumArray`],
/// [`types::ForeignBuffer`], [`types::AddressValue`], and
/// [`types::BufferAddressAccessor`].
pub use bufaddr_core as types;

/// C ABI (`bufaddr-ffi`).
///
/// The same entry points the generated `bufaddr.h` header declares,
/// callable from Rust for testing or embedding.
pub use bufaddr_ffi as ffi;

/// Common imports for typical bufaddr usage.
///
/// ```rust
/// use bufaddr::prelude::*;
/// ```
pub mod prelude {
    // Handles and providers
    pub use bufaddr_core::{ArrayHandle, Element, ElementKind, ForeignBuffer, NumArray};

    // Accessor
    pub use bufaddr_core::{
        get_buffer_address, AccessorConfig, AddressValue, BufferAddressAccessor, BufferRegion,
    };

    // Errors
    pub use bufaddr_core::{AccessError, ConfigError, ShapeError};
}
