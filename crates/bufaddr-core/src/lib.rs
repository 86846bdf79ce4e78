//! Core types for bufaddr: safe exposure of numeric-array buffer addresses.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! [`ArrayHandle`] abstraction, the [`AddressValue`] it produces, the owned
//! [`NumArray`] and borrowed [`ForeignBuffer`] providers, and the
//! [`BufferAddressAccessor`] that validates a handle before handing out the
//! address of its backing store.
//!
//! ```
//! use bufaddr_core::{get_buffer_address, AccessError};
//!
//! let samples = vec![0.0f64; 10];
//! let addr = get_buffer_address(&samples).unwrap();
//! assert_eq!(addr.as_ptr::<f64>(), samples.as_ptr());
//!
//! let empty: Vec<f64> = Vec::new();
//! assert_eq!(get_buffer_address(&empty), Err(AccessError::DetachedBuffer));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accessor;
pub mod address;
pub mod array;
pub mod config;
pub mod element;
pub mod error;
pub mod foreign;
pub mod handle;

pub use accessor::{get_buffer_address, BufferAddressAccessor, BufferRegion};
pub use address::AddressValue;
pub use array::{ArrayData, NumArray, Shape};
pub use config::AccessorConfig;
pub use element::{Element, ElementKind};
pub use error::{AccessError, ConfigError, ShapeError};
pub use foreign::ForeignBuffer;
pub use handle::ArrayHandle;
