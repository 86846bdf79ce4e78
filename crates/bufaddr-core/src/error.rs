//! Error types for buffer address access.
//!
//! Split by concern: [`AccessError`] for accessor calls, [`ConfigError`]
//! for accessor construction, and [`ShapeError`] for building a
//! [`NumArray`](crate::NumArray).

use std::error::Error;
use std::fmt;

use crate::address::AddressValue;

/// Errors from resolving the backing-store address of a handle.
///
/// Every variant is a local validation failure: the handle is never
/// modified and retrying without changing it gives the same result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The argument is not an array handle this accessor understands.
    ///
    /// Raised before any access to the argument is attempted.
    WrongType {
        /// Name of the type that was supplied, if known.
        found: String,
    },
    /// The handle wraps an array but has no backing storage: its data
    /// pointer is null, or it holds zero elements.
    DetachedBuffer,
    /// The handle's elements are strided rather than laid out
    /// back-to-back, and the accessor requires contiguous storage.
    NonContiguous,
    /// `len * element_size` does not fit the address space.
    LengthOverflow,
    /// The data pointer violates the element (or configured) alignment.
    Misaligned {
        /// The offending address.
        address: AddressValue,
        /// The alignment that was required, in bytes.
        align: usize,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { found } => write!(f, "expected an array handle, got {found}"),
            Self::DetachedBuffer => write!(f, "array has no backing buffer"),
            Self::NonContiguous => write!(f, "array storage is not contiguous"),
            Self::LengthOverflow => write!(f, "array byte length overflows the address space"),
            Self::Misaligned { address, align } => {
                write!(f, "buffer address {address} is not aligned to {align} bytes")
            }
        }
    }
}

impl Error for AccessError {}

/// Errors from validating an [`AccessorConfig`](crate::AccessorConfig).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_alignment` is zero or not a power of two.
    InvalidAlignment {
        /// The rejected value.
        value: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlignment { value } => {
                write!(f, "min_alignment must be a non-zero power of two, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from constructing a [`NumArray`](crate::NumArray).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// The supplied data does not hold `product(dims)` elements.
    LengthMismatch {
        /// Element count implied by the dimensions.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },
    /// The product of the dimensions overflows `usize`.
    Overflow,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                f,
                "shape needs {expected} elements but {actual} were supplied"
            ),
            Self::Overflow => write!(f, "element count overflows usize"),
        }
    }
}

impl Error for ShapeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_failure() {
        let e = AccessError::WrongType {
            found: "alloc::string::String".into(),
        };
        assert_eq!(
            e.to_string(),
            "expected an array handle, got alloc::string::String"
        );
        assert_eq!(
            AccessError::DetachedBuffer.to_string(),
            "array has no backing buffer"
        );
        assert_eq!(
            ConfigError::InvalidAlignment { value: 3 }.to_string(),
            "min_alignment must be a non-zero power of two, got 3"
        );
        assert_eq!(
            ShapeError::LengthMismatch {
                expected: 6,
                actual: 5
            }
            .to_string(),
            "shape needs 6 elements but 5 were supplied"
        );
    }

    #[test]
    fn misaligned_message_prints_hex_address() {
        let address = AddressValue::from_ptr(std::ptr::without_provenance::<u8>(8)).unwrap();
        let msg = AccessError::Misaligned { address, align: 16 }.to_string();
        assert!(msg.contains("0x8"), "{msg}");
        assert!(msg.contains("16 bytes"), "{msg}");
    }
}
