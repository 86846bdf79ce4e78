//! C-compatible status codes.
//!
//! [`BufaddrStatus`] is a `repr(i32)` enum covering every failure an FFI
//! call can report. Conversions from the core error types are provided.

use bufaddr_core::{AccessError, ConfigError};

use crate::handle::LookupError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufaddrStatus {
    /// Success.
    Ok = 0,
    /// Handle is unknown or was already destroyed.
    InvalidHandle = -1,
    /// Handle (or value) is not an array.
    WrongType = -2,
    /// Array has no backing storage (null pointer or zero elements).
    DetachedBuffer = -3,
    /// Array storage is strided and the accessor requires contiguity.
    NonContiguous = -4,
    /// Array byte length does not fit the address space.
    LengthOverflow = -5,
    /// Buffer address violates the required alignment.
    Misaligned = -6,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -7,
    /// Accessor configuration failed validation.
    ConfigError = -8,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -9,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -10,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&AccessError> for BufaddrStatus {
    fn from(e: &AccessError) -> Self {
        match e {
            AccessError::WrongType { .. } => BufaddrStatus::WrongType,
            AccessError::DetachedBuffer => BufaddrStatus::DetachedBuffer,
            AccessError::NonContiguous => BufaddrStatus::NonContiguous,
            AccessError::LengthOverflow => BufaddrStatus::LengthOverflow,
            AccessError::Misaligned { .. } => BufaddrStatus::Misaligned,
        }
    }
}

impl From<&ConfigError> for BufaddrStatus {
    fn from(_e: &ConfigError) -> Self {
        BufaddrStatus::ConfigError
    }
}

impl From<LookupError> for BufaddrStatus {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::OtherTable => BufaddrStatus::WrongType,
            LookupError::Stale => BufaddrStatus::InvalidHandle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_values_are_stable() {
        assert_eq!(BufaddrStatus::Ok as i32, 0);
        assert_eq!(BufaddrStatus::InvalidHandle as i32, -1);
        assert_eq!(BufaddrStatus::WrongType as i32, -2);
        assert_eq!(BufaddrStatus::DetachedBuffer as i32, -3);
        assert_eq!(BufaddrStatus::NonContiguous as i32, -4);
        assert_eq!(BufaddrStatus::LengthOverflow as i32, -5);
        assert_eq!(BufaddrStatus::Misaligned as i32, -6);
        assert_eq!(BufaddrStatus::InvalidArgument as i32, -7);
        assert_eq!(BufaddrStatus::ConfigError as i32, -8);
        assert_eq!(BufaddrStatus::BufferTooSmall as i32, -9);
        assert_eq!(BufaddrStatus::InternalError as i32, -10);
        assert_eq!(BufaddrStatus::Panicked as i32, -128);
    }

    #[test]
    fn access_error_to_status() {
        assert_eq!(
            BufaddrStatus::from(&AccessError::WrongType {
                found: "int".into()
            }),
            BufaddrStatus::WrongType
        );
        assert_eq!(
            BufaddrStatus::from(&AccessError::DetachedBuffer),
            BufaddrStatus::DetachedBuffer
        );
        assert_eq!(
            BufaddrStatus::from(&AccessError::NonContiguous),
            BufaddrStatus::NonContiguous
        );
        assert_eq!(
            BufaddrStatus::from(&AccessError::LengthOverflow),
            BufaddrStatus::LengthOverflow
        );
    }

    #[test]
    fn lookup_error_to_status() {
        assert_eq!(
            BufaddrStatus::from(LookupError::OtherTable),
            BufaddrStatus::WrongType
        );
        assert_eq!(
            BufaddrStatus::from(LookupError::Stale),
            BufaddrStatus::InvalidHandle
        );
    }

    #[test]
    fn config_error_to_status() {
        assert_eq!(
            BufaddrStatus::from(&ConfigError::InvalidAlignment { value: 3 }),
            BufaddrStatus::ConfigError
        );
    }
}
