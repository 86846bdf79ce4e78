//! AccessError -> Python exception mapping with recovery hints.

use bufaddr_core::{AccessError, ConfigError};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::{create_exception, PyErr};

create_exception!(
    _bufaddr,
    WrongType,
    PyTypeError,
    "The argument is not a numeric array with a supported dtype."
);
create_exception!(
    _bufaddr,
    BufferAddressError,
    PyValueError,
    "Base class for arrays whose buffer address cannot be exposed."
);
create_exception!(
    _bufaddr,
    DetachedBuffer,
    BufferAddressError,
    "The array has no backing buffer (zero elements or no storage)."
);
create_exception!(
    _bufaddr,
    NonContiguous,
    BufferAddressError,
    "The array is a strided view and the accessor requires contiguity."
);
create_exception!(
    _bufaddr,
    LengthOverflow,
    BufferAddressError,
    "The array's byte length does not fit the address space."
);
create_exception!(
    _bufaddr,
    Misaligned,
    BufferAddressError,
    "The buffer address violates the required alignment."
);

/// Convert an [`AccessError`] into the matching Python exception.
pub(crate) fn access_error(e: &AccessError) -> PyErr {
    let msg = format!("{e}\n  Hint: {}", hint(e));
    match e {
        AccessError::WrongType { .. } => WrongType::new_err(msg),
        AccessError::DetachedBuffer => DetachedBuffer::new_err(msg),
        AccessError::NonContiguous => NonContiguous::new_err(msg),
        AccessError::LengthOverflow => LengthOverflow::new_err(msg),
        AccessError::Misaligned { .. } => Misaligned::new_err(msg),
    }
}

/// Convert a [`ConfigError`] into `ValueError`.
pub(crate) fn config_error(e: &ConfigError) -> PyErr {
    PyValueError::new_err(format!("invalid accessor configuration: {e}"))
}

/// Recovery hint shown under each error message.
fn hint(e: &AccessError) -> &'static str {
    match e {
        AccessError::WrongType { .. } => {
            "Pass a numpy.ndarray with an integer, float or complex dtype. \
             Convert other sequences with numpy.asarray(x, dtype=...) first."
        }
        AccessError::DetachedBuffer => {
            "Zero-element arrays have no buffer to point at. Allocate at least \
             one element (e.g. numpy.empty(n) with n > 0) before asking for \
             its address."
        }
        AccessError::NonContiguous => {
            "Slices with a step and transposed views are strided. Use \
             numpy.ascontiguousarray(a), or construct the accessor with \
             require_contiguous=False if the consumer understands strides."
        }
        AccessError::LengthOverflow => {
            "The array reports more bytes than the address space can hold; \
             it is probably corrupt or was built over foreign memory."
        }
        AccessError::Misaligned { .. } => {
            "Lower min_alignment, or allocate an aligned copy \
             (numpy.require(a, requirements='A') or an over-allocated buffer)."
        }
    }
}
