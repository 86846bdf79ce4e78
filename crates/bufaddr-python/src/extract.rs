//! numpy.ndarray -> ForeignBuffer, without copying or touching the data.

use bufaddr_core::{AccessError, ElementKind, ForeignBuffer};
use numpy::{PyArrayDescrMethods, PyUntypedArray, PyUntypedArrayMethods};
use pyo3::prelude::*;

/// Describe `obj`'s backing buffer.
///
/// Fails with [`AccessError::WrongType`] unless `obj` is an ndarray whose
/// dtype maps to an [`ElementKind`]. Only metadata fields of the array
/// object are read.
pub(crate) fn foreign_buffer(obj: &Bound<'_, PyAny>) -> Result<ForeignBuffer, AccessError> {
    let array = obj
        .cast::<PyUntypedArray>()
        .map_err(|_| AccessError::WrongType {
            found: type_name(obj),
        })?;
    let dtype = array.dtype();
    let kind = kind_from_typecode(dtype.char()).ok_or_else(|| AccessError::WrongType {
        found: format!("numpy.ndarray of dtype '{}'", dtype.char() as char),
    })?;
    // SAFETY: `array` is a live ndarray borrowed for the duration of this
    // call; `data` is a plain field read.
    let data = unsafe { (*array.as_array_ptr()).data };
    let ptr = data.cast::<u8>().cast_const();
    let len = array.len();
    Ok(if array.is_contiguous() {
        ForeignBuffer::new(ptr, len, kind)
    } else {
        ForeignBuffer::strided(ptr, len, kind)
    })
}

/// Map numpy's `dtype.char` to an element kind.
pub(crate) fn kind_from_typecode(c: u8) -> Option<ElementKind> {
    ElementKind::from_typecode(c as char)
}

fn type_name(obj: &Bound<'_, PyAny>) -> String {
    obj.get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "<unknown type>".to_string())
}
