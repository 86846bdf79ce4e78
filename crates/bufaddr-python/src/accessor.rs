//! Python-facing accessor classes.
//!
//! Three entry points share one implementation: the static
//! `Hdf5.get_buffer_address`, the module-level `get_buffer_address`, and
//! instances of `BufferAddressAccessor` for callers that want a policy
//! other than the default. All hold the GIL throughout: the work is a few
//! field reads on the array object, and releasing the GIL would let
//! another thread resize the array mid-read.

use bufaddr_core::AccessorConfig;
use pyo3::prelude::*;

use crate::error::{access_error, config_error};
use crate::extract::foreign_buffer;

fn resolve(
    accessor: &bufaddr_core::BufferAddressAccessor,
    array: &Bound<'_, PyAny>,
) -> PyResult<u64> {
    let buffer = foreign_buffer(array).map_err(|e| access_error(&e))?;
    accessor
        .address_of(&buffer)
        .map(|addr| addr.get())
        .map_err(|e| access_error(&e))
}

/// Return the address of `array`'s first element as an int.
///
/// Raises WrongType for anything that is not a supported numpy array and
/// DetachedBuffer for arrays with no elements. The address is only valid
/// while `array` is alive and is not resized.
#[pyfunction]
pub(crate) fn get_buffer_address(array: &Bound<'_, PyAny>) -> PyResult<u64> {
    resolve(&bufaddr_core::BufferAddressAccessor::default(), array)
}

/// Host type carrying the class-level entry point, named after the file
/// format reader whose zero-copy reads consume these addresses.
#[pyclass(frozen)]
pub(crate) struct Hdf5;

#[pymethods]
impl Hdf5 {
    /// Return the address of `array`'s first element as an int.
    #[staticmethod]
    fn get_buffer_address(array: &Bound<'_, PyAny>) -> PyResult<u64> {
        get_buffer_address(array)
    }
}

/// A validated description of an array's backing buffer.
#[pyclass(frozen, get_all)]
#[derive(Clone)]
pub(crate) struct BufferRegion {
    /// Address of the first element.
    address: u64,
    /// Element count.
    len: usize,
    /// Total size in bytes.
    byte_len: usize,
    /// Element kind name, e.g. "float64".
    kind: &'static str,
}

#[pymethods]
impl BufferRegion {
    fn __repr__(&self) -> String {
        format!(
            "BufferRegion(address={:#x}, len={}, byte_len={}, kind='{}')",
            self.address, self.len, self.byte_len, self.kind
        )
    }
}

impl From<bufaddr_core::BufferRegion> for BufferRegion {
    fn from(r: bufaddr_core::BufferRegion) -> Self {
        Self {
            address: r.address.get(),
            len: r.len,
            byte_len: r.byte_len,
            kind: r.kind.name(),
        }
    }
}

/// An explicitly constructed accessor with its own validation policy.
///
/// Args:
///     require_contiguous: Reject strided views (default True).
///     min_alignment: Minimum address alignment in bytes, a power of two
///         (default 1).
#[pyclass(frozen)]
pub(crate) struct BufferAddressAccessor {
    inner: bufaddr_core::BufferAddressAccessor,
}

#[pymethods]
impl BufferAddressAccessor {
    #[new]
    #[pyo3(signature = (require_contiguous=true, min_alignment=1))]
    fn new(require_contiguous: bool, min_alignment: usize) -> PyResult<Self> {
        let config = AccessorConfig {
            require_contiguous,
            min_alignment,
        };
        let inner =
            bufaddr_core::BufferAddressAccessor::new(config).map_err(|e| config_error(&e))?;
        Ok(Self { inner })
    }

    /// Return the address of `array`'s first element as an int.
    fn get_buffer_address(&self, array: &Bound<'_, PyAny>) -> PyResult<u64> {
        resolve(&self.inner, array)
    }

    /// Return a BufferRegion describing `array`'s backing buffer.
    fn describe(&self, array: &Bound<'_, PyAny>) -> PyResult<BufferRegion> {
        let buffer = foreign_buffer(array).map_err(|e| access_error(&e))?;
        self.inner
            .describe(&buffer)
            .map(BufferRegion::from)
            .map_err(|e| access_error(&e))
    }

    /// Whether strided views are rejected.
    #[getter]
    fn require_contiguous(&self) -> bool {
        self.inner.config().require_contiguous
    }

    /// Minimum address alignment in bytes.
    #[getter]
    fn min_alignment(&self) -> usize {
        self.inner.config().min_alignment
    }

    fn __repr__(&self) -> String {
        let cfg = self.inner.config();
        format!(
            "BufferAddressAccessor(require_contiguous={}, min_alignment={})",
            if cfg.require_contiguous { "True" } else { "False" },
            cfg.min_alignment
        )
    }
}
