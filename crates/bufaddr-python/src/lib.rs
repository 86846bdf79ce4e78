//! Python bindings for bufaddr.
//!
//! The native extension `_bufaddr` exposes the buffer address accessor to
//! Python code holding numpy arrays:
//!
//! ```python
//! import numpy as np
//! from _bufaddr import Hdf5, BufferAddressAccessor
//!
//! a = np.zeros(10)
//! addr = Hdf5.get_buffer_address(a)          # class-level entry point
//! acc = BufferAddressAccessor(min_alignment=16)
//! region = acc.describe(a)                   # address, len, byte_len, kind
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

use pyo3::prelude::*;

mod accessor;
mod error;
mod extract;

/// The native `_bufaddr` extension module.
#[pymodule]
fn _bufaddr(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    // Classes
    m.add_class::<accessor::Hdf5>()?;
    m.add_class::<accessor::BufferAddressAccessor>()?;
    m.add_class::<accessor::BufferRegion>()?;

    // Exceptions
    m.add("BufferAddressError", py.get_type::<error::BufferAddressError>())?;
    m.add("WrongType", py.get_type::<error::WrongType>())?;
    m.add("DetachedBuffer", py.get_type::<error::DetachedBuffer>())?;
    m.add("NonContiguous", py.get_type::<error::NonContiguous>())?;
    m.add("LengthOverflow", py.get_type::<error::LengthOverflow>())?;
    m.add("Misaligned", py.get_type::<error::Misaligned>())?;

    // Functions
    m.add_function(wrap_pyfunction!(accessor::get_buffer_address, m)?)?;

    Ok(())
}
