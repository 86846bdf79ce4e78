//! Array lifecycle FFI: create, release, destroy, and metadata queries.
//!
//! Arrays live in the global `ARRAYS` table. The lock is held only for the
//! duration of a single call, never across calls.

use std::sync::Mutex;

use bufaddr_core::{ArrayHandle, NumArray};

use crate::handle::{HandleTable, ARRAY_TAG};
use crate::status::BufaddrStatus;
use crate::types::BufaddrElementKind;

static ARRAYS: Mutex<HandleTable<NumArray>> = Mutex::new(HandleTable::new(ARRAY_TAG));

pub(crate) fn arrays() -> &'static Mutex<HandleTable<NumArray>> {
    &ARRAYS
}

/// Allocate a zero-filled array of `kind` with `ndims` dimensions.
///
/// `dims` may be null only when `ndims == 0`, which creates a one-element
/// scalar. A shape with a zero dimension has no elements and creates a
/// detached array, whose address queries report
/// `BUFADDR_STATUS_DETACHED_BUFFER`. Writes the new handle to `array_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_array_create(
    kind: i32,
    dims: *const usize,
    ndims: usize,
    array_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if array_out.is_null() || (dims.is_null() && ndims > 0) {
            return BufaddrStatus::InvalidArgument as i32;
        }
        let Some(kind) = BufaddrElementKind::from_raw(kind) else {
            return BufaddrStatus::InvalidArgument as i32;
        };
        let dims: &[usize] = if ndims == 0 {
            &[]
        } else {
            // SAFETY: caller guarantees `dims` points to `ndims` values.
            unsafe { std::slice::from_raw_parts(dims, ndims) }
        };
        let array = match NumArray::zeros(kind.into(), dims) {
            Ok(a) => a,
            Err(_) => return BufaddrStatus::InvalidArgument as i32,
        };
        let Some(handle) = ffi_lock!(ARRAYS).insert(array) else {
            return BufaddrStatus::InternalError as i32;
        };
        // SAFETY: array_out is non-null and valid per caller contract.
        unsafe { *array_out = handle };
        BufaddrStatus::Ok as i32
    })
}

/// Destroy an array, freeing its storage and invalidating the handle.
///
/// Any address previously obtained for this array dangles afterwards.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_array_destroy(array_handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARRAYS).remove(array_handle) {
            Ok(_) => BufaddrStatus::Ok as i32,
            Err(e) => BufaddrStatus::from(e) as i32,
        }
    })
}

/// Free an array's storage but keep the handle, leaving it detached.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_array_release(array_handle: u64) -> i32 {
    ffi_guard!({
        let mut table = ffi_lock!(ARRAYS);
        match table.get_mut(array_handle) {
            Ok(array) => {
                array.release();
                BufaddrStatus::Ok as i32
            }
            Err(e) => BufaddrStatus::from(e) as i32,
        }
    })
}

/// Write the array's element count to `len_out` (0 when detached).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_array_len(array_handle: u64, len_out: *mut usize) -> i32 {
    ffi_guard!({
        if len_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        let len = match ffi_lock!(ARRAYS).get(array_handle) {
            Ok(a) => a.len(),
            Err(e) => return BufaddrStatus::from(e) as i32,
        };
        // SAFETY: len_out is non-null and valid per caller contract.
        unsafe { *len_out = len };
        BufaddrStatus::Ok as i32
    })
}

/// Write the array's `BufaddrElementKind` to `kind_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_array_kind(array_handle: u64, kind_out: *mut i32) -> i32 {
    ffi_guard!({
        if kind_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        let kind = match ffi_lock!(ARRAYS).get(array_handle) {
            Ok(a) => BufaddrElementKind::from(a.kind()),
            Err(e) => return BufaddrStatus::from(e) as i32,
        };
        // SAFETY: kind_out is non-null and valid per caller contract.
        unsafe { *kind_out = kind as i32 };
        BufaddrStatus::Ok as i32
    })
}

/// Copy the array's dimensions into `dims_out` (capacity `dims_cap`) and
/// write the dimension count to `ndims_out`.
///
/// If `dims_cap` is too small, `ndims_out` is still written and
/// `BUFADDR_STATUS_BUFFER_TOO_SMALL` is returned. `dims_out` may be null
/// when `dims_cap == 0`, to query the count alone.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_array_shape(
    array_handle: u64,
    dims_out: *mut usize,
    dims_cap: usize,
    ndims_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if ndims_out.is_null() || (dims_out.is_null() && dims_cap > 0) {
            return BufaddrStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let shape = match table.get(array_handle) {
            Ok(a) => a.shape(),
            Err(e) => return BufaddrStatus::from(e) as i32,
        };
        // SAFETY: ndims_out is non-null and valid per caller contract.
        unsafe { *ndims_out = shape.len() };
        if dims_cap < shape.len() {
            return BufaddrStatus::BufferTooSmall as i32;
        }
        if !shape.is_empty() {
            // SAFETY: dims_out holds at least dims_cap >= shape.len() values.
            let out = unsafe { std::slice::from_raw_parts_mut(dims_out, shape.len()) };
            out.copy_from_slice(shape);
        }
        BufaddrStatus::Ok as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{bufaddr_accessor_create, bufaddr_accessor_destroy};

    fn create(kind: BufaddrElementKind, dims: &[usize]) -> u64 {
        let mut h = 0u64;
        let rc = bufaddr_array_create(kind as i32, dims.as_ptr(), dims.len(), &mut h);
        assert_eq!(rc, BufaddrStatus::Ok as i32);
        h
    }

    #[test]
    fn create_query_destroy() {
        let h = create(BufaddrElementKind::Float64, &[2, 5]);

        let mut len = 0usize;
        assert_eq!(bufaddr_array_len(h, &mut len), 0);
        assert_eq!(len, 10);

        let mut kind = -1i32;
        assert_eq!(bufaddr_array_kind(h, &mut kind), 0);
        assert_eq!(kind, BufaddrElementKind::Float64 as i32);

        let mut dims = [0usize; 4];
        let mut ndims = 0usize;
        assert_eq!(
            bufaddr_array_shape(h, dims.as_mut_ptr(), dims.len(), &mut ndims),
            0
        );
        assert_eq!(&dims[..ndims], &[2, 5]);

        assert_eq!(bufaddr_array_destroy(h), 0);
        assert_eq!(
            bufaddr_array_destroy(h),
            BufaddrStatus::InvalidHandle as i32
        );
        assert_eq!(
            bufaddr_array_len(h, &mut len),
            BufaddrStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn shape_reports_too_small() {
        let h = create(BufaddrElementKind::UInt8, &[1, 2, 3]);
        let mut ndims = 0usize;
        assert_eq!(
            bufaddr_array_shape(h, std::ptr::null_mut(), 0, &mut ndims),
            BufaddrStatus::BufferTooSmall as i32
        );
        assert_eq!(ndims, 3);
        bufaddr_array_destroy(h);
    }

    #[test]
    fn release_leaves_empty_handle() {
        let h = create(BufaddrElementKind::Int32, &[7]);
        assert_eq!(bufaddr_array_release(h), 0);
        let mut len = 99usize;
        assert_eq!(bufaddr_array_len(h, &mut len), 0);
        assert_eq!(len, 0);
        bufaddr_array_destroy(h);
    }

    #[test]
    fn create_rejects_bad_arguments() {
        let mut h = 0u64;
        let dims = [4usize];
        assert_eq!(
            bufaddr_array_create(99, dims.as_ptr(), 1, &mut h),
            BufaddrStatus::InvalidArgument as i32
        );
        assert_eq!(
            bufaddr_array_create(0, std::ptr::null(), 1, &mut h),
            BufaddrStatus::InvalidArgument as i32
        );
        assert_eq!(
            bufaddr_array_create(0, dims.as_ptr(), 1, std::ptr::null_mut()),
            BufaddrStatus::InvalidArgument as i32
        );
        let huge = [usize::MAX, 2];
        assert_eq!(
            bufaddr_array_create(0, huge.as_ptr(), 2, &mut h),
            BufaddrStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn zero_dims_create_scalar_array() {
        let mut h = 0u64;
        assert_eq!(bufaddr_array_create(9, std::ptr::null(), 0, &mut h), 0);
        let mut len = 0usize;
        assert_eq!(bufaddr_array_len(h, &mut len), 0);
        assert_eq!(len, 1);

        let mut dims = [7usize; 2];
        let mut ndims = 9usize;
        assert_eq!(bufaddr_array_shape(h, dims.as_mut_ptr(), 2, &mut ndims), 0);
        assert_eq!(ndims, 0);

        let mut addr = 0u64;
        assert_eq!(crate::address::bufaddr_buffer_address(h, &mut addr), 0);
        assert_ne!(addr, 0);
        bufaddr_array_destroy(h);
    }

    #[test]
    fn zero_extent_creates_detached_array() {
        let mut h = 0u64;
        let dims = [4usize, 0];
        assert_eq!(bufaddr_array_create(9, dims.as_ptr(), 2, &mut h), 0);
        let mut len = 1usize;
        assert_eq!(bufaddr_array_len(h, &mut len), 0);
        assert_eq!(len, 0);
        bufaddr_array_destroy(h);
    }

    #[test]
    fn accessor_handle_is_not_an_array() {
        let mut acc = 0u64;
        assert_eq!(bufaddr_accessor_create(1, 1, &mut acc), 0);
        let mut len = 0usize;
        assert_eq!(
            bufaddr_array_len(acc, &mut len),
            BufaddrStatus::WrongType as i32
        );
        assert_eq!(
            bufaddr_array_destroy(acc),
            BufaddrStatus::WrongType as i32
        );
        bufaddr_accessor_destroy(acc);
    }
}
