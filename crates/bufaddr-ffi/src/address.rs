//! Address queries: array handles and caller-owned memory.
//!
//! The returned `uint64_t` is the address of the first element at the
//! moment of the call. It dangles as soon as the array is released or
//! destroyed; keeping the array alive while the address is in use is the
//! caller's job.

use bufaddr_core::{BufferAddressAccessor, BufferRegion, ForeignBuffer};

use crate::array::arrays;
use crate::status::BufaddrStatus;
use crate::types::{BufaddrElementKind, BufaddrRegion};

/// Resolve `array_handle` with `accessor`, holding the array lock only for
/// the lookup.
pub(crate) fn resolve_region(
    accessor: &BufferAddressAccessor,
    array_handle: u64,
) -> Result<BufferRegion, BufaddrStatus> {
    let table = arrays()
        .lock()
        .map_err(|_| BufaddrStatus::InternalError)?;
    let array = table.get(array_handle).map_err(BufaddrStatus::from)?;
    accessor
        .describe(array)
        .map_err(|e| BufaddrStatus::from(&e))
}

/// Write the address of the array's first element to `address_out`,
/// using the default policy (contiguous, element alignment).
///
/// Returns `BUFADDR_STATUS_DETACHED_BUFFER` for arrays without storage;
/// `address_out` is left untouched on any error.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_buffer_address(array_handle: u64, address_out: *mut u64) -> i32 {
    ffi_guard!({
        if address_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        match resolve_region(&BufferAddressAccessor::default(), array_handle) {
            Ok(region) => {
                // SAFETY: address_out is non-null and valid per caller contract.
                unsafe { *address_out = region.address.get() };
                BufaddrStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}

/// Fill `region_out` with the address, length, byte length and kind of
/// the array's backing buffer.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_buffer_region(array_handle: u64, region_out: *mut BufaddrRegion) -> i32 {
    ffi_guard!({
        if region_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        match resolve_region(&BufferAddressAccessor::default(), array_handle) {
            Ok(region) => {
                // SAFETY: region_out is non-null and valid per caller contract.
                unsafe { *region_out = BufaddrRegion::from(&region) };
                BufaddrStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}

/// Validate a caller-owned buffer of `len` elements of `kind` at `data`
/// and write its address to `address_out`.
///
/// Nothing is dereferenced: the call checks null, length, byte extent and
/// alignment only.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_foreign_address(
    data: *const std::ffi::c_void,
    len: usize,
    kind: i32,
    address_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if address_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        let Some(kind) = BufaddrElementKind::from_raw(kind) else {
            return BufaddrStatus::InvalidArgument as i32;
        };
        let buffer = ForeignBuffer::new(data.cast(), len, kind.into());
        match BufferAddressAccessor::default().address_of(&buffer) {
            Ok(addr) => {
                // SAFETY: address_out is non-null and valid per caller contract.
                unsafe { *address_out = addr.get() };
                BufaddrStatus::Ok as i32
            }
            Err(e) => BufaddrStatus::from(&e) as i32,
        }
    })
}
