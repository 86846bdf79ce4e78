//! Accessor FFI: explicitly constructed validation policies.
//!
//! C callers that need a non-default policy create an accessor handle once
//! and pass it alongside each array handle.

use std::sync::Mutex;

use bufaddr_core::{AccessorConfig, BufferAddressAccessor};

use crate::address::resolve_region;
use crate::handle::{HandleTable, ACCESSOR_TAG};
use crate::status::BufaddrStatus;

static ACCESSORS: Mutex<HandleTable<BufferAddressAccessor>> =
    Mutex::new(HandleTable::new(ACCESSOR_TAG));

/// Create an accessor.
///
/// `require_contiguous` is a C boolean (non-zero = true). `min_alignment`
/// must be a power of two; otherwise `BUFADDR_STATUS_CONFIG_ERROR`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_accessor_create(
    require_contiguous: u8,
    min_alignment: usize,
    accessor_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if accessor_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        let config = AccessorConfig {
            require_contiguous: require_contiguous != 0,
            min_alignment,
        };
        let accessor = match BufferAddressAccessor::new(config) {
            Ok(a) => a,
            Err(e) => return BufaddrStatus::from(&e) as i32,
        };
        let Some(handle) = ffi_lock!(ACCESSORS).insert(accessor) else {
            return BufaddrStatus::InternalError as i32;
        };
        // SAFETY: accessor_out is non-null and valid per caller contract.
        unsafe { *accessor_out = handle };
        BufaddrStatus::Ok as i32
    })
}

/// Destroy an accessor handle.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_accessor_destroy(accessor_handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ACCESSORS).remove(accessor_handle) {
            Ok(_) => BufaddrStatus::Ok as i32,
            Err(e) => BufaddrStatus::from(e) as i32,
        }
    })
}

/// Resolve the address of `array_handle` under `accessor_handle`'s policy.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_accessor_address(
    accessor_handle: u64,
    array_handle: u64,
    address_out: *mut u64,
) -> i32 {
    ffi_guard!({
        if address_out.is_null() {
            return BufaddrStatus::InvalidArgument as i32;
        }
        // Copy the accessor out so ACCESSORS and ARRAYS are never held together.
        let accessor = match ffi_lock!(ACCESSORS).get(accessor_handle) {
            Ok(a) => *a,
            Err(e) => return BufaddrStatus::from(e) as i32,
        };
        match resolve_region(&accessor, array_handle) {
            Ok(region) => {
                // SAFETY: address_out is non-null and valid per caller contract.
                unsafe { *address_out = region.address.get() };
                BufaddrStatus::Ok as i32
            }
            Err(status) => status as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::bufaddr_buffer_address;
    use crate::array::{bufaddr_array_create, bufaddr_array_destroy};
    use crate::types::BufaddrElementKind;

    #[test]
    fn accessor_matches_default_lookup() {
        let mut acc = 0u64;
        assert_eq!(bufaddr_accessor_create(1, 8, &mut acc), 0);

        let mut arr = 0u64;
        let dims = [16usize];
        bufaddr_array_create(BufaddrElementKind::Float64 as i32, dims.as_ptr(), 1, &mut arr);

        let mut via_acc = 0u64;
        let mut direct = 0u64;
        assert_eq!(bufaddr_accessor_address(acc, arr, &mut via_acc), 0);
        assert_eq!(bufaddr_buffer_address(arr, &mut direct), 0);
        assert_eq!(via_acc, direct);

        bufaddr_array_destroy(arr);
        bufaddr_accessor_destroy(acc);
    }

    #[test]
    fn invalid_alignment_is_config_error() {
        let mut acc = 0u64;
        assert_eq!(
            bufaddr_accessor_create(1, 24, &mut acc),
            BufaddrStatus::ConfigError as i32
        );
        assert_eq!(
            bufaddr_accessor_create(1, 0, &mut acc),
            BufaddrStatus::ConfigError as i32
        );
    }

    #[test]
    fn handles_are_checked_for_kind() {
        let mut acc = 0u64;
        bufaddr_accessor_create(0, 1, &mut acc);
        let mut arr = 0u64;
        let dims = [2usize];
        bufaddr_array_create(BufaddrElementKind::UInt8 as i32, dims.as_ptr(), 1, &mut arr);

        let mut addr = 0u64;
        // Arguments swapped: each handle lands in the other table.
        assert_eq!(
            bufaddr_accessor_address(arr, acc, &mut addr),
            BufaddrStatus::WrongType as i32
        );
        // Accessor handle where an array is expected.
        assert_eq!(
            bufaddr_buffer_address(acc, &mut addr),
            BufaddrStatus::WrongType as i32
        );

        bufaddr_array_destroy(arr);
        bufaddr_accessor_destroy(acc);
        assert_eq!(
            bufaddr_accessor_destroy(acc),
            BufaddrStatus::InvalidHandle as i32
        );
    }

    #[test]
    fn detached_array_through_accessor() {
        let mut acc = 0u64;
        bufaddr_accessor_create(1, 1, &mut acc);
        let mut arr = 0u64;
        let dims = [0usize];
        bufaddr_array_create(BufaddrElementKind::Int64 as i32, dims.as_ptr(), 1, &mut arr);
        let mut addr = 0u64;
        assert_eq!(
            bufaddr_accessor_address(acc, arr, &mut addr),
            BufaddrStatus::DetachedBuffer as i32
        );
        assert_eq!(addr, 0);
        bufaddr_array_destroy(arr);
        bufaddr_accessor_destroy(acc);
    }
}
