//! C FFI bindings for bufaddr.
//!
//! Exposes arrays and accessors to C as generation-checked `u64` handles
//! and returns buffer addresses as `uint64_t`. Every entry point returns a
//! [`BufaddrStatus`] code (`0` on success) and catches Rust panics at the
//! boundary. The header `include/bufaddr.h` is generated by cbindgen.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::cell::RefCell;
use std::ffi::c_char;

thread_local! {
    /// Message of the last panic caught by `ffi_guard!` on this thread.
    static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
}

fn record_panic(payload: &(dyn std::any::Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

/// Run an FFI body, mapping a caught panic to `BufaddrStatus::Panicked`
/// and recording its message for [`bufaddr_last_panic_message`].
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(code) => code,
            Err(payload) => {
                $crate::record_panic(payload.as_ref());
                $crate::status::BufaddrStatus::Panicked as i32
            }
        }
    };
}

/// Lock a global table, returning `InternalError` from the enclosing
/// `ffi_guard!` body if the mutex is poisoned.
macro_rules! ffi_lock {
    ($table:expr) => {
        match $table.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::BufaddrStatus::InternalError as i32,
        }
    };
}

pub mod accessor;
pub mod address;
pub mod array;
mod handle;
pub mod status;
pub mod types;

pub use accessor::{bufaddr_accessor_address, bufaddr_accessor_create, bufaddr_accessor_destroy};
pub use address::{bufaddr_buffer_address, bufaddr_buffer_region, bufaddr_foreign_address};
pub use array::{
    bufaddr_array_create, bufaddr_array_destroy, bufaddr_array_kind, bufaddr_array_len,
    bufaddr_array_release, bufaddr_array_shape,
};
pub use status::BufaddrStatus;
pub use types::{BufaddrElementKind, BufaddrRegion};

/// Copy the message of the last panic caught on this thread into `buf`.
///
/// Returns the full message length in bytes (0 if no panic was caught).
/// At most `cap - 1` bytes are written, followed by a NUL. Pass a null
/// `buf` or `cap == 0` to query the length only.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn bufaddr_last_panic_message(buf: *mut c_char, cap: usize) -> i32 {
    LAST_PANIC.with(|cell| {
        let msg = cell.borrow();
        if !buf.is_null() && cap > 0 {
            let n = msg.len().min(cap - 1);
            // SAFETY: caller guarantees `buf` has room for `cap` bytes and
            // n < cap.
            unsafe {
                std::ptr::copy_nonoverlapping(msg.as_ptr(), buf.cast::<u8>(), n);
                *buf.add(n) = 0;
            }
        }
        i32::try_from(msg.len()).unwrap_or(i32::MAX)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::handle::{HandleTable, ARRAY_TAG};

    fn last_panic() -> String {
        let len = bufaddr_last_panic_message(std::ptr::null_mut(), 0);
        let mut buf = vec![0u8; len as usize + 1];
        let len2 = bufaddr_last_panic_message(buf.as_mut_ptr().cast(), buf.len());
        assert_eq!(len, len2);
        assert_eq!(buf[len as usize], 0);
        String::from_utf8(buf[..len as usize].to_vec()).unwrap()
    }

    #[test]
    fn guard_catches_panic_and_keeps_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());
        assert_eq!(bufaddr_last_panic_message(std::ptr::null_mut(), 0), 0);

        let status = ffi_guard!({
            panic!("address lookup blew up");
        });
        assert_eq!(status, BufaddrStatus::Panicked as i32);
        assert_eq!(status, -128);
        assert!(last_panic().contains("address lookup blew up"));

        let formatted = ffi_guard!({
            panic!("slot {} gone", 7);
        });
        assert_eq!(formatted, BufaddrStatus::Panicked as i32);
        assert_eq!(last_panic(), "slot 7 gone");
    }

    #[test]
    fn panic_message_is_truncated_to_capacity() {
        let _ = ffi_guard!({
            panic!("abcdefgh");
        });
        let mut buf = [0xFFu8; 4];
        let len = bufaddr_last_panic_message(buf.as_mut_ptr().cast(), buf.len());
        assert_eq!(len, 8);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn guard_passes_through_normal_codes() {
        assert_eq!(ffi_guard!({ BufaddrStatus::Ok as i32 }), 0);
        assert_eq!(
            ffi_guard!({ BufaddrStatus::WrongType as i32 }),
            BufaddrStatus::WrongType as i32
        );
    }

    #[test]
    fn poisoned_table_is_internal_error() {
        let table: Mutex<HandleTable<u32>> = Mutex::new(HandleTable::new(ARRAY_TAG));
        let handle = table.lock().unwrap().insert(5).unwrap();

        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = table.lock().unwrap();
            panic!("poison the table");
        }));
        assert!(table.is_poisoned());

        let status = ffi_guard!({
            let t = ffi_lock!(table);
            match t.get(handle) {
                Ok(_) => BufaddrStatus::Ok as i32,
                Err(e) => BufaddrStatus::from(e) as i32,
            }
        });
        assert_eq!(status, BufaddrStatus::InternalError as i32);
    }
}
