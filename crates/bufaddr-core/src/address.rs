//! [`AddressValue`]: a pointer-width-safe integer address.

use std::fmt;

// Addresses are carried as u64. Refuse to build where a pointer is wider.
const _: () = assert!(usize::BITS <= u64::BITS);

/// The numeric address of the first element of a backing buffer.
///
/// Produced fresh by every accessor call and never cached. The value is
/// only meaningful while the array it came from is alive and unmoved:
/// once the owner frees, resizes or relocates the storage, the address
/// dangles. Keeping the array alive for as long as the address is in use
/// is the caller's obligation.
///
/// Addresses are always non-zero. A handle without storage yields
/// [`AccessError::DetachedBuffer`](crate::AccessError::DetachedBuffer)
/// instead of a zero address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressValue(u64);

impl AddressValue {
    /// Expose the address of `ptr`, or `None` if it is null.
    ///
    /// Uses the exposed-provenance API so that [`as_ptr`](Self::as_ptr)
    /// can later rebuild a pointer the consumer may legally dereference.
    pub fn from_ptr<T>(ptr: *const T) -> Option<Self> {
        if ptr.is_null() {
            return None;
        }
        Some(Self(ptr.expose_provenance() as u64))
    }

    /// The raw 64-bit address.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The address as a native `usize`.
    pub fn as_usize(self) -> usize {
        // Lossless: every value originated from a `usize`.
        self.0 as usize
    }

    /// Rebuild a typed pointer to the buffer.
    ///
    /// Creating the pointer is safe; dereferencing it is only sound while
    /// the originating array is alive and unmutated.
    pub fn as_ptr<T>(self) -> *const T {
        std::ptr::with_exposed_provenance(self.as_usize())
    }

    /// Rebuild a typed mutable pointer to the buffer.
    pub fn as_mut_ptr<T>(self) -> *mut T {
        std::ptr::with_exposed_provenance_mut(self.as_usize())
    }

    /// Whether the address is a multiple of `align`.
    ///
    /// `align` must be a power of two; other values return `false`.
    pub fn is_aligned_to(self, align: usize) -> bool {
        align.is_power_of_two() && self.0 & (align as u64 - 1) == 0
    }

    /// The address `bytes` past this one, or `None` on overflow.
    pub fn offset_bytes(self, bytes: usize) -> Option<Self> {
        self.as_usize().checked_add(bytes).map(|a| Self(a as u64))
    }
}

impl fmt::Display for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for AddressValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<AddressValue> for u64 {
    fn from(a: AddressValue) -> Self {
        a.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_pointer_has_no_address() {
        assert_eq!(AddressValue::from_ptr(std::ptr::null::<f64>()), None);
    }

    #[test]
    fn round_trips_through_pointer() {
        let data = [1.5f64, 2.5, 3.5];
        let addr = AddressValue::from_ptr(data.as_ptr()).unwrap();
        let back = addr.as_ptr::<f64>();
        assert_eq!(back, data.as_ptr());
        assert_eq!(addr.as_usize(), data.as_ptr() as usize);
    }

    #[test]
    fn alignment_checks() {
        let addr = AddressValue::from_ptr(std::ptr::without_provenance::<u8>(0x40)).unwrap();
        assert!(addr.is_aligned_to(1));
        assert!(addr.is_aligned_to(64));
        assert!(!addr.is_aligned_to(128));
        assert!(!addr.is_aligned_to(0));
        assert!(!addr.is_aligned_to(3));
    }

    #[test]
    fn offset_detects_overflow() {
        let addr = AddressValue::from_ptr(std::ptr::without_provenance::<u8>(usize::MAX - 1))
            .unwrap();
        assert_eq!(addr.offset_bytes(1).map(AddressValue::as_usize), Some(usize::MAX));
        assert_eq!(addr.offset_bytes(2), None);
    }

    #[test]
    fn display_is_prefixed_hex() {
        let addr = AddressValue::from_ptr(std::ptr::without_provenance::<u8>(0xdead0)).unwrap();
        assert_eq!(addr.to_string(), "0xdead0");
        assert_eq!(format!("{addr:x}"), "dead0");
        assert_eq!(u64::from(addr), 0xdead0);
    }
}
