//! C-compatible element kinds and the region descriptor.

use bufaddr_core::{BufferRegion, ElementKind};

/// Element type of an array, ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufaddrElementKind {
    /// `int8_t`.
    Int8 = 0,
    /// `uint8_t`.
    UInt8 = 1,
    /// `int16_t`.
    Int16 = 2,
    /// `uint16_t`.
    UInt16 = 3,
    /// `int32_t`.
    Int32 = 4,
    /// `uint32_t`.
    UInt32 = 5,
    /// `int64_t`.
    Int64 = 6,
    /// `uint64_t`.
    UInt64 = 7,
    /// `float`.
    Float32 = 8,
    /// `double`.
    Float64 = 9,
    /// `float _Complex` (two floats).
    Complex64 = 10,
    /// `double _Complex` (two doubles).
    Complex128 = 11,
}

impl BufaddrElementKind {
    /// Decode a raw C value, rejecting unknown discriminants.
    pub fn from_raw(raw: i32) -> Option<Self> {
        Some(match raw {
            0 => Self::Int8,
            1 => Self::UInt8,
            2 => Self::Int16,
            3 => Self::UInt16,
            4 => Self::Int32,
            5 => Self::UInt32,
            6 => Self::Int64,
            7 => Self::UInt64,
            8 => Self::Float32,
            9 => Self::Float64,
            10 => Self::Complex64,
            11 => Self::Complex128,
            _ => return None,
        })
    }
}

impl From<BufaddrElementKind> for ElementKind {
    fn from(k: BufaddrElementKind) -> Self {
        match k {
            BufaddrElementKind::Int8 => ElementKind::Int8,
            BufaddrElementKind::UInt8 => ElementKind::UInt8,
            BufaddrElementKind::Int16 => ElementKind::Int16,
            BufaddrElementKind::UInt16 => ElementKind::UInt16,
            BufaddrElementKind::Int32 => ElementKind::Int32,
            BufaddrElementKind::UInt32 => ElementKind::UInt32,
            BufaddrElementKind::Int64 => ElementKind::Int64,
            BufaddrElementKind::UInt64 => ElementKind::UInt64,
            BufaddrElementKind::Float32 => ElementKind::Float32,
            BufaddrElementKind::Float64 => ElementKind::Float64,
            BufaddrElementKind::Complex64 => ElementKind::Complex64,
            BufaddrElementKind::Complex128 => ElementKind::Complex128,
        }
    }
}

impl From<ElementKind> for BufaddrElementKind {
    fn from(k: ElementKind) -> Self {
        match k {
            ElementKind::Int8 => Self::Int8,
            ElementKind::UInt8 => Self::UInt8,
            ElementKind::Int16 => Self::Int16,
            ElementKind::UInt16 => Self::UInt16,
            ElementKind::Int32 => Self::Int32,
            ElementKind::UInt32 => Self::UInt32,
            ElementKind::Int64 => Self::Int64,
            ElementKind::UInt64 => Self::UInt64,
            ElementKind::Float32 => Self::Float32,
            ElementKind::Float64 => Self::Float64,
            ElementKind::Complex64 => Self::Complex64,
            ElementKind::Complex128 => Self::Complex128,
        }
    }
}

/// A validated backing-store description, filled by `bufaddr_buffer_region`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufaddrRegion {
    /// Address of the first element.
    pub address: u64,
    /// Element count.
    pub len: usize,
    /// Total size in bytes.
    pub byte_len: usize,
    /// A `BufaddrElementKind` value.
    pub kind: i32,
}

impl From<&BufferRegion> for BufaddrRegion {
    fn from(r: &BufferRegion) -> Self {
        Self {
            address: r.address.get(),
            len: r.len,
            byte_len: r.byte_len,
            kind: BufaddrElementKind::from(r.kind) as i32,
        }
    }
}
