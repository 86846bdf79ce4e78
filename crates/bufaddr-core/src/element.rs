//! Element kinds and the [`Element`] trait tying Rust scalars to them.

use std::fmt;
use std::mem;

use crate::array::ArrayData;

/// The scalar type of an array's elements.
///
/// Complex kinds are stored as `[real, imaginary]` pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `i8`.
    Int8,
    /// `u8`.
    UInt8,
    /// `i16`.
    Int16,
    /// `u16`.
    UInt16,
    /// `i32`.
    Int32,
    /// `u32`.
    UInt32,
    /// `i64`.
    Int64,
    /// `u64`.
    UInt64,
    /// `f32`.
    Float32,
    /// `f64`.
    Float64,
    /// `[f32; 2]` complex pair.
    Complex64,
    /// `[f64; 2]` complex pair.
    Complex128,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [ElementKind; 12] = [
        ElementKind::Int8,
        ElementKind::UInt8,
        ElementKind::Int16,
        ElementKind::UInt16,
        ElementKind::Int32,
        ElementKind::UInt32,
        ElementKind::Int64,
        ElementKind::UInt64,
        ElementKind::Float32,
        ElementKind::Float64,
        ElementKind::Complex64,
        ElementKind::Complex128,
    ];

    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 | Self::Complex64 => 8,
            Self::Complex128 => 16,
        }
    }

    /// Required alignment of one element on this platform.
    pub fn align(self) -> usize {
        match self {
            Self::Int8 => mem::align_of::<i8>(),
            Self::UInt8 => mem::align_of::<u8>(),
            Self::Int16 => mem::align_of::<i16>(),
            Self::UInt16 => mem::align_of::<u16>(),
            Self::Int32 => mem::align_of::<i32>(),
            Self::UInt32 => mem::align_of::<u32>(),
            Self::Int64 => mem::align_of::<i64>(),
            Self::UInt64 => mem::align_of::<u64>(),
            Self::Float32 | Self::Complex64 => mem::align_of::<f32>(),
            Self::Float64 | Self::Complex128 => mem::align_of::<f64>(),
        }
    }

    /// Total byte length of `len` elements, or `None` if it cannot be
    /// addressed (exceeds `isize::MAX`).
    pub fn byte_len(self, len: usize) -> Option<usize> {
        len.checked_mul(self.size())
            .filter(|&n| n <= isize::MAX as usize)
    }

    /// Single-character type code (`b B h H i I q Q f d F D`), as used by
    /// numpy's `dtype.char` and the buffer protocol.
    pub fn typecode(self) -> char {
        match self {
            Self::Int8 => 'b',
            Self::UInt8 => 'B',
            Self::Int16 => 'h',
            Self::UInt16 => 'H',
            Self::Int32 => 'i',
            Self::UInt32 => 'I',
            Self::Int64 => 'q',
            Self::UInt64 => 'Q',
            Self::Float32 => 'f',
            Self::Float64 => 'd',
            Self::Complex64 => 'F',
            Self::Complex128 => 'D',
        }
    }

    /// Inverse of [`typecode`](Self::typecode).
    ///
    /// Also accepts `l`/`L` (C `long`), resolved to 32 or 64 bits by the
    /// platform's `long` width.
    pub fn from_typecode(c: char) -> Option<Self> {
        Some(match c {
            'b' => Self::Int8,
            'B' => Self::UInt8,
            'h' => Self::Int16,
            'H' => Self::UInt16,
            'i' => Self::Int32,
            'I' => Self::UInt32,
            'q' => Self::Int64,
            'Q' => Self::UInt64,
            'l' if mem::size_of::<std::ffi::c_long>() == 8 => Self::Int64,
            'l' => Self::Int32,
            'L' if mem::size_of::<std::ffi::c_ulong>() == 8 => Self::UInt64,
            'L' => Self::UInt32,
            'f' => Self::Float32,
            'd' => Self::Float64,
            'F' => Self::Complex64,
            'D' => Self::Complex128,
            _ => return None,
        })
    }

    /// Lower-case name, e.g. `"float64"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
        }
    }

    /// Whether this is one of the complex kinds.
    pub fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A Rust scalar that can back an array.
///
/// Implemented for the primitive integers, `f32`, `f64`, and the complex
/// pairs `[f32; 2]` / `[f64; 2]`.
pub trait Element: Copy + Default + Send + Sync + 'static {
    /// The kind this type stores as.
    const KIND: ElementKind;

    /// Move a vector of this type into type-erased array storage.
    fn into_data(values: Vec<Self>) -> ArrayData;

    /// Borrow storage as a slice of this type, if the kinds match.
    fn view(data: &ArrayData) -> Option<&[Self]>;

    /// Mutably borrow storage as a slice of this type, if the kinds match.
    fn view_mut(data: &mut ArrayData) -> Option<&mut [Self]>;
}

macro_rules! impl_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                fn into_data(values: Vec<Self>) -> ArrayData {
                    ArrayData::$kind(values)
                }

                fn view(data: &ArrayData) -> Option<&[Self]> {
                    match data {
                        ArrayData::$kind(v) => Some(v.as_slice()),
                        _ => None,
                    }
                }

                fn view_mut(data: &mut ArrayData) -> Option<&mut [Self]> {
                    match data {
                        ArrayData::$kind(v) => Some(v.as_mut_slice()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    [f32; 2] => Complex64,
    [f64; 2] => Complex128,
}
