//! [`NumArray`]: an owned, typed, shaped numeric array.
//!
//! A minimal array provider: it owns contiguous storage for one
//! [`ElementKind`] and a shape, and nothing else. There is no arithmetic.
//! An array with zero elements, or one whose storage has been released,
//! is *detached* and has no address.

use smallvec::SmallVec;

use crate::element::{Element, ElementKind};
use crate::error::ShapeError;
use crate::handle::ArrayHandle;

/// Array dimensions, outermost first.
pub type Shape = SmallVec<[usize; 4]>;

/// Type-erased contiguous storage, one variant per [`ElementKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    /// `i8` storage.
    Int8(Vec<i8>),
    /// `u8` storage.
    UInt8(Vec<u8>),
    /// `i16` storage.
    Int16(Vec<i16>),
    /// `u16` storage.
    UInt16(Vec<u16>),
    /// `i32` storage.
    Int32(Vec<i32>),
    /// `u32` storage.
    UInt32(Vec<u32>),
    /// `i64` storage.
    Int64(Vec<i64>),
    /// `u64` storage.
    UInt64(Vec<u64>),
    /// `f32` storage.
    Float32(Vec<f32>),
    /// `f64` storage.
    Float64(Vec<f64>),
    /// Complex `[f32; 2]` storage.
    Complex64(Vec<[f32; 2]>),
    /// Complex `[f64; 2]` storage.
    Complex128(Vec<[f64; 2]>),
}

macro_rules! each_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ArrayData::Int8($v) => $body,
            ArrayData::UInt8($v) => $body,
            ArrayData::Int16($v) => $body,
            ArrayData::UInt16($v) => $body,
            ArrayData::Int32($v) => $body,
            ArrayData::UInt32($v) => $body,
            ArrayData::Int64($v) => $body,
            ArrayData::UInt64($v) => $body,
            ArrayData::Float32($v) => $body,
            ArrayData::Float64($v) => $body,
            ArrayData::Complex64($v) => $body,
            ArrayData::Complex128($v) => $body,
        }
    };
}

impl ArrayData {
    /// Zero-filled storage for `len` elements of `kind`.
    pub fn zeroed(kind: ElementKind, len: usize) -> Self {
        fn zeros<T: Element>(len: usize) -> ArrayData {
            T::into_data(vec![T::default(); len])
        }
        match kind {
            ElementKind::Int8 => zeros::<i8>(len),
            ElementKind::UInt8 => zeros::<u8>(len),
            ElementKind::Int16 => zeros::<i16>(len),
            ElementKind::UInt16 => zeros::<u16>(len),
            ElementKind::Int32 => zeros::<i32>(len),
            ElementKind::UInt32 => zeros::<u32>(len),
            ElementKind::Int64 => zeros::<i64>(len),
            ElementKind::UInt64 => zeros::<u64>(len),
            ElementKind::Float32 => zeros::<f32>(len),
            ElementKind::Float64 => zeros::<f64>(len),
            ElementKind::Complex64 => zeros::<[f32; 2]>(len),
            ElementKind::Complex128 => zeros::<[f64; 2]>(len),
        }
    }

    /// The element kind of this storage.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Int8(_) => ElementKind::Int8,
            Self::UInt8(_) => ElementKind::UInt8,
            Self::Int16(_) => ElementKind::Int16,
            Self::UInt16(_) => ElementKind::UInt16,
            Self::Int32(_) => ElementKind::Int32,
            Self::UInt32(_) => ElementKind::UInt32,
            Self::Int64(_) => ElementKind::Int64,
            Self::UInt64(_) => ElementKind::UInt64,
            Self::Float32(_) => ElementKind::Float32,
            Self::Float64(_) => ElementKind::Float64,
            Self::Complex64(_) => ElementKind::Complex64,
            Self::Complex128(_) => ElementKind::Complex128,
        }
    }

    /// Number of elements held.
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    /// Whether no elements are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pointer to the first element.
    pub fn as_ptr(&self) -> *const u8 {
        each_variant!(self, v => v.as_ptr().cast::<u8>())
    }
}

/// An owned numeric array: element kind, shape, and contiguous storage.
#[derive(Clone, Debug, PartialEq)]
pub struct NumArray {
    kind: ElementKind,
    shape: Shape,
    data: Option<ArrayData>,
}

impl NumArray {
    /// A zero-filled array of the given kind and dimensions.
    ///
    /// The element count is the product of `dims`, so an empty shape is a
    /// scalar with one element. A shape with any zero dimension has no
    /// elements and produces a detached array.
    pub fn zeros(kind: ElementKind, dims: &[usize]) -> Result<Self, ShapeError> {
        let len = element_count(dims)?;
        let data = (len > 0).then(|| ArrayData::zeroed(kind, len));
        Ok(Self {
            kind,
            shape: Shape::from_slice(dims),
            data,
        })
    }

    /// An array of `kind` with no storage at all.
    pub fn detached(kind: ElementKind) -> Self {
        Self {
            kind,
            shape: Shape::new(),
            data: None,
        }
    }

    /// A one-dimensional array taking ownership of `values`.
    pub fn from_vec<T: Element>(values: Vec<T>) -> Self {
        let len = values.len();
        Self::from_parts(T::KIND, smallvec::smallvec![len], values)
    }

    /// An array taking ownership of `values`, viewed with shape `dims`.
    ///
    /// `values.len()` must equal the product of `dims`.
    pub fn with_shape<T: Element>(values: Vec<T>, dims: &[usize]) -> Result<Self, ShapeError> {
        let expected = element_count(dims)?;
        if values.len() != expected {
            return Err(ShapeError::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self::from_parts(T::KIND, Shape::from_slice(dims), values))
    }

    fn from_parts<T: Element>(kind: ElementKind, shape: Shape, values: Vec<T>) -> Self {
        let data = (!values.is_empty()).then(|| T::into_data(values));
        Self { kind, shape, data }
    }

    /// Element kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Dimensions, outermost first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Whether the array currently has no storage.
    pub fn is_detached(&self) -> bool {
        self.data.is_none()
    }

    /// The underlying storage, if attached.
    pub fn data(&self) -> Option<&ArrayData> {
        self.data.as_ref()
    }

    /// Borrow the elements as `&[T]`.
    ///
    /// `None` if the array is detached or `T` is not its element type.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        self.data.as_ref().and_then(T::view)
    }

    /// Mutably borrow the elements as `&mut [T]`.
    pub fn as_mut_slice<T: Element>(&mut self) -> Option<&mut [T]> {
        self.data.as_mut().and_then(T::view_mut)
    }

    /// Free the storage, leaving the array detached.
    ///
    /// Addresses handed out before this call now dangle. Subsequent
    /// accessor calls report
    /// [`AccessError::DetachedBuffer`](crate::AccessError::DetachedBuffer).
    /// Returns the released storage, if there was any.
    pub fn release(&mut self) -> Option<ArrayData> {
        self.data.take()
    }
}

impl ArrayHandle for NumArray {
    fn element_kind(&self) -> ElementKind {
        self.kind
    }

    fn data_ptr(&self) -> *const u8 {
        self.data
            .as_ref()
            .map_or(std::ptr::null(), ArrayData::as_ptr)
    }

    fn len(&self) -> usize {
        self.data.as_ref().map_or(0, ArrayData::len)
    }
}

fn element_count(dims: &[usize]) -> Result<usize, ShapeError> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or(ShapeError::Overflow)
}
