//! Index buffer element types.

use crate::error::{DecodeError, DecodeResult};

/// An integer type usable as an index buffer element.
///
/// Face indices are stored as 32-bit integers in the file. Converting them
/// to the element type is always checked, so a mesh with more vertices than
/// the element type can address fails to decode instead of wrapping.
pub trait MeshIndex: Copy + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Width of the element in bits.
    const BITS: u32;

    /// Convert a file index, returning `None` if it does not fit.
    fn from_u32(value: u32) -> Option<Self>;

    /// Widen back to `u32`.
    fn to_u32(self) -> u32;
}

impl MeshIndex for u16 {
    const BITS: u32 = u16::BITS;

    fn from_u32(value: u32) -> Option<Self> {
        u16::try_from(value).ok()
    }

    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

impl MeshIndex for u32 {
    const BITS: u32 = u32::BITS;

    fn from_u32(value: u32) -> Option<Self> {
        Some(value)
    }

    fn to_u32(self) -> u32 {
        self
    }
}

/// Validate a decoded face index and narrow it to `I`.
pub(crate) fn narrow_index<I: MeshIndex>(
    value: u32,
    vertex_count: usize,
    face: usize,
) -> DecodeResult<I> {
    if !usize::try_from(value).is_ok_and(|v| v < vertex_count) {
        return Err(DecodeError::MalformedBody(format!(
            "face {face}: vertex index {value} out of range for {vertex_count} vertices"
        )));
    }
    I::from_u32(value).ok_or_else(|| {
        DecodeError::MalformedBody(format!(
            "face {face}: vertex index {value} does not fit a {}-bit index buffer",
            I::BITS
        ))
    })
}
