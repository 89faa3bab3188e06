//! Decode PLY triangle meshes into flat, GPU-ready buffers.
//!
//! This crate provides a pure synchronous decoder for the PLY polygon file
//! format in its ASCII and binary little-endian encodings. Decoding runs to
//! completion on the calling thread and keeps no state between calls, so
//! independent assets can be decoded from any threading context.
//!
//! # Pipeline
//!
//! - [`scan_header`]: Read the textual header up to `end_header`
//! - [`decode_ascii`] / [`decode_binary`]: Decode vertex and face records
//! - [`build`]: Pack the decoded records into a [`DecodedModel`]
//!
//! [`load_mesh`] composes the three stages and is the usual entry point.
//!
//! # Supported profile
//!
//! Only vertex positions, optional vertex normals, and triangular faces are
//! decoded. Extra scalar vertex properties (colors, texture coordinates) are
//! skipped, and faces with a vertex count other than three are dropped.

mod error;

pub mod ascii;
pub mod binary;
pub mod builder;
pub mod header;
pub mod index;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub use ascii::decode_ascii;
pub use binary::decode_binary;
pub use builder::{BoundingBox, DEFAULT_NORMAL, DecodedModel, RawMesh, build};
pub use error::{DecodeError, DecodeResult};
pub use header::{Encoding, HeaderDescriptor, scan_header};
pub use index::MeshIndex;

/// Decode a complete PLY mesh from `source`.
///
/// Scans the header, decodes the body with the decoder matching the declared
/// encoding, and packs the result. Any stage error aborts the whole decode.
pub fn load_mesh<I: MeshIndex, R: BufRead>(mut source: R) -> DecodeResult<DecodedModel<I>> {
    let header = scan_header(&mut source)?;
    tracing::debug!(
        "PLY header: {:?}, {} vertices, {} faces, normals={}, stride={}",
        header.encoding,
        header.vertex_count,
        header.face_count,
        header.has_normal,
        header.property_stride
    );

    let raw = match header.encoding {
        Encoding::Ascii => decode_ascii(&mut source, &header)?,
        Encoding::BinaryLittleEndian => decode_binary(&mut source, &header)?,
    };

    let model = build(raw);
    tracing::debug!(
        "Decoded PLY mesh: {} vertices, {} triangles",
        model.vertex_count(),
        model.triangle_count
    );
    Ok(model)
}

/// Open the file at `path` and decode it with [`load_mesh`].
pub fn load_mesh_from_path<I: MeshIndex>(path: &Path) -> DecodeResult<DecodedModel<I>> {
    let file = File::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_mesh(BufReader::new(file))
}
