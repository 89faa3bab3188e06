//! Binary little-endian body decoding.
//!
//! # Record layout
//!
//! - Vertex: `property_stride` × `f32`. The first three are the position,
//!   the next three the normal when declared; the rest are skipped.
//! - Face: `u8` vertex count `k`, then `k` × 32-bit vertex indices.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::builder::RawMesh;
use crate::error::{DecodeError, DecodeResult};
use crate::header::HeaderDescriptor;
use crate::index::{MeshIndex, narrow_index};

/// Size of one scalar vertex property in bytes.
const SCALAR_SIZE: usize = 4;

/// Decode `header.vertex_count` vertex records followed by
/// `header.face_count` face records.
pub fn decode_binary<I: MeshIndex, R: Read>(
    reader: &mut R,
    header: &HeaderDescriptor,
) -> DecodeResult<RawMesh<I>> {
    let mut mesh = RawMesh::with_capacity(header.vertex_count, header.face_count);

    if header.vertex_count > 0 {
        let consumed = if header.has_normal { 6 } else { 3 };
        let skip = header.property_stride.checked_sub(consumed).ok_or_else(|| {
            DecodeError::MalformedBody(format!(
                "vertex records declare {} properties but {consumed} are required",
                header.property_stride
            ))
        })?;
        let mut skipped = vec![0u8; skip * SCALAR_SIZE];

        for vertex in 0..header.vertex_count {
            let what = || format!("vertex {vertex}");
            let position = read_vec3(reader).map_err(|e| DecodeError::truncated(e, what))?;
            let normal = if header.has_normal {
                Some(read_vec3(reader).map_err(|e| DecodeError::truncated(e, what))?)
            } else {
                None
            };
            reader
                .read_exact(&mut skipped)
                .map_err(|e| DecodeError::truncated(e, what))?;
            mesh.push_vertex(position, normal);
        }
    }

    for face in 0..header.face_count {
        let what = || format!("face {face}");
        let count = reader
            .read_u8()
            .map_err(|e| DecodeError::truncated(e, what))?;

        if count == 3 {
            let mut next_index = || -> DecodeResult<I> {
                let value = reader
                    .read_i32::<LittleEndian>()
                    .map_err(|e| DecodeError::truncated(e, what))?;
                let value = u32::try_from(value).map_err(|_| {
                    DecodeError::MalformedBody(format!("face {face}: negative vertex index {value}"))
                })?;
                narrow_index(value, header.vertex_count, face)
            };
            let triangle = [next_index()?, next_index()?, next_index()?];
            mesh.push_triangle(triangle);
        } else {
            tracing::trace!("Skipping {count}-sided face {face}");
            for _ in 0..count {
                reader
                    .read_i32::<LittleEndian>()
                    .map_err(|e| DecodeError::truncated(e, what))?;
            }
        }
    }

    Ok(mesh)
}

fn read_vec3<R: Read>(reader: &mut R) -> std::io::Result<[f32; 3]> {
    Ok([
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Encoding;

    fn header(
        vertex_count: usize,
        face_count: usize,
        has_normal: bool,
        property_stride: usize,
    ) -> HeaderDescriptor {
        HeaderDescriptor {
            encoding: Encoding::BinaryLittleEndian,
            vertex_count,
            face_count,
            has_normal,
            property_stride,
        }
    }

    fn floats(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    fn face(indices: &[i32]) -> Vec<u8> {
        let mut bytes = vec![u8::try_from(indices.len()).unwrap()];
        bytes.extend(indices.iter().flat_map(|i| i.to_le_bytes()));
        bytes
    }

    fn decode<I: MeshIndex>(body: &[u8], header: &HeaderDescriptor) -> DecodeResult<RawMesh<I>> {
        decode_binary(&mut &body[..], header)
    }

    #[test]
    fn decodes_positions_normals_and_triangles() {
        let mut body = floats(&[0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        body.extend(floats(&[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]));
        body.extend(floats(&[0.0, 1.0, 0.0, 0.0, 0.0, 1.0]));
        body.extend(face(&[0, 1, 2]));

        let mesh: RawMesh<u32> = decode(&body, &header(3, 1, true, 6)).unwrap();
        assert_eq!(
            mesh.positions,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.normals, [0.0f32, 0.0, 1.0].repeat(3));
        assert_eq!(mesh.triangle_indices, vec![0, 1, 2]);
    }

    #[test]
    fn skips_trailing_vertex_properties() {
        // x y z r g b, colors stored as floats to keep the stride uniform.
        let mut body = floats(&[1.0, 2.0, 3.0, 0.1, 0.2, 0.3]);
        body.extend(floats(&[4.0, 5.0, 6.0, 0.4, 0.5, 0.6]));

        let mesh: RawMesh<u32> = decode(&body, &header(2, 0, false, 6)).unwrap();
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(mesh.normals, [0.0f32, 1.0, 0.0].repeat(2));
    }

    #[test]
    fn quad_is_consumed_and_following_triangle_decodes() {
        let mut body = floats(&[0.0; 12]);
        body.extend(face(&[0, 1, 2, 3]));
        body.extend(face(&[3, 2, 1]));

        let mesh: RawMesh<u16> = decode(&body, &header(4, 2, false, 3)).unwrap();
        assert_eq!(mesh.triangle_indices, vec![3, 2, 1]);
    }

    #[test]
    fn short_vertex_stream_is_malformed() {
        // Two vertices at 24 bytes each, one byte short.
        let body = floats(&[0.0; 12]);
        let err = decode::<u32>(&body[..47], &header(2, 0, true, 6)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedBody(_)));
    }

    #[test]
    fn short_face_stream_is_malformed() {
        let mut body = floats(&[0.0; 9]);
        body.extend(face(&[0, 1, 2]));
        body.pop();
        let err = decode::<u32>(&body, &header(3, 1, false, 3)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedBody(_)));
    }

    #[test]
    fn stride_smaller_than_consumed_is_malformed() {
        let body = floats(&[0.0; 6]);
        let err = decode::<u32>(&body, &header(1, 0, true, 3)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedBody(_)));
    }

    #[test]
    fn index_wider_than_element_is_malformed() {
        let vertex_count = 70_000;
        let mut body = floats(&vec![0.0; vertex_count * 3]);
        body.extend(face(&[0, 1, 65_536]));

        let err = decode::<u16>(&body, &header(vertex_count, 1, false, 3)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedBody(_)));

        let mesh = decode::<u32>(&body, &header(vertex_count, 1, false, 3)).unwrap();
        assert_eq!(mesh.triangle_indices, vec![0, 1, 65_536]);
    }

    #[test]
    fn negative_index_is_malformed() {
        let mut body = floats(&[0.0; 9]);
        body.extend(face(&[0, -1, 2]));
        let err = decode::<u32>(&body, &header(3, 1, false, 3)).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedBody(_)));
    }
}
