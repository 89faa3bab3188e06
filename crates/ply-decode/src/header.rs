//! Header scanning.

use std::io::BufRead;

use crate::error::{DecodeError, DecodeResult};

/// Line that terminates the header block.
pub const END_HEADER: &str = "end_header";

/// Body encoding declared by the `format` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Whitespace-separated text records, one per line.
    #[default]
    Ascii,
    /// Fixed-width little-endian binary records.
    BinaryLittleEndian,
}

/// Everything the body decoders need to know about a PLY file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDescriptor {
    pub encoding: Encoding,
    /// Number of vertex records that follow the header.
    pub vertex_count: usize,
    /// Number of face records that follow the vertex records.
    pub face_count: usize,
    /// Whether each vertex record carries `nx ny nz`.
    pub has_normal: bool,
    /// Scalar properties per vertex record, including ones the decoder skips.
    pub property_stride: usize,
}

/// Element whose `property` lines are currently being declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vertex,
    Face,
    Other,
}

/// Scan the header, leaving `reader` at the first byte of body data.
///
/// Lines are read byte-wise, so the binary body that follows the terminator
/// is never touched.
pub fn scan_header<R: BufRead>(reader: &mut R) -> DecodeResult<HeaderDescriptor> {
    let mut encoding = Encoding::Ascii;
    let mut vertex_count = None;
    let mut face_count = 0;
    let mut has_normal = false;
    let mut property_stride = 0;
    let mut section = Section::Preamble;
    let mut face_list: Option<(String, String)> = None;

    let mut raw = Vec::new();
    let mut line_number = 0;
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(DecodeError::MalformedHeader(format!(
                "stream ended before '{END_HEADER}'"
            )));
        }
        line_number += 1;

        let line = std::str::from_utf8(&raw)
            .map_err(|_| {
                DecodeError::MalformedHeader(format!("line {line_number} is not valid UTF-8"))
            })?
            .trim();

        if line == END_HEADER {
            break;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("format") => encoding = parse_format(tokens.next(), line_number)?,
            Some("element") => {
                let name = tokens.next();
                let count = tokens.next();
                section = match name {
                    Some("vertex") => {
                        vertex_count = Some(parse_count(count, line_number)?);
                        Section::Vertex
                    }
                    Some("face") => {
                        face_count = parse_count(count, line_number)?;
                        Section::Face
                    }
                    _ => Section::Other,
                };
            }
            Some("property") => {
                let tokens: Vec<&str> = tokens.collect();
                match (section, tokens.as_slice()) {
                    (Section::Vertex, ["list", ..]) => {}
                    (Section::Vertex, [.., name]) => {
                        property_stride += 1;
                        if *name == "nx" || *name == "normal_x" {
                            has_normal = true;
                        }
                    }
                    (Section::Face, ["list", count_type, index_type, ..]) => {
                        face_list = Some(((*count_type).to_string(), (*index_type).to_string()));
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    let vertex_count = vertex_count.ok_or_else(|| {
        DecodeError::MalformedHeader("missing 'element vertex' declaration".into())
    })?;

    if encoding == Encoding::BinaryLittleEndian
        && let Some((count_type, index_type)) = &face_list
    {
        check_binary_face_list(count_type, index_type)?;
    }

    Ok(HeaderDescriptor {
        encoding,
        vertex_count,
        face_count,
        has_normal,
        property_stride,
    })
}

fn parse_format(keyword: Option<&str>, line_number: usize) -> DecodeResult<Encoding> {
    match keyword {
        Some("ascii") => Ok(Encoding::Ascii),
        Some("binary_little_endian") => Ok(Encoding::BinaryLittleEndian),
        Some(other) => Err(DecodeError::UnsupportedEncoding(other.to_string())),
        None => Err(DecodeError::MalformedHeader(format!(
            "line {line_number}: 'format' without an encoding"
        ))),
    }
}

fn parse_count(token: Option<&str>, line_number: usize) -> DecodeResult<usize> {
    let token = token.ok_or_else(|| {
        DecodeError::MalformedHeader(format!("line {line_number}: element count missing"))
    })?;
    token.parse().map_err(|_| {
        DecodeError::MalformedHeader(format!(
            "line {line_number}: element count '{token}' is not a non-negative integer"
        ))
    })
}

/// Binary face records are read as a `u8` count followed by 32-bit indices.
fn check_binary_face_list(count_type: &str, index_type: &str) -> DecodeResult<()> {
    let count_ok = matches!(count_type, "uchar" | "uint8" | "char" | "int8");
    let index_ok = matches!(index_type, "int" | "uint" | "int32" | "uint32");
    if count_ok && index_ok {
        Ok(())
    } else {
        Err(DecodeError::MalformedHeader(format!(
            "face list 'list {count_type} {index_type}' is not an 8-bit count with 32-bit indices"
        )))
    }
}
