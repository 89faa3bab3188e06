//! ASCII body decoding.
//!
//! Every record is one line of whitespace-separated tokens. Lines are atomic:
//! a skipped face discards its whole line.

use std::io::BufRead;
use std::str::FromStr;

use crate::builder::RawMesh;
use crate::error::{DecodeError, DecodeResult};
use crate::header::HeaderDescriptor;
use crate::index::{MeshIndex, narrow_index};

/// Decode `header.vertex_count` vertex lines followed by `header.face_count`
/// face lines.
pub fn decode_ascii<I: MeshIndex, R: BufRead>(
    reader: &mut R,
    header: &HeaderDescriptor,
) -> DecodeResult<RawMesh<I>> {
    let mut mesh = RawMesh::with_capacity(header.vertex_count, header.face_count);
    let mut lines = RecordLines::new(reader);

    for vertex in 0..header.vertex_count {
        let line = lines.next_record(|| format!("vertex {vertex}"))?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(DecodeError::MalformedBody(format!(
                "vertex {vertex}: expected at least 3 values, found {}",
                tokens.len()
            )));
        }

        let what = || format!("vertex {vertex}");
        let position = parse_triple(&tokens[0..3], what)?;
        let normal = if header.has_normal && tokens.len() >= 6 {
            Some(parse_triple(&tokens[3..6], what)?)
        } else {
            None
        };
        mesh.push_vertex(position, normal);
    }

    for face in 0..header.face_count {
        let line = lines.next_record(|| format!("face {face}"))?;
        let mut tokens = line.split_whitespace();
        let count_token = tokens.next();
        let count: usize = parse_token(count_token, || format!("face {face}"))?;
        // Only the literal token `3` marks a triangle.
        if count_token != Some("3") {
            tracing::trace!("Skipping {count}-sided face {face}");
            continue;
        }

        let mut next_index = || -> DecodeResult<I> {
            let value: u32 = parse_token(tokens.next(), || format!("face {face}"))?;
            narrow_index(value, header.vertex_count, face)
        };
        let triangle = [next_index()?, next_index()?, next_index()?];
        mesh.push_triangle(triangle);
    }

    Ok(mesh)
}

/// Reads successive body lines into a reused buffer.
struct RecordLines<'r, R> {
    reader: &'r mut R,
    buffer: String,
}

impl<'r, R: BufRead> RecordLines<'r, R> {
    fn new(reader: &'r mut R) -> Self {
        Self {
            reader,
            buffer: String::new(),
        }
    }

    fn next_record(&mut self, what: impl Fn() -> String) -> DecodeResult<&str> {
        self.buffer.clear();
        let read = self.reader.read_line(&mut self.buffer).map_err(|err| {
            if err.kind() == std::io::ErrorKind::InvalidData {
                DecodeError::MalformedBody(format!("{}: line is not valid UTF-8", what()))
            } else {
                DecodeError::Io(err)
            }
        })?;
        if read == 0 {
            return Err(DecodeError::MalformedBody(format!(
                "stream ended before {}",
                what()
            )));
        }
        Ok(&self.buffer)
    }
}

fn parse_token<T: FromStr>(token: Option<&str>, what: impl Fn() -> String) -> DecodeResult<T> {
    let token =
        token.ok_or_else(|| DecodeError::MalformedBody(format!("{}: missing value", what())))?;
    token
        .parse()
        .map_err(|_| DecodeError::MalformedBody(format!("{}: cannot parse '{token}'", what())))
}

fn parse_triple(tokens: &[&str], what: impl Fn() -> String) -> DecodeResult<[f32; 3]> {
    Ok([
        parse_token(Some(tokens[0]), &what)?,
        parse_token(Some(tokens[1]), &what)?,
        parse_token(Some(tokens[2]), &what)?,
    ])
}
