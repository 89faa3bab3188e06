//! PLY writers for building test inputs.

#![allow(dead_code)]

/// A logical mesh that can be written in either encoding.
#[derive(Debug, Clone)]
pub struct TestMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    /// Polygons of any size; only triangles survive decoding.
    pub faces: Vec<Vec<u32>>,
}

impl TestMesh {
    fn header(&self, format: &str) -> String {
        let mut header = format!(
            "ply\nformat {format} 1.0\nelement vertex {}\n\
             property float x\nproperty float y\nproperty float z\n",
            self.positions.len()
        );
        if self.normals.is_some() {
            header.push_str("property float nx\nproperty float ny\nproperty float nz\n");
        }
        header.push_str(&format!(
            "element face {}\nproperty list uchar int vertex_indices\nend_header\n",
            self.faces.len()
        ));
        header
    }

    pub fn to_ascii(&self) -> Vec<u8> {
        let mut text = self.header("ascii");
        for (i, p) in self.positions.iter().enumerate() {
            text.push_str(&format!("{} {} {}", p[0], p[1], p[2]));
            if let Some(normals) = &self.normals {
                let n = normals[i];
                text.push_str(&format!(" {} {} {}", n[0], n[1], n[2]));
            }
            text.push('\n');
        }
        for face in &self.faces {
            text.push_str(&face.len().to_string());
            for index in face {
                text.push_str(&format!(" {index}"));
            }
            text.push('\n');
        }
        text.into_bytes()
    }

    pub fn to_binary(&self) -> Vec<u8> {
        let mut bytes = self.header("binary_little_endian").into_bytes();
        for (i, p) in self.positions.iter().enumerate() {
            bytes.extend(p.iter().flat_map(|v| v.to_le_bytes()));
            if let Some(normals) = &self.normals {
                bytes.extend(normals[i].iter().flat_map(|v| v.to_le_bytes()));
            }
        }
        for face in &self.faces {
            bytes.push(u8::try_from(face.len()).unwrap());
            bytes.extend(face.iter().flat_map(|i| i.to_le_bytes()));
        }
        bytes
    }

    /// Triangle indices in file order, as the decoder should report them.
    pub fn expected_indices(&self) -> Vec<u32> {
        self.faces
            .iter()
            .filter(|face| face.len() == 3)
            .flatten()
            .copied()
            .collect()
    }
}
