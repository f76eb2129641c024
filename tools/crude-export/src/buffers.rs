//! Accumulated export state shared by the collector and the encoder

/// One unpacked vertex, before quantization
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawVertex {
    pub position: [f32; 3],
    /// Unit length, [-1, 1] per axis
    pub normal: [f32; 3],
    /// Unit length, [-1, 1] per axis (zero when the mesh has no UVs)
    pub tangent: [f32; 3],
    /// [0, 1] per axis
    pub uv: [f32; 2],
}

/// Merged vertex and index arrays for one export run
///
/// Append-only. Every index is below `vertices.len()` and `indices.len()` is
/// a multiple of 3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportBuffers {
    pub vertices: Vec<RawVertex>,
    pub indices: Vec<u32>,
}

impl ExportBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }
}
