//! Export error taxonomy

use thiserror::Error;

/// Errors raised while collecting or writing a scene
///
/// Everything except [`ExportError::Io`] is an input-contract violation found
/// during collection, before any byte reaches the output.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("node '{node}' is flagged as a mesh but has no mesh data")]
    MissingMesh { node: String },

    #[error("node '{node}': {attribute} has {len} entries, expected at least {expected}")]
    AttributeTooShort {
        node: String,
        attribute: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("node '{node}': triangle {triangle} references loop {loop_index}, mesh has {loop_count} loops")]
    LoopOutOfRange {
        node: String,
        triangle: usize,
        loop_index: u32,
        loop_count: usize,
    },

    #[error("node '{node}': loop {loop_index} references vertex {vertex}, mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        node: String,
        loop_index: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("node '{node}': {uvs} loop UVs for {loops} loops")]
    UvLoopMismatch {
        node: String,
        uvs: usize,
        loops: usize,
    },

    #[error("node '{node}' pushes the vertex count to {total}, beyond the u32 index range")]
    TooManyVertices { node: String, total: u64 },

    #[error("{count} {what} do not fit the 32-bit header counts")]
    CountOverflow { what: &'static str, count: usize },

    #[error("failed to write mesh buffers: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// True for malformed-input errors (as opposed to sink failures)
    pub fn is_input_contract_violation(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
