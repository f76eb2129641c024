//! Shared wire-format definitions for crude mesh buffers
//!
//! This crate provides the `.crudeb` layout shared between:
//! - `crude-export` (asset pipeline)
//! - the engine-side loader, which reads the same fixed records
//!
//! # Modules
//!
//! - [`packing`] - Vertex attribute quantization (f32 → unorm8/unorm16) and record packing
//! - [`formats`] - File extension, optional versioned header, index block encoding

pub mod formats;
pub mod packing;

// Re-export commonly used packing items
pub use packing::{
    NORMAL_OFFSET, POSITION_OFFSET, PackedVertex, TANGENT_OFFSET, UV_OFFSET, VERTEX_STRIDE,
    pack_direction_unorm8, pack_uv_unorm16, pack_vertex, snorm_to_unorm8, unit_to_unorm16,
};

// Re-export commonly used format items
pub use formats::{
    CRUDE_MESH_EXT, CRUDE_MESH_MAGIC, CRUDE_MESH_VERSION, CrudeMeshHeader, FLAG_INDICES_BIG_ENDIAN,
    INDEX_SIZE, IndexEndian, encode_indices,
};
