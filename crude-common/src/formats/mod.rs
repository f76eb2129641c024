//! Crude binary mesh buffer format (.crudeb)
//!
//! The legacy file is POD with no magic bytes: N vertex records followed by M
//! indices. Consumers learn N and M out of band. The versioned variant adds a
//! [`CrudeMeshHeader`] in front of the same payload.

pub mod index;
pub mod mesh;

pub use index::*;
pub use mesh::*;

/// File extension for crude mesh buffers (without dot)
pub const CRUDE_MESH_EXT: &str = "crudeb";
