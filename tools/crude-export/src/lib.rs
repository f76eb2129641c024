//! crude-export library
//!
//! Flattens scene graphs into the `.crudeb` vertex/index buffer pair. Hosts
//! build a [`SceneNode`] tree (directly, or through [`load_gltf_scene`]) and
//! hand it to [`export_scene`].

pub mod buffers;
pub mod collector;
pub mod encoder;
pub mod error;
pub mod export;
pub mod gltf_scene;
pub mod manifest;
pub mod scene;
pub mod tangents;

// Re-export wire-format items from crude-common
pub use crude_common::{
    CRUDE_MESH_EXT, CrudeMeshHeader, INDEX_SIZE, IndexEndian, VERTEX_STRIDE, pack_vertex,
};

pub use buffers::{ExportBuffers, RawVertex};
pub use collector::{CollectOptions, CollectStats, SceneCollector, append_mesh};
pub use encoder::{BufferEncoder, EncodeStats, FileLayout, encode_vertex};
pub use error::ExportError;
pub use export::{
    ExportOptions, ExportSummary, collect_scene, export_scene, export_to_memory, export_to_writer,
};
pub use gltf_scene::load_gltf_scene;
pub use scene::{Node, NodeKind, SceneNode, TriMesh};
pub use tangents::{TangentSource, vertex_tangents};
