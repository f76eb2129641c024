//! One-shot export: collect a scene, then encode it to a sink

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crude_common::IndexEndian;
use tracing::info;

use crate::buffers::ExportBuffers;
use crate::collector::{CollectOptions, CollectStats, SceneCollector};
use crate::encoder::{BufferEncoder, EncodeStats, FileLayout};
use crate::error::ExportError;
use crate::scene::SceneNode;

/// Everything that shapes one export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub collect: CollectOptions,
    pub layout: FileLayout,
    pub index_endian: IndexEndian,
}

impl ExportOptions {
    pub fn encoder(&self) -> BufferEncoder {
        BufferEncoder::new(self.layout, self.index_endian)
    }
}

/// Result of a finished export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub collect: CollectStats,
    pub encode: EncodeStats,
}

/// Collect `roots` into fresh buffers
pub fn collect_scene<N: SceneNode>(
    roots: &[N],
    options: CollectOptions,
) -> Result<(ExportBuffers, CollectStats), ExportError> {
    let mut buffers = ExportBuffers::new();
    let mut collector = SceneCollector::new(options);
    collector.collect_roots(roots, &mut buffers)?;
    Ok((buffers, collector.stats()))
}

/// Export a scene to an arbitrary writer
///
/// The whole scene is collected before the first byte is written, so contract
/// violations never reach `w`.
pub fn export_to_writer<N: SceneNode, W: Write>(
    roots: &[N],
    w: &mut W,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let (buffers, collect) = collect_scene(roots, options.collect)?;
    let encode = options.encoder().encode(&buffers, w)?;
    w.flush()?;
    Ok(ExportSummary { collect, encode })
}

/// Export a scene to an in-memory `.crudeb` image
pub fn export_to_memory<N: SceneNode>(
    roots: &[N],
    options: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let (buffers, _) = collect_scene(roots, options.collect)?;
    options.encoder().encode_to_vec(&buffers)
}

/// Export a scene to a `.crudeb` file
///
/// The file is only created once collection succeeded. On a write failure the
/// error is returned as is; a partially written file is left on disk for the
/// caller to remove.
pub fn export_scene<N: SceneNode>(
    roots: &[N],
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let (buffers, collect) = collect_scene(roots, options.collect)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encode = options.encoder().encode(&buffers, &mut writer)?;
    writer.flush()?;

    info!(
        "Exported {:?}: {} meshes, {} vertices, {} triangles, {} bytes ({} layout, {} indices)",
        path,
        collect.meshes_exported,
        encode.vertices,
        encode.indices / 3,
        encode.bytes_written,
        options.layout,
        options.encoder().effective_index_endian()
    );

    Ok(ExportSummary { collect, encode })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, NodeKind, TriMesh};

    fn triangle() -> TriMesh {
        TriMesh::from_indexed(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 3],
            Some(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
            &[0, 1, 2],
        )
    }

    #[test]
    fn test_export_to_memory_size() {
        let roots = vec![Node::new_mesh("a", triangle()), Node::new_mesh("b", triangle())];
        let bytes = export_to_memory(&roots, &ExportOptions::default()).unwrap();
        assert_eq!(bytes.len(), 32 * 6 + 4 * 6);
    }

    #[test]
    fn test_contract_violation_writes_nothing() {
        let mut broken = Node::new_empty("broken");
        broken.kind = NodeKind::Mesh;
        let roots = vec![Node::new_mesh("ok", triangle()), broken];

        let mut sink = Vec::new();
        let err = export_to_writer(&roots, &mut sink, &ExportOptions::default()).unwrap_err();
        assert!(err.is_input_contract_violation());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_writer_summary() {
        let roots = vec![Node::new_empty("root").with_child(Node::new_mesh("tri", triangle()))];
        let mut sink = Vec::new();
        let summary = export_to_writer(&roots, &mut sink, &ExportOptions::default()).unwrap();

        assert_eq!(summary.collect.nodes_visited, 2);
        assert_eq!(summary.collect.meshes_exported, 1);
        assert_eq!(summary.encode.bytes_written, sink.len());
        assert_eq!(summary.encode.clamped_components, 0);
    }
}
