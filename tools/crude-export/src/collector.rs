//! Scene traversal: flattens a scene graph into one vertex/index buffer pair
//!
//! Objects are visited depth-first in host order. Each mesh appends its
//! vertices in mesh-local order and its triangles with indices offset by the
//! number of vertices already collected (the object's `vertex_base`).

use tracing::{debug, warn};

use crate::buffers::{ExportBuffers, RawVertex};
use crate::error::ExportError;
use crate::scene::{NodeKind, SceneNode, TriMesh};
use crate::tangents::{TangentSource, vertex_tangents};

/// Collection settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Only export meshes whose node reports `is_selected()`
    pub selected_only: bool,
}

/// Counters from one collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub nodes_visited: usize,
    pub meshes_exported: usize,
    /// Mesh nodes left out by the selection filter
    pub meshes_skipped: usize,
}

/// Walks scene graphs and appends their geometry to an [`ExportBuffers`]
#[derive(Debug, Clone, Default)]
pub struct SceneCollector {
    options: CollectOptions,
    stats: CollectStats,
}

impl SceneCollector {
    pub fn new(options: CollectOptions) -> Self {
        Self {
            options,
            stats: CollectStats::default(),
        }
    }

    pub fn stats(&self) -> CollectStats {
        self.stats
    }

    /// Collect every top-level object and its descendants
    ///
    /// Stops at the first contract violation. Objects collected before the
    /// failing one stay in `buffers`; the failing object adds nothing.
    pub fn collect_roots<N: SceneNode>(
        &mut self,
        roots: &[N],
        buffers: &mut ExportBuffers,
    ) -> Result<(), ExportError> {
        for root in roots {
            self.collect_node(root, buffers)?;
        }
        Ok(())
    }

    /// Collect one node, then recurse into its children regardless of kind
    pub fn collect_node<N: SceneNode>(
        &mut self,
        node: &N,
        buffers: &mut ExportBuffers,
    ) -> Result<(), ExportError> {
        self.stats.nodes_visited += 1;

        if node.kind() == NodeKind::Mesh {
            let mesh = node.mesh().ok_or_else(|| ExportError::MissingMesh {
                node: node.name().to_string(),
            })?;

            if self.options.selected_only && !node.is_selected() {
                debug!("Skipping unselected mesh '{}'", node.name());
                self.stats.meshes_skipped += 1;
            } else {
                append_mesh(node.name(), mesh, buffers)?;
                self.stats.meshes_exported += 1;
            }
        }

        for child in node.children() {
            self.collect_node(child, buffers)?;
        }

        Ok(())
    }
}

/// Append one mesh to the buffers
///
/// UVs are collapsed from loops to vertices: every loop writes its UV into its
/// vertex slot in loop order, so the last loop touching a vertex wins.
/// Vertices on a UV seam therefore keep only one of their UVs.
pub fn append_mesh(
    name: &str,
    mesh: &TriMesh,
    buffers: &mut ExportBuffers,
) -> Result<(), ExportError> {
    mesh.validate(name)?;

    let vertex_base = buffers.vertices.len();
    let index_base = buffers.indices.len();
    let vertex_count = mesh.vertex_count();
    let triangle_count = mesh.triangle_count();

    let total = vertex_base as u64 + vertex_count as u64;
    if total > u32::MAX as u64 + 1 {
        return Err(ExportError::TooManyVertices {
            node: name.to_string(),
            total,
        });
    }

    if vertex_count == 0 || triangle_count == 0 {
        debug!(
            "Mesh '{}' has {} vertices and {} triangles, nothing to export",
            name, vertex_count, triangle_count
        );
        return Ok(());
    }

    let (tangents, tangent_source) = vertex_tangents(mesh);
    if tangent_source == TangentSource::Missing {
        warn!("Mesh '{}' has no UV channel, exporting zero tangents", name);
    }

    buffers
        .vertices
        .resize(vertex_base + vertex_count, RawVertex::default());
    buffers.indices.resize(index_base + 3 * triangle_count, 0);

    let base = vertex_base as u32;
    for (t, loops) in mesh.triangles.iter().enumerate() {
        let slot = index_base + 3 * t;
        for (corner, &l) in loops.iter().enumerate() {
            buffers.indices[slot + corner] = base + mesh.loop_vertices[l as usize];
        }
    }

    let slots = &mut buffers.vertices[vertex_base..];
    for (v, slot) in slots.iter_mut().enumerate() {
        slot.position = mesh.positions[v];
        slot.normal = mesh.normals[v];
        slot.tangent = tangents[v];
    }

    if let Some(uvs) = &mesh.loop_uvs {
        for (&vertex, &uv) in mesh.loop_vertices.iter().zip(uvs) {
            slots[vertex as usize].uv = uv;
        }
    }

    debug!(
        "Collected '{}': {} vertices at base {}, {} triangles at index {} ({:?} tangents)",
        name, vertex_count, vertex_base, triangle_count, index_base, tangent_source
    );

    Ok(())
}
