//! Read-only scene graph consumed by the exporter
//!
//! Hosts (editors, file importers) translate their live objects into this
//! shape. The exporter never mutates a scene and never owns its lifecycle.

use crate::error::ExportError;

/// What a scene node represents, as far as export is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Renderable triangulated mesh
    Mesh,
    /// Anything else (empties, cameras, lights); only its children matter
    Empty,
}

/// Triangulated mesh payload
///
/// Attributes follow the editor convention: positions, normals and tangents
/// are per vertex, UVs are per loop (face corner). Each triangle lists three
/// loop indices in winding order, and each loop points at a vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Precomputed per-vertex tangents, used verbatim when present
    pub tangents: Option<Vec<[f32; 3]>>,
    /// Loop -> mesh-local vertex index
    pub loop_vertices: Vec<u32>,
    /// Per-loop texture coordinates (first UV channel)
    pub loop_uvs: Option<Vec<[f32; 2]>>,
    /// Loop indices, three per triangle
    pub triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    /// Build a mesh from per-vertex attributes and a flat triangle index list
    ///
    /// One loop is created per triangle corner, so loop `3t + c` is corner `c`
    /// of triangle `t`. Trailing indices that do not form a whole triangle are
    /// dropped.
    pub fn from_indexed(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        uvs: Option<&[[f32; 2]]>,
        indices: &[u32],
    ) -> Self {
        let corner_count = indices.len() / 3 * 3;
        let loop_vertices = indices[..corner_count].to_vec();
        let loop_uvs = uvs.map(|uvs| {
            loop_vertices
                .iter()
                .map(|&v| uvs.get(v as usize).copied().unwrap_or([0.0, 0.0]))
                .collect()
        });
        let triangles = (0..corner_count as u32 / 3)
            .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
            .collect();

        Self {
            positions,
            normals,
            tangents: None,
            loop_vertices,
            loop_uvs,
            triangles,
        }
    }

    /// Number of vertices this mesh declares
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn has_uvs(&self) -> bool {
        self.loop_uvs.is_some()
    }

    /// Check every cross-reference before the mesh is merged
    ///
    /// `node` is only used to label the error.
    pub fn validate(&self, node: &str) -> Result<(), ExportError> {
        let vertex_count = self.vertex_count();
        let loop_count = self.loop_vertices.len();

        if self.normals.len() < vertex_count {
            return Err(ExportError::AttributeTooShort {
                node: node.to_string(),
                attribute: "normals",
                len: self.normals.len(),
                expected: vertex_count,
            });
        }

        if let Some(tangents) = self.tangents.as_ref().filter(|t| t.len() < vertex_count) {
            return Err(ExportError::AttributeTooShort {
                node: node.to_string(),
                attribute: "tangents",
                len: tangents.len(),
                expected: vertex_count,
            });
        }

        if let Some(uvs) = self.loop_uvs.as_ref().filter(|uvs| uvs.len() != loop_count) {
            return Err(ExportError::UvLoopMismatch {
                node: node.to_string(),
                uvs: uvs.len(),
                loops: loop_count,
            });
        }

        for (loop_index, &vertex) in self.loop_vertices.iter().enumerate() {
            if vertex as usize >= vertex_count {
                return Err(ExportError::VertexOutOfRange {
                    node: node.to_string(),
                    loop_index,
                    vertex,
                    vertex_count,
                });
            }
        }

        for (triangle, loops) in self.triangles.iter().enumerate() {
            if let Some(&loop_index) = loops.iter().find(|&&l| l as usize >= loop_count) {
                return Err(ExportError::LoopOutOfRange {
                    node: node.to_string(),
                    triangle,
                    loop_index,
                    loop_count,
                });
            }
        }

        Ok(())
    }
}

/// Read-only view of one scene object
pub trait SceneNode: Sized {
    fn name(&self) -> &str;

    fn kind(&self) -> NodeKind;

    /// Mesh payload; expected to be present whenever `kind()` is `Mesh`
    fn mesh(&self) -> Option<&TriMesh>;

    /// Whether the host considers this object selected
    fn is_selected(&self) -> bool {
        true
    }

    /// Child objects in host order
    fn children(&self) -> &[Self];
}

/// Owned scene node, produced by host adapters
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub mesh: Option<TriMesh>,
    pub selected: bool,
    pub children: Vec<Node>,
}

impl Node {
    /// A mesh object
    pub fn new_mesh(name: impl Into<String>, mesh: TriMesh) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Mesh,
            mesh: Some(mesh),
            selected: true,
            children: Vec::new(),
        }
    }

    /// A non-mesh object
    pub fn new_empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Empty,
            mesh: None,
            selected: true,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl SceneNode for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn mesh(&self) -> Option<&TriMesh> {
        self.mesh.as_ref()
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
