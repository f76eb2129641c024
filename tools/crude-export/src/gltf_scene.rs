//! glTF/GLB scene adapter
//!
//! Translates a glTF document's node hierarchy into [`Node`] trees. Node
//! transforms are ignored; geometry is exported in mesh space.

use std::path::Path;

use anyhow::{Context, Result, bail};
use gltf::mesh::Mode;
use hashbrown::HashSet;

use crate::scene::{Node, TriMesh};

/// Normal used when a primitive carries no NORMAL attribute
const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Load the default scene (or the first scene) of a glTF/GLB file
///
/// Returns one tree per root node, in document order. When `selection` is
/// given, only nodes whose name appears in it report as selected.
pub fn load_gltf_scene(path: &Path, selection: Option<&HashSet<String>>) -> Result<Vec<Node>> {
    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF: {:?}", path))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("No scenes found in glTF")?;

    let roots = scene
        .nodes()
        .map(|node| convert_node(&node, &buffers, selection))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(
        "Loaded glTF scene {:?} with {} root nodes from {:?}",
        scene.name().unwrap_or("<unnamed>"),
        roots.len(),
        path
    );

    Ok(roots)
}

fn convert_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    selection: Option<&HashSet<String>>,
) -> Result<Node> {
    let name = node
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("node_{}", node.index()));

    let mut converted = match node.mesh() {
        Some(mesh) => {
            let tri_mesh = convert_mesh(&mesh, buffers)
                .with_context(|| format!("Failed to read mesh of node '{}'", name))?;
            Node::new_mesh(name, tri_mesh)
        }
        None => Node::new_empty(name),
    };

    converted.selected = selection.is_none_or(|names| names.contains(&converted.name));

    for child in node.children() {
        converted
            .children
            .push(convert_node(&child, buffers, selection)?);
    }

    Ok(converted)
}

/// Merge all triangle-list primitives of a glTF mesh into one [`TriMesh`]
fn convert_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Result<TriMesh> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut tangents: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut any_uvs = false;
    let mut all_tangents = true;

    for primitive in mesh.primitives() {
        if primitive.mode() != Mode::Triangles {
            tracing::warn!(
                "Skipping primitive {} of mesh {:?}: {:?} topology is not a triangle list",
                primitive.index(),
                mesh.name().unwrap_or("<unnamed>"),
                primitive.mode()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let base = u32::try_from(positions.len()).context("Mesh exceeds the u32 vertex range")?;

        // Positions (required)
        let prim_positions: Vec<[f32; 3]> = reader
            .read_positions()
            .context("No positions in primitive")?
            .collect();
        let count = prim_positions.len();
        let end = u32::try_from(positions.len() + count)
            .context("Mesh exceeds the u32 vertex range")?;

        // Normals (optional)
        match reader.read_normals() {
            Some(iter) => normals.extend(iter.take(count)),
            None => {
                tracing::warn!(
                    "Primitive {} has no normals, using {:?}",
                    primitive.index(),
                    DEFAULT_NORMAL
                );
            }
        }
        normals.resize(base as usize + count, DEFAULT_NORMAL);

        // UVs (optional)
        if let Some(iter) = reader.read_tex_coords(0) {
            any_uvs = true;
            uvs.extend(iter.into_f32().take(count));
        }
        uvs.resize(base as usize + count, [0.0, 0.0]);

        // Tangents (optional) - vec4, w (handedness) is dropped
        match reader.read_tangents() {
            Some(iter) => tangents.extend(iter.take(count).map(|t| [t[0], t[1], t[2]])),
            None => all_tangents = false,
        }
        tangents.resize(base as usize + count, [0.0; 3]);

        // Indices (optional) - non-indexed primitives use sequential vertices
        match reader.read_indices() {
            Some(iter) => {
                for i in iter.into_u32() {
                    if i as usize >= count {
                        bail!(
                            "Index {} out of range in primitive {} ({} vertices)",
                            i,
                            primitive.index(),
                            count
                        );
                    }
                    indices.push(base + i);
                }
            }
            None => indices.extend(base..end),
        }

        positions.extend(prim_positions);
    }

    let uvs = any_uvs.then_some(uvs);
    let mut tri_mesh = TriMesh::from_indexed(positions, normals, uvs.as_deref(), &indices);
    if all_tangents && !tri_mesh.positions.is_empty() {
        tri_mesh.tangents = Some(tangents);
    }

    Ok(tri_mesh)
}
