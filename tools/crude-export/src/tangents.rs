//! Per-vertex tangent generation
//!
//! Tangents point along increasing U. Each triangle contributes its UV
//! gradient to its three vertices; the sum is then orthogonalized against the
//! vertex normal (Gram-Schmidt) and normalized.

use glam::{Vec2, Vec3};

use crate::scene::TriMesh;

const DEGENERATE_EPSILON: f32 = 1e-12;

/// Where a mesh's tangents came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TangentSource {
    /// Supplied by the host
    Precomputed,
    /// Derived from UVs and geometry
    Generated,
    /// Mesh has no UV channel; all tangents are zero
    Missing,
}

/// Compute one tangent per vertex
///
/// Expects a mesh that passed [`TriMesh::validate`]. Meshes without UVs get
/// zero tangents rather than an error.
pub fn vertex_tangents(mesh: &TriMesh) -> (Vec<[f32; 3]>, TangentSource) {
    let vertex_count = mesh.vertex_count();

    if let Some(tangents) = &mesh.tangents {
        return (tangents[..vertex_count].to_vec(), TangentSource::Precomputed);
    }

    let Some(uvs) = &mesh.loop_uvs else {
        return (vec![[0.0; 3]; vertex_count], TangentSource::Missing);
    };

    let mut accumulated = vec![Vec3::ZERO; vertex_count];

    for loops in &mesh.triangles {
        let corner = |c: usize| {
            let l = loops[c] as usize;
            let v = mesh.loop_vertices[l] as usize;
            (v, Vec3::from(mesh.positions[v]), Vec2::from(uvs[l]))
        };
        let (v0, p0, uv0) = corner(0);
        let (v1, p1, uv1) = corner(1);
        let (v2, p2, uv2) = corner(2);

        let edge1 = p1 - p0;
        let edge2 = p2 - p0;
        let duv1 = uv1 - uv0;
        let duv2 = uv2 - uv0;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < DEGENERATE_EPSILON {
            continue;
        }

        let tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        for v in [v0, v1, v2] {
            accumulated[v] += tangent;
        }
    }

    let tangents = accumulated
        .iter()
        .zip(&mesh.normals)
        .map(|(&sum, &normal)| orthonormal_tangent(sum, Vec3::from(normal)).to_array())
        .collect();

    (tangents, TangentSource::Generated)
}

/// Remove the normal component from `tangent` and normalize it
///
/// Falls back to an arbitrary direction perpendicular to the normal when the
/// accumulated tangent vanishes.
fn orthonormal_tangent(tangent: Vec3, normal: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    let projected = tangent - normal * normal.dot(tangent);

    if projected.length_squared() > DEGENERATE_EPSILON {
        projected.normalize()
    } else if normal != Vec3::ZERO {
        normal.any_orthonormal_vector()
    } else {
        Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(uvs: Option<&[[f32; 2]]>) -> TriMesh {
        TriMesh::from_indexed(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 4],
            uvs,
            &[0, 1, 2, 0, 2, 3],
        )
    }

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        let d = Vec3::from(a) - Vec3::from(b);
        assert!(d.length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_tangent_follows_increasing_u() {
        let mesh = plane(Some(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]));
        let (tangents, source) = vertex_tangents(&mesh);

        assert_eq!(source, TangentSource::Generated);
        assert_eq!(tangents.len(), 4);
        for t in tangents {
            assert_close(t, [1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_mirrored_u_flips_tangent() {
        let mesh = plane(Some(&[[1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]));
        let (tangents, _) = vertex_tangents(&mesh);
        for t in tangents {
            assert_close(t, [-1.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_tangent_is_orthogonal_to_tilted_normal() {
        let mut mesh = plane(Some(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]));
        let tilted = Vec3::new(0.5, 0.0, 1.0).normalize();
        mesh.normals = vec![tilted.to_array(); 4];

        let (tangents, _) = vertex_tangents(&mesh);
        for t in tangents {
            let t = Vec3::from(t);
            assert!(t.dot(tilted).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_no_uvs_gives_zero_tangents() {
        let (tangents, source) = vertex_tangents(&plane(None));
        assert_eq!(source, TangentSource::Missing);
        assert_eq!(tangents, vec![[0.0; 3]; 4]);
    }

    #[test]
    fn test_degenerate_uvs_fall_back_to_perpendicular() {
        let mesh = plane(Some(&[[0.5, 0.5]; 4]));
        let (tangents, _) = vertex_tangents(&mesh);
        for t in tangents {
            let t = Vec3::from(t);
            assert!(t.dot(Vec3::Z).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_precomputed_tangents_used_verbatim() {
        let mut mesh = plane(None);
        mesh.tangents = Some(vec![[0.0, 1.0, 0.0]; 4]);
        let (tangents, source) = vertex_tangents(&mesh);
        assert_eq!(source, TangentSource::Precomputed);
        assert_eq!(tangents, vec![[0.0, 1.0, 0.0]; 4]);
    }

    #[test]
    fn test_unreferenced_vertex_still_gets_unit_tangent() {
        let mut mesh = plane(Some(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]));
        mesh.positions.push([5.0, 5.0, 0.0]);
        mesh.normals.push([0.0, 1.0, 0.0]);

        let (tangents, _) = vertex_tangents(&mesh);
        let lonely = Vec3::from(tangents[4]);
        assert!(lonely.dot(Vec3::Y).abs() < 1e-5);
        assert!((lonely.length() - 1.0).abs() < 1e-5);
    }
}
