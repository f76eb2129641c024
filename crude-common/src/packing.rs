//! Vertex data packing utilities
//!
//! Converts f32 vertex attributes to the fixed `.crudeb` vertex record:
//! - position: 3 × big-endian f32
//! - normal / tangent: signed unit range [-1, 1] → unorm8 (`(n * 0.5 + 0.5) * 255`)
//! - texcoords: unit range [0, 1] → big-endian unorm16
//!
//! Every quantizer clamps instead of wrapping and reports whether it had to.

// ============================================================================
// Vertex Record Layout
// ============================================================================

/// Size of one packed vertex record in bytes
pub const VERTEX_STRIDE: usize = 32;

/// Byte offset of the position (3 × f32 BE)
pub const POSITION_OFFSET: usize = 0;
/// Byte offset of the normal (3 × unorm8 + 1 pad byte)
///
/// Bytes `12..16` pad the position out to 16 bytes, matching the renderer's
/// `vec3 position; float padding1;` vertex header.
pub const NORMAL_OFFSET: usize = 16;
/// Byte offset of the tangent (3 × unorm8 + 1 pad byte)
pub const TANGENT_OFFSET: usize = 20;
/// Byte offset of the texcoords (2 × unorm16 BE)
pub const UV_OFFSET: usize = 24;
/// End of the attribute data; bytes `28..32` are zero padding
const ATTRIBUTE_END: usize = 28;

// ============================================================================
// Scalar Quantization
// ============================================================================

/// Quantize a signed unit component in [-1.0, 1.0] to unorm8
///
/// Maps via `round((value * 0.5 + 0.5) * 255)`. Returns the byte and whether
/// the input fell outside the representable range (NaN counts and encodes as 0).
#[inline]
pub fn snorm_to_unorm8(value: f32) -> (u8, bool) {
    let scaled = ((value * 0.5 + 0.5) * 255.0).round();
    let out_of_range = !(0.0..=255.0).contains(&scaled);
    // `as` saturates and maps NaN to 0
    (scaled.clamp(0.0, 255.0) as u8, out_of_range)
}

/// Quantize a unit component in [0.0, 1.0] to unorm16
///
/// Maps via `round(value * 65535)`. Returns the value and whether it was clamped.
#[inline]
pub fn unit_to_unorm16(value: f32) -> (u16, bool) {
    let scaled = (value * 65535.0).round();
    let out_of_range = !(0.0..=65535.0).contains(&scaled);
    (scaled.clamp(0.0, 65535.0) as u16, out_of_range)
}

// ============================================================================
// Attribute Packing
// ============================================================================

/// Pack a unit direction (normal or tangent) to unorm8x4 with a zero pad byte
///
/// Returns the packed bytes and the number of clamped components.
#[inline]
pub fn pack_direction_unorm8(dir: [f32; 3]) -> ([u8; 4], u32) {
    let mut packed = [0u8; 4];
    let mut clamped = 0;
    for (slot, &component) in packed.iter_mut().zip(dir.iter()) {
        let (value, out_of_range) = snorm_to_unorm8(component);
        *slot = value;
        clamped += out_of_range as u32;
    }
    (packed, clamped)
}

/// Pack a texture coordinate to unorm16x2
///
/// Returns the packed values and the number of clamped components.
#[inline]
pub fn pack_uv_unorm16(uv: [f32; 2]) -> ([u16; 2], u32) {
    let (u, u_clamped) = unit_to_unorm16(uv[0]);
    let (v, v_clamped) = unit_to_unorm16(uv[1]);
    ([u, v], u_clamped as u32 + v_clamped as u32)
}

// ============================================================================
// Full Vertex Packing
// ============================================================================

/// One encoded vertex record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedVertex {
    /// The 32 record bytes, multi-byte fields big-endian
    pub bytes: [u8; VERTEX_STRIDE],
    /// Number of components that fell outside their quantization range
    pub clamped: u32,
}

/// Pack one vertex into its 32-byte record
///
/// Record layout:
/// ```text
/// 0x00: position.xyz  f32 × 3 (BE)
/// 0x0C: padding       4 × 0
/// 0x10: normal.xyz    unorm8 × 3, pad 0
/// 0x14: tangent.xyz   unorm8 × 3, pad 0
/// 0x18: uv            unorm16 × 2 (BE)
/// 0x1C: padding       4 × 0
/// ```
pub fn pack_vertex(
    position: [f32; 3],
    normal: [f32; 3],
    tangent: [f32; 3],
    uv: [f32; 2],
) -> PackedVertex {
    let mut bytes = [0u8; VERTEX_STRIDE];

    for (i, component) in position.iter().enumerate() {
        let at = POSITION_OFFSET + i * 4;
        bytes[at..at + 4].copy_from_slice(&component.to_be_bytes());
    }

    let (packed_normal, normal_clamped) = pack_direction_unorm8(normal);
    bytes[NORMAL_OFFSET..NORMAL_OFFSET + 4].copy_from_slice(&packed_normal);

    let (packed_tangent, tangent_clamped) = pack_direction_unorm8(tangent);
    bytes[TANGENT_OFFSET..TANGENT_OFFSET + 4].copy_from_slice(&packed_tangent);

    let (packed_uv, uv_clamped) = pack_uv_unorm16(uv);
    bytes[UV_OFFSET..UV_OFFSET + 2].copy_from_slice(&packed_uv[0].to_be_bytes());
    bytes[UV_OFFSET + 2..ATTRIBUTE_END].copy_from_slice(&packed_uv[1].to_be_bytes());

    PackedVertex {
        bytes,
        clamped: normal_clamped + tangent_clamped + uv_clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snorm_to_unorm8_range() {
        assert_eq!(snorm_to_unorm8(-1.0), (0, false));
        assert_eq!(snorm_to_unorm8(0.0), (128, false));
        assert_eq!(snorm_to_unorm8(1.0), (255, false));
    }

    #[test]
    fn test_snorm_to_unorm8_clamps_instead_of_wrapping() {
        assert_eq!(snorm_to_unorm8(1.5), (255, true));
        assert_eq!(snorm_to_unorm8(-1.5), (0, true));
        assert_eq!(snorm_to_unorm8(f32::INFINITY), (255, true));
        assert_eq!(snorm_to_unorm8(f32::NAN), (0, true));
    }

    #[test]
    fn test_unit_to_unorm16_range() {
        assert_eq!(unit_to_unorm16(0.0), (0, false));
        assert_eq!(unit_to_unorm16(1.0), (65535, false));
        assert_eq!(unit_to_unorm16(0.5), (32768, false));
        assert_eq!(unit_to_unorm16(2.0), (65535, true));
        assert_eq!(unit_to_unorm16(-0.25), (0, true));
    }

    #[test]
    fn test_pack_direction_pads_with_zero() {
        let (packed, clamped) = pack_direction_unorm8([1.0, -1.0, 0.0]);
        assert_eq!(packed, [255, 0, 128, 0]);
        assert_eq!(clamped, 0);
    }

    #[test]
    fn test_pack_vertex_layout() {
        let packed = pack_vertex([1.0, -2.0, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0]);
        let b = &packed.bytes;

        assert_eq!(&b[0..4], &1.0f32.to_be_bytes());
        assert_eq!(&b[4..8], &(-2.0f32).to_be_bytes());
        assert_eq!(&b[8..12], &0.5f32.to_be_bytes());
        assert_eq!(&b[NORMAL_OFFSET..NORMAL_OFFSET + 4], &[128, 128, 255, 0]);
        assert_eq!(&b[TANGENT_OFFSET..TANGENT_OFFSET + 4], &[255, 128, 128, 0]);
        assert_eq!(&b[12..16], &[0u8; 4]);
        assert_eq!(&b[16..20], &[128, 128, 255, 0]);
        assert_eq!(u16::from_be_bytes([b[24], b[25]]), 0);
        assert_eq!(u16::from_be_bytes([b[26], b[27]]), 65535);
        assert_eq!(&b[28..32], &[0u8; 4]);
        assert_eq!(packed.clamped, 0);
    }

    #[test]
    fn test_pack_vertex_counts_every_clamp() {
        let packed = pack_vertex([0.0; 3], [1.5, -1.5, 0.0], [0.0, 0.0, 3.0], [1.2, -0.1]);
        assert_eq!(packed.clamped, 5);
        assert_eq!(&packed.bytes[NORMAL_OFFSET..NORMAL_OFFSET + 3], &[255, 0, 128]);
    }
}
