//! Versioned CrudeMesh header
//!
//! Only written in the versioned layout. All fields big-endian, matching the
//! vertex records that follow.
//!
//! # Layout
//! ```text
//! 0x00: magic b"CRDB"
//! 0x04: version u16
//! 0x06: flags u16 (bit 0: index block is big-endian)
//! 0x08: vertex_count u32
//! 0x0C: index_count u32
//! 0x10: vertex_data (vertex_count * 32)
//! var:  index_data (index_count * 4)
//! ```

/// Magic bytes opening a versioned file
pub const CRUDE_MESH_MAGIC: [u8; 4] = *b"CRDB";

/// Current versioned layout revision
pub const CRUDE_MESH_VERSION: u16 = 1;

/// Header flag: indices are stored big-endian (otherwise little-endian)
pub const FLAG_INDICES_BIG_ENDIAN: u16 = 1;

/// CrudeMesh header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrudeMeshHeader {
    pub version: u16,
    pub flags: u16,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl CrudeMeshHeader {
    pub const SIZE: usize = 16;

    pub fn new(vertex_count: u32, index_count: u32, flags: u16) -> Self {
        Self {
            version: CRUDE_MESH_VERSION,
            flags,
            vertex_count,
            index_count,
        }
    }

    pub fn indices_big_endian(&self) -> bool {
        self.flags & FLAG_INDICES_BIG_ENDIAN != 0
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&CRUDE_MESH_MAGIC);
        bytes[4..6].copy_from_slice(&self.version.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.vertex_count.to_be_bytes());
        bytes[12..16].copy_from_slice(&self.index_count.to_be_bytes());
        bytes
    }

    /// Read header from bytes
    ///
    /// Returns `None` if the slice is too short or the magic does not match.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || bytes[0..4] != CRUDE_MESH_MAGIC {
            return None;
        }
        Some(Self {
            version: u16::from_be_bytes([bytes[4], bytes[5]]),
            flags: u16::from_be_bytes([bytes[6], bytes[7]]),
            vertex_count: u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            index_count: u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }
}
