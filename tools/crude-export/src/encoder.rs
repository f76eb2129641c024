//! Serialization of collected buffers to the `.crudeb` byte stream

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crude_common::{
    CrudeMeshHeader, FLAG_INDICES_BIG_ENDIAN, INDEX_SIZE, IndexEndian, VERTEX_STRIDE,
    encode_indices, pack_vertex,
};
use serde::Deserialize;
use tracing::warn;

use crate::buffers::{ExportBuffers, RawVertex};
use crate::error::ExportError;

/// Overall file layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileLayout {
    /// Vertex records immediately followed by indices, no header
    #[default]
    Legacy,
    /// [`CrudeMeshHeader`] followed by the legacy payload
    Versioned,
}

impl FileLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Versioned => "versioned",
        }
    }
}

impl fmt::Display for FileLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "versioned" => Ok(Self::Versioned),
            other => Err(format!(
                "unknown file layout '{other}' (use legacy or versioned)"
            )),
        }
    }
}

/// Counters from one encoding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub vertices: usize,
    pub indices: usize,
    pub bytes_written: usize,
    /// Normal/tangent/UV components clamped during quantization
    pub clamped_components: u64,
}

/// Writes [`ExportBuffers`] as packed vertex records followed by the index block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferEncoder {
    pub layout: FileLayout,
    pub index_endian: IndexEndian,
}

impl BufferEncoder {
    pub fn new(layout: FileLayout, index_endian: IndexEndian) -> Self {
        Self {
            layout,
            index_endian,
        }
    }

    /// The legacy layout: headerless, platform-endian indices
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Byte order the index block will actually use
    ///
    /// The versioned header records the order, so `Native` is pinned to the
    /// host's order there. Legacy files keep `Native` as is.
    pub fn effective_index_endian(&self) -> IndexEndian {
        match self.layout {
            FileLayout::Legacy => self.index_endian,
            FileLayout::Versioned => self.index_endian.resolve(),
        }
    }

    /// Exact number of bytes [`encode`](Self::encode) produces for `buffers`
    pub fn encoded_len(&self, buffers: &ExportBuffers) -> usize {
        let header = match self.layout {
            FileLayout::Legacy => 0,
            FileLayout::Versioned => CrudeMeshHeader::SIZE,
        };
        header + VERTEX_STRIDE * buffers.vertex_count() + INDEX_SIZE * buffers.index_count()
    }

    /// Encode `buffers` into `w`
    ///
    /// Any write error aborts immediately; bytes already handed to `w` stay
    /// there.
    pub fn encode<W: Write>(
        &self,
        buffers: &ExportBuffers,
        w: &mut W,
    ) -> Result<EncodeStats, ExportError> {
        let index_endian = self.effective_index_endian();
        let mut stats = EncodeStats {
            vertices: buffers.vertex_count(),
            indices: buffers.index_count(),
            ..Default::default()
        };

        if self.layout == FileLayout::Versioned {
            let flags = if index_endian == IndexEndian::Big {
                FLAG_INDICES_BIG_ENDIAN
            } else {
                0
            };
            let header = CrudeMeshHeader::new(
                header_count("vertices", buffers.vertex_count())?,
                header_count("indices", buffers.index_count())?,
                flags,
            );
            w.write_all(&header.to_bytes())?;
            stats.bytes_written += CrudeMeshHeader::SIZE;
        }

        for vertex in &buffers.vertices {
            let (record, clamped) = encode_vertex(vertex);
            w.write_all(&record)?;
            stats.clamped_components += clamped as u64;
        }
        stats.bytes_written += VERTEX_STRIDE * buffers.vertex_count();

        let index_block = encode_indices(&buffers.indices, index_endian);
        w.write_all(&index_block)?;
        stats.bytes_written += index_block.len();

        if stats.clamped_components > 0 {
            warn!(
                "Clamped {} out-of-range vertex components while quantizing (non-unit normals or UVs outside [0, 1]?)",
                stats.clamped_components
            );
        }

        Ok(stats)
    }

    /// Encode into a fresh byte vector
    pub fn encode_to_vec(&self, buffers: &ExportBuffers) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::with_capacity(self.encoded_len(buffers));
        self.encode(buffers, &mut out)?;
        Ok(out)
    }
}

/// Pack one vertex into its 32-byte record, returning the clamp count
pub fn encode_vertex(vertex: &RawVertex) -> ([u8; VERTEX_STRIDE], u32) {
    let packed = pack_vertex(vertex.position, vertex.normal, vertex.tangent, vertex.uv);
    (packed.bytes, packed.clamped)
}

fn header_count(what: &'static str, count: usize) -> Result<u32, ExportError> {
    u32::try_from(count).map_err(|_| ExportError::CountOverflow { what, count })
}
