//! Index block encoding
//!
//! Indices are always 32-bit unsigned. The legacy layout writes them in the
//! exporting machine's byte order, unlike the big-endian vertex records.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Size of one index in bytes
pub const INDEX_SIZE: usize = 4;

/// Byte order of the index block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexEndian {
    /// Host byte order (legacy)
    #[default]
    Native,
    Little,
    Big,
}

impl IndexEndian {
    /// Resolve `Native` to the byte order of the current target
    pub fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::Big,
            Self::Native => Self::Little,
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Little => "little",
            Self::Big => "big",
        }
    }
}

impl fmt::Display for IndexEndian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexEndian {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "little" | "le" => Ok(Self::Little),
            "big" | "be" => Ok(Self::Big),
            other => Err(format!(
                "unknown index byte order '{other}' (use native, little or big)"
            )),
        }
    }
}

/// Encode indices as a flat byte block
///
/// Native order borrows the slice directly; explicit orders allocate.
pub fn encode_indices(indices: &[u32], endian: IndexEndian) -> Cow<'_, [u8]> {
    match endian {
        IndexEndian::Native => Cow::Borrowed(bytemuck::cast_slice(indices)),
        IndexEndian::Little => Cow::Owned(indices.iter().flat_map(|i| i.to_le_bytes()).collect()),
        IndexEndian::Big => Cow::Owned(indices.iter().flat_map(|i| i.to_be_bytes()).collect()),
    }
}
