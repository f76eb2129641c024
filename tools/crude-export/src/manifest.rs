//! crude.toml export manifest
//!
//! Lists scenes to export and the layout each one is written with:
//!
//! ```toml
//! [output]
//! dir = "build"
//! layout = "legacy"
//! index_order = "native"
//!
//! [[scene]]
//! id = "level1"
//! input = "level1.glb"
//! select = ["Crate", "Door"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use crude_common::{CRUDE_MESH_EXT, IndexEndian};
use hashbrown::HashSet;
use serde::Deserialize;

use crate::collector::CollectOptions;
use crate::encoder::FileLayout;
use crate::export::{ExportOptions, ExportSummary, export_scene};
use crate::gltf_scene::load_gltf_scene;

/// Root of a crude.toml file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default, rename = "scene")]
    pub scenes: Vec<SceneEntry>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Defaults shared by every scene
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output directory (default: manifest directory)
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub layout: FileLayout,
    #[serde(default)]
    pub index_order: IndexEndian,
}

/// One scene to export
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneEntry {
    pub id: String,
    /// Source glTF/GLB file
    pub input: PathBuf,
    /// Output file name (default: `<id>.crudeb`)
    pub output: Option<PathBuf>,
    pub layout: Option<FileLayout>,
    pub index_order: Option<IndexEndian>,
    /// Node names to export; when set, only these meshes are written
    pub select: Option<Vec<String>>,
}

impl SceneEntry {
    /// Export options after applying the manifest-wide defaults
    pub fn options(&self, defaults: &OutputSection) -> ExportOptions {
        ExportOptions {
            collect: CollectOptions {
                selected_only: self.select.is_some(),
            },
            layout: self.layout.unwrap_or(defaults.layout),
            index_endian: self.index_order.unwrap_or(defaults.index_order),
        }
    }

    pub fn selection(&self) -> Option<HashSet<String>> {
        self.select.as_ref().map(|names| names.iter().cloned().collect())
    }

    fn output_name(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", self.id, CRUDE_MESH_EXT)))
    }
}

impl ExportManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml(text: &str, base_dir: &Path) -> Result<Self> {
        let mut manifest: ExportManifest =
            toml::from_str(text).context("Failed to parse export manifest")?;
        manifest.base_dir = base_dir.to_path_buf();
        Ok(manifest)
    }

    pub fn input_path(&self, entry: &SceneEntry) -> PathBuf {
        self.base_dir.join(&entry.input)
    }

    /// Output path for `entry`, honoring a command-line directory override
    pub fn output_path(&self, entry: &SceneEntry, dir_override: Option<&Path>) -> PathBuf {
        let dir = match (dir_override, &self.output.dir) {
            (Some(dir), _) => dir.to_path_buf(),
            (None, Some(dir)) => self.base_dir.join(dir),
            (None, None) => self.base_dir.clone(),
        };
        dir.join(entry.output_name())
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<ExportManifest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    ExportManifest::from_toml(&text, base_dir)
}

/// Check a manifest for problems that would fail or confuse a build
pub fn validate(manifest: &ExportManifest) -> Result<()> {
    if manifest.scenes.is_empty() {
        bail!("Manifest lists no [[scene]] entries");
    }

    let mut ids = HashSet::new();
    for entry in &manifest.scenes {
        if entry.id.is_empty() {
            bail!("Scene with input {:?} has an empty id", entry.input);
        }
        if !ids.insert(entry.id.as_str()) {
            bail!("Duplicate scene id '{}'", entry.id);
        }

        let ext = entry
            .input
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();
        if !matches!(ext.as_str(), "gltf" | "glb") {
            bail!(
                "Scene '{}': unsupported input {:?} (use .gltf or .glb)",
                entry.id,
                entry.input
            );
        }

        let options = entry.options(&manifest.output);
        if options.layout == FileLayout::Legacy && options.index_endian != IndexEndian::Native {
            tracing::info!(
                "Scene '{}' uses the legacy layout with {} indices; legacy readers expect native order",
                entry.id,
                options.index_endian
            );
        }
    }

    Ok(())
}

/// Export every scene in the manifest
pub fn build_all(
    manifest: &ExportManifest,
    dir_override: Option<&Path>,
) -> Result<Vec<ExportSummary>> {
    validate(manifest)?;

    let mut summaries = Vec::with_capacity(manifest.scenes.len());
    for entry in &manifest.scenes {
        let input = manifest.input_path(entry);
        let output = manifest.output_path(entry, dir_override);

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }

        tracing::info!("Exporting scene '{}': {:?} -> {:?}", entry.id, input, output);
        let selection = entry.selection();
        let roots = load_gltf_scene(&input, selection.as_ref())?;
        let summary = export_scene(&roots, &output, &entry.options(&manifest.output))
            .with_context(|| format!("Failed to export scene '{}'", entry.id))?;
        summaries.push(summary);
    }

    Ok(summaries)
}
