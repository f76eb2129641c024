//! crude-export - Crude scene export tool
//!
//! Converts glTF/GLB scenes into .crudeb vertex/index buffers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hashbrown::HashSet;
use std::path::PathBuf;

// Use modules from library
use crude_export::{
    CRUDE_MESH_EXT, CollectOptions, ExportOptions, FileLayout, IndexEndian, export_scene,
    load_gltf_scene, manifest,
};

#[derive(Parser)]
#[command(name = "crude-export")]
#[command(about = "Crude scene export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single glTF/GLB scene
    Scene {
        /// Input scene file (glTF/GLB)
        input: PathBuf,

        /// Output .crudeb file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File layout (legacy or versioned)
        #[arg(short, long, default_value_t = FileLayout::Legacy)]
        layout: FileLayout,

        /// Index byte order (native, little or big)
        #[arg(short, long, default_value_t = IndexEndian::Native)]
        index_order: IndexEndian,

        /// Only export meshes on nodes with this name (repeatable)
        #[arg(short, long = "select", value_name = "NAME")]
        select: Vec<String>,
    },

    /// Export every scene listed in a manifest
    Build {
        /// Path to crude.toml manifest
        #[arg(default_value = "crude.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Log every collected object (DEBUG level)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without exporting
    Check {
        /// Path to crude.toml manifest
        #[arg(default_value = "crude.toml")]
        manifest: PathBuf,
    },
}

impl Commands {
    /// Default log level; `build --verbose` shows per-object collection
    fn log_level(&self) -> tracing::Level {
        match self {
            Commands::Build { verbose: true, .. } => tracing::Level::DEBUG,
            _ => tracing::Level::INFO,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(cli.command.log_level().into()),
        )
        .init();

    match cli.command {
        Commands::Scene {
            input,
            output,
            layout,
            index_order,
            select,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(CRUDE_MESH_EXT));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let selection: Option<HashSet<String>> =
                (!select.is_empty()).then(|| select.into_iter().collect());
            let roots = load_gltf_scene(&input, selection.as_ref())?;

            let options = ExportOptions {
                collect: CollectOptions {
                    selected_only: selection.is_some(),
                },
                layout,
                index_endian: index_order,
            };
            export_scene(&roots, &output, &options)
                .with_context(|| format!("Failed to export {:?}", input))?;
            tracing::info!("Done!");
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building scenes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            let summaries = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! {} scenes exported", summaries.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
