//! End-to-end tests for the crude-export binary


use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

use crude_export::{CrudeMeshHeader, VERTEX_STRIDE};

fn crude_export(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crude-export"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("Failed to run crude-export")
}

#[test]
fn test_scene_command_default_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_test_assets::generate_scene_gltf(dir.path()).expect("Failed to write glTF");

    let out = crude_export(&["scene", "scene.gltf"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(dir.path().join("scene.crudeb")).expect("Output missing");
    assert_eq!(bytes.len(), 11 * VERTEX_STRIDE + 15 * 4);
}

#[test]
fn test_scene_command_versioned_selection() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_test_assets::generate_scene_gltf(dir.path()).expect("Failed to write glTF");

    let out = crude_export(
        &[
            "scene",
            "scene.gltf",
            "-o",
            "crate.crudeb",
            "--layout",
            "versioned",
            "--index-order",
            "big",
            "--select",
            "Crate",
        ],
        dir.path(),
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let bytes = std::fs::read(dir.path().join("crate.crudeb")).expect("Output missing");
    let header = CrudeMeshHeader::from_bytes(&bytes).expect("Invalid header");
    assert_eq!(header.vertex_count, 4);
    assert_eq!(header.index_count, 6);
    assert!(header.indices_big_endian());
}

#[test]
fn test_scene_command_rejects_unknown_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out = crude_export(&["scene", "scene.gltf", "--layout", "v2"], dir.path());
    assert!(!out.status.success());
}

#[test]
fn test_build_and_check_manifest() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_test_assets::generate_scene_gltf(dir.path()).expect("Failed to write glTF");

    let manifest = r#"
[output]
dir = "build"
layout = "versioned"

[[scene]]
id = "full"
input = "scene.gltf"

[[scene]]
id = "lid"
input = "scene.gltf"
output = "lid_only.crudeb"
layout = "legacy"
select = ["Lid"]
"#;
    std::fs::write(dir.path().join("crude.toml"), manifest).expect("Failed to write manifest");

    let check = crude_export(&["check"], dir.path());
    assert!(check.status.success(), "{}", String::from_utf8_lossy(&check.stderr));
    assert!(!dir.path().join("build").exists());

    let build = crude_export(&["build"], dir.path());
    assert!(build.status.success(), "{}", String::from_utf8_lossy(&build.stderr));

    let full = std::fs::read(dir.path().join("build/full.crudeb")).expect("full.crudeb missing");
    let header = CrudeMeshHeader::from_bytes(&full).expect("Invalid header");
    assert_eq!(header.vertex_count, 11);
    assert_eq!(header.index_count, 15);

    let lid = std::fs::read(dir.path().join("build/lid_only.crudeb")).expect("lid missing");
    assert_eq!(lid.len(), 3 * VERTEX_STRIDE + 3 * 4);
}

#[test]
fn test_check_rejects_duplicate_ids() {
    let dir = tempdir().expect("Failed to create temp dir");
    let manifest = r#"
[[scene]]
id = "a"
input = "a.glb"

[[scene]]
id = "a"
input = "b.glb"
"#;
    std::fs::write(dir.path().join("crude.toml"), manifest).expect("Failed to write manifest");

    let out = crude_export(&["check"], dir.path());
    assert!(!out.status.success());
}

#[test]
fn test_build_verbose_logs_each_object() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_test_assets::generate_scene_gltf(dir.path()).expect("Failed to write glTF");
    let manifest = "[[scene]]\nid = \"full\"\ninput = \"scene.gltf\"\n";
    std::fs::write(dir.path().join("crude.toml"), manifest).expect("Failed to write manifest");

    let quiet = crude_export(&["build"], dir.path());
    assert!(quiet.status.success(), "{}", String::from_utf8_lossy(&quiet.stderr));
    assert!(!String::from_utf8_lossy(&quiet.stdout).contains("Collected 'Floor'"));

    let verbose = crude_export(&["build", "--verbose"], dir.path());
    assert!(verbose.status.success(), "{}", String::from_utf8_lossy(&verbose.stderr));
    assert!(String::from_utf8_lossy(&verbose.stdout).contains("Collected 'Floor'"));
}
