use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn cxtract() -> Command {
    Command::cargo_bin("cxtract").expect("binary")
}

fn setup_project() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("src/arena.h"),
        "/* Opaque arena handle. */\ntypedef struct mx_arena mx_arena_t;\n\n\
         /* Create an arena. */\nmx_arena_t *mx_arena_create(void);\n",
    )
    .unwrap();
    fs::write(root.join("src/notes.txt"), "not a source file\n").unwrap();
    temp
}

#[test]
fn generate_writes_module_document() {
    let temp = setup_project();
    let out = temp.path().join("docs");

    cxtract()
        .arg("generate")
        .arg(temp.path())
        .arg("--output")
        .arg(&out)
        .arg("--single-file")
        .arg("--name")
        .arg("mxcore")
        .assert()
        .success()
        .stdout(predicate::str::contains("mxcore.md"));

    let text = fs::read_to_string(out.join("mxcore.md")).unwrap();
    assert!(text.contains("Opaque arena handle."));
    assert!(text.contains("```c"));
}

#[test]
fn generate_project_index_per_source() {
    let temp = setup_project();
    let out = temp.path().join("docs");

    cxtract()
        .arg("generate")
        .arg(temp.path())
        .arg("--output")
        .arg(&out)
        .arg("--style")
        .arg("project_index")
        .arg("--name")
        .arg("mxcore")
        .assert()
        .success();

    let source_doc = fs::read_to_string(out.join("src/arena.md")).unwrap();
    assert!(source_doc.starts_with("### arena.h"));
    assert!(source_doc.contains(":link: [src/arena.h](src/arena.h)"));
    assert!(source_doc.contains("#### `mx_arena_t` (typedef struct)"));
}

#[test]
fn generate_reads_config_file() {
    let temp = setup_project();
    fs::write(
        temp.path().join(".cxtract.toml"),
        "name = \"configured\"\npublish_single_file = true\noutput_dir = \"docs\"\n",
    )
    .unwrap();

    cxtract()
        .arg("generate")
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("docs/configured.md").is_file());
}

#[test]
fn generate_rejects_unknown_style() {
    let temp = setup_project();
    cxtract()
        .arg("generate")
        .arg(temp.path())
        .arg("--style")
        .arg("man-pages")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown style"));
}

#[test]
fn generate_rejects_missing_path() {
    cxtract()
        .arg("generate")
        .arg("/no/such/path")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such path"));
}

#[test]
fn chunks_prints_json_lines() {
    let temp = setup_project();
    let output = cxtract()
        .arg("chunks")
        .arg(temp.path().join("src/arena.h"))
        .output()
        .expect("command run");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: Value = serde_json::from_str(lines[0]).expect("valid json");
    assert_eq!(first["types"][0], "typedef");
    assert_eq!(first["names"][1], "mx_arena_t");
}

#[test]
fn chunks_requires_a_file() {
    let temp = setup_project();
    cxtract()
        .arg("chunks")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a file"));
}

#[test]
fn styles_lists_registry() {
    cxtract()
        .arg("styles")
        .assert()
        .success()
        .stdout(predicate::str::contains("readme").and(predicate::str::contains("project_index")));
}

#[test]
fn single_file_target_generates() {
    let temp = setup_project();
    let file = temp.path().join("src/arena.h");
    let out = temp.path().join("docs");

    cxtract()
        .arg("generate")
        .arg(&file)
        .arg("--output")
        .arg(&out)
        .arg("--single-file")
        .assert()
        .success();

    // Module takes its name from the containing directory
    assert!(out.join("src.md").is_file());
}
