//! Integration tests for the dgml CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn dgml() -> Command {
    let mut cmd = Command::cargo_bin("dgml").unwrap();
    cmd.env_remove("DGML_CONFIG");
    cmd
}

#[test]
fn test_process_text_output() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Main Heading with Acme Corp as mixed content\n\nSub-Heading\n",
        ))
        .stdout(predicate::str::contains("1. Item A"))
        .stdout(predicate::str::contains("3. C pg.1"));
}

#[test]
fn test_json_output() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .arg("-f")
        .arg("json")
        .arg("--quiet");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let chunks = value.as_array().unwrap();

    assert_eq!(chunks.len(), 7);
    assert_eq!(chunks[0]["structure"], "h1");
    assert_eq!(chunks[0]["xpath"], "/docset:MutualNDA/docset:Preamble");
    assert!(chunks[0].get("xml").is_none());
    assert_eq!(chunks[0]["metadata"]["source"], fixture_path("nda.xml"));
}

#[test]
fn test_json_include_xml_and_parent_context() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .args(["-f", "json", "--xml", "--levels", "1", "--include-xml", "--compact"])
        .arg("--quiet");

    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.lines().count(), 1);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let first = &value[0];
    assert!(first["text"].as_str().unwrap().starts_with("<Preamble>"));
    assert!(first["xml"].as_str().unwrap().starts_with("<docset:Preamble"));
    assert_eq!(first["parent"]["tag"], "MutualNDA");
}

#[test]
fn test_markdown_output() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .arg("-f")
        .arg("markdown")
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "1. **h1** `/docset:MutualNDA/docset:Preamble`",
        ))
        .stdout(predicate::str::contains("---"))
        .stdout(predicate::str::contains("*Total chunks: 7*"));
}

#[test]
fn test_table_rendering_and_style() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("manifest.xml"))
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("| Bananas | 250      |"));

    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("manifest.xml"))
        .args(["--table-style", "simple"])
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("-------  --------"))
        .stdout(predicate::str::contains("|").not());
}

#[test]
fn test_sub_chunk_tables_flag() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("manifest.xml"))
        .args(["--sub-chunk-tables", "--min-length", "0"])
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Item Quantity\n\nApples 10\n"));
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("chunks.txt");

    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .arg("-o")
        .arg(&output_file)
        .arg("--quiet");

    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("Sub-Heading"));
}

#[test]
fn test_glob_pattern() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("*.xml"))
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Shipping manifest"))
        .stdout(predicate::str::contains("Sub-Heading"));
}

#[test]
fn test_invalid_file() {
    let mut cmd = dgml();
    cmd.arg("process").arg("-i").arg("nonexistent.xml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_malformed_xml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.xml");
    fs::write(&input, "<doc><p structure=\"p\">unclosed</doc>").unwrap();

    let mut cmd = dgml();
    cmd.arg("process").arg("-i").arg(&input).arg("--quiet");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to chunk"))
        .stderr(predicate::str::contains("broken.xml"))
        .stderr(predicate::str::contains("XML parse error"));
}

#[test]
fn test_levels_without_xml_conflict() {
    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .args(["--levels", "2"])
        .arg("--quiet");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("requires xml_rendering_mode"));
}

#[test]
fn test_config_file_sets_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("dgml.toml");
    fs::write(
        &config,
        "[segmentation]\nmin_chunk_text_length = 0\n\n[output]\nformat = \"markdown\"\n",
    )
    .unwrap();

    let mut cmd = dgml();
    cmd.arg("process")
        .arg("-i")
        .arg(fixture_path("nda.xml"))
        .arg("-c")
        .arg(&config)
        .arg("--quiet");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("*Total chunks: 8*"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("dgml.toml");

    let mut cmd = dgml();
    cmd.arg("generate-config")
        .arg("-o")
        .arg(&config)
        .args(["--xml-levels", "2"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    let mut cmd = dgml();
    cmd.arg("validate").arg("-c").arg(&config);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Parent levels: 2"));
}

#[test]
fn test_validate_rejects_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("dgml.toml");
    fs::write(&config, "[segmentation]\nparent_hierarchy_levels = 1\n").unwrap();

    let mut cmd = dgml();
    cmd.arg("validate").arg("-c").arg(&config);
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Configuration is invalid"));
}

#[test]
fn test_list_formats() {
    let mut cmd = dgml();
    cmd.arg("list").arg("formats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_list_styles() {
    let mut cmd = dgml();
    cmd.arg("list").arg("styles");

    cmd.assert()
        .success()
        .stdout("grid\nsimple\nplain\n");
}

#[test]
fn test_help_output() {
    let mut cmd = dgml();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("structural chunks"))
        .stdout(predicate::str::contains("generate-config"));
}
