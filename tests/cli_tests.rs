//! Integration tests for the zet CLI
//!
//! These tests run the zet binary against a temporary notes root and
//! verify end-to-end behavior: indexing, search output, listing, and
//! the structural note commands.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

/// Get a Command for zet wired to the given notes root
fn zet(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zet").unwrap();
    cmd.env("ZET_PATH", root)
        .env("ZET_DB_PATH", root.join("data.db"))
        .env_remove("VISUAL")
        .env_remove("EDITOR");
    cmd
}

fn write_note(root: &Path, dir: &str, content: &str) {
    let dir_path = root.join(dir);
    fs::create_dir_all(&dir_path).unwrap();
    fs::write(dir_path.join("README.md"), content).unwrap();
}

// ============================================================================
// Help, version, configuration
// ============================================================================

#[test]
fn test_help_flag() {
    Command::cargo_bin("zet")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: zet"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("merge"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("zet")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zet"));
}

#[test]
fn test_missing_notes_root_is_fatal() {
    Command::cargo_bin("zet")
        .unwrap()
        .env_remove("ZET_PATH")
        .arg("list")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("notes root not set"));
}

#[test]
fn test_nonexistent_notes_root_is_fatal() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("zet")
        .unwrap()
        .env("ZET_PATH", dir.path().join("missing"))
        .arg("list")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

// ============================================================================
// add
// ============================================================================

#[test]
fn test_add_creates_note() {
    let dir = tempdir().unwrap();

    let output = zet(dir.path())
        .args(["add", "My First Note", "Some body"])
        .write_stdin("")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let note_dir = String::from_utf8_lossy(&output).trim().to_string();
    let content = fs::read_to_string(Path::new(&note_dir).join("README.md")).unwrap();
    assert_eq!(content, "# My First Note\n\nSome body\n");
}

#[test]
fn test_add_appends_stdin() {
    let dir = tempdir().unwrap();

    let output = zet(dir.path())
        .args(["add", "Piped Note"])
        .write_stdin("from stdin\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let note_dir = String::from_utf8_lossy(&output).trim().to_string();
    let content = fs::read_to_string(Path::new(&note_dir).join("README.md")).unwrap();
    assert_eq!(content, "# Piped Note\n\nfrom stdin\n");
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_orders_by_directory_name() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028013010", "# Second");
    write_note(dir.path(), "20231028012959", "# First");

    zet(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "20231028012959 First\n20231028013010 Second",
        ));
}

#[test]
fn test_list_sort_by_title() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Bravo");
    write_note(dir.path(), "20231028013010", "# Alpha");

    zet(dir.path())
        .args(["list", "--sort", "title"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "20231028013010 Alpha\n20231028012959 Bravo",
        ));
}

#[test]
fn test_list_json_format() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# JSON Note\nbody");

    zet(dir.path())
        .args(["--format", "json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"JSON Note\""))
        .stdout(predicate::str::contains("\"dir_name\": \"20231028012959\""));
}

#[test]
fn test_list_ignores_directory_without_readme() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Real");
    fs::create_dir_all(dir.path().join("20231028013010")).unwrap();

    zet(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("20231028013010").not());
}

// ============================================================================
// search
// ============================================================================

#[test]
fn test_search_finds_and_highlights() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Alpha Note\nplain body");
    write_note(
        dir.path(),
        "20231028013010",
        "# Zettel Two\nBody\nunique zettelterm here\n\n    #productivity #pkms",
    );

    zet(dir.path())
        .args(["search", "zettelterm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20231028013010"))
        // term is on body line 2, file line 3
        .stdout(predicate::str::contains("3: unique"))
        .stdout(predicate::str::contains("\u{1b}[31mzettelterm\u{1b}[0m"))
        .stdout(predicate::str::contains("Alpha").not());
}

#[test]
fn test_search_by_tag_token() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Plain\nbody");
    write_note(
        dir.path(),
        "20231028013010",
        "# Tagged\nbody\n\n    #productivity",
    );

    zet(dir.path())
        .args(["search", "#productivity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagged"))
        .stdout(predicate::str::contains("#\u{1b}[31mproductivity\u{1b}[0m"))
        .stdout(predicate::str::contains("Plain").not());
}

#[test]
fn test_search_bad_syntax_prints_synthetic_row() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# A\nbody");

    zet(dir.path())
        .args(["search", "\"unbalanced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect syntax"));
}

#[test]
fn test_search_empty_query_prints_nothing() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# A\nbody");

    zet(dir.path())
        .args(["search", ""])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_search_json_format() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Findable\nbody");

    zet(dir.path())
        .args(["--format", "json", "search", "findable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Findable\""))
        .stdout(predicate::str::contains("\"title_snippet\""));
}

#[test]
fn test_search_reflects_deleted_notes() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Doomed\nbody");

    zet(dir.path())
        .args(["search", "doomed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doomed"));

    fs::remove_dir_all(dir.path().join("20231028012959")).unwrap();

    zet(dir.path())
        .args(["search", "doomed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doomed").not());
}

// ============================================================================
// content and link
// ============================================================================

#[test]
fn test_content_sections() {
    let dir = tempdir().unwrap();
    write_note(
        dir.path(),
        "20231028012959",
        "# The Title\nbody text\n\n* [20231028013010](../20231028013010) Other\n\n    #tagged",
    );
    write_note(dir.path(), "20231028013010", "# Other");

    zet(dir.path())
        .args(["content", "title", "20231028012959"])
        .assert()
        .success()
        .stdout(predicate::str::diff("The Title\n"));

    zet(dir.path())
        .args(["content", "body", "20231028012959"])
        .assert()
        .success()
        .stdout(predicate::str::contains("body text"));

    zet(dir.path())
        .args(["content", "links", "20231028012959"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "* [20231028013010](../20231028013010) Other",
        ));

    zet(dir.path())
        .args(["content", "tags", "20231028012959"])
        .assert()
        .success()
        .stdout(predicate::str::diff("#tagged\n"));
}

#[test]
fn test_content_outside_note_fails() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# A");

    zet(dir.path())
        .args(["content", "title"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not in a zettel"));
}

#[test]
fn test_link_prints_link_line() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Linked Note");

    zet(dir.path())
        .args(["link", "20231028012959"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "* [20231028012959](../20231028012959) Linked Note\n",
        ));
}

#[test]
fn test_link_from_inside_note() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# Inside");

    zet(dir.path())
        .arg("link")
        .current_dir(dir.path().join("20231028012959"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "* [20231028012959](../20231028012959) Inside",
        ));
}

// ============================================================================
// split
// ============================================================================

#[test]
fn test_split_creates_sub_notes_with_back_links() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20240101000000", "# Source Note\noriginal");

    let output = zet(dir.path())
        .arg("split")
        .current_dir(dir.path().join("20240101000000"))
        .write_stdin("## A\n\nbody A\n\n## B\n\nbody B\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let created: Vec<String> = String::from_utf8_lossy(&output)
        .lines()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(created.len(), 2);
    assert_ne!(created[0], created[1]);

    let first = fs::read_to_string(Path::new(&created[0]).join("README.md")).unwrap();
    assert!(first.starts_with("# A\n\nbody A\n"));
    assert!(first.contains("See:\n\n* [20240101000000](../20240101000000) Source Note"));

    let second = fs::read_to_string(Path::new(&created[1]).join("README.md")).unwrap();
    assert!(second.starts_with("# B\n\nbody B\n"));
}

#[test]
fn test_split_outside_note_fails() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20240101000000", "# Source");

    zet(dir.path())
        .arg("split")
        .current_dir(dir.path())
        .write_stdin("## A\nbody")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not in a zettel"));
}

// ============================================================================
// merge
// ============================================================================

#[test]
fn test_merge_expands_link_lines() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20240101000001", "# Leaf\nX");

    zet(dir.path())
        .arg("merge")
        .write_stdin("before\n* [20240101000001](../20240101000001) Leaf\nafter")
        .assert()
        .success()
        .stdout(predicate::str::diff("before\nX\nafter\n"));
}

#[test]
fn test_merge_output_can_be_piped_back() {
    let dir = tempdir().unwrap();
    write_note(
        dir.path(),
        "20240101000001",
        "# Mid\nmid text\nSee:\n* [20240101000002](../20240101000002) Leaf",
    );
    write_note(dir.path(), "20240101000002", "# Leaf\nleaf text");

    // The link line inside the mid note is not part of its body, so
    // unfolding the second level takes a deeper pass over the raw text.
    zet(dir.path())
        .args(["merge", "--depth", "2"])
        .write_stdin("* [20240101000001](../20240101000001) Mid")
        .assert()
        .success()
        .stdout(predicate::str::contains("mid text"));
}

#[test]
fn test_merge_keeps_unresolvable_links() {
    let dir = tempdir().unwrap();

    zet(dir.path())
        .arg("merge")
        .write_stdin("* [20999999999999](../20999999999999) Ghost")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "* [20999999999999](../20999999999999) Ghost",
        ));
}

// ============================================================================
// isosec and sync
// ============================================================================

#[test]
fn test_isosec_shape() {
    let dir = tempdir().unwrap();

    let output = zet(dir.path())
        .arg("isosec")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let iso = String::from_utf8_lossy(&output).trim().to_string();
    assert_eq!(iso.len(), 14);
    assert!(iso.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_sync_creates_catalog() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# A\nbody");

    zet(dir.path()).arg("sync").assert().success();

    assert!(dir.path().join("data.db").exists());
}

#[test]
fn test_sync_twice_is_stable() {
    let dir = tempdir().unwrap();
    write_note(dir.path(), "20231028012959", "# A\nbody");

    zet(dir.path()).arg("sync").assert().success();
    zet(dir.path()).arg("sync").assert().success();

    zet(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::diff("20231028012959 A\n"));
}
