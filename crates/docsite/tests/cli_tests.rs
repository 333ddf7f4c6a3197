mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{sample_site, DocsTree};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_help() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("--help");

    cmd.assert().success().stdout(predicate::str::contains("Documentation content pipeline"));
}

#[test]
fn test_fmt_json_from_stdin() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("fmt").arg("--lang").arg("json").write_stdin(r#"{"a":1,  "b":2}"#);

    cmd.assert().success().stdout("{\n  \"a\": 1,\n  \"b\": 2\n}\n");
}

#[test]
fn test_fmt_uses_file_extension() {
    let docs = DocsTree::new().file("snippet.js", "const greeting = \"hello\";\n");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("fmt").arg(docs.path("snippet.js"));

    cmd.assert().success().stdout("const greeting = 'hello';\n");
}

#[test]
fn test_fmt_lightweight_skips_structured() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["fmt", "--lang", "js", "--lightweight"]).write_stdin("\n\nconst a = \"x\"   \n\n");

    cmd.assert().success().stdout("const a = \"x\"\n");
}

#[test]
fn test_fmt_broken_snippet_is_unchanged() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["fmt", "--lang", "ts"]).write_stdin("function (  {");

    cmd.assert().success().stdout("function (  {\n");
}

#[test]
fn test_fmt_kept_snippet_keeps_single_newline() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["fmt", "--lang", "js"]).write_stdin("foo(]\n");

    cmd.assert().success().stdout("foo(]\n");
}

#[test]
fn test_fmt_missing_file() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["fmt", "/definitely/not/here.js"]);

    cmd.assert().failure().stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_md_prints_formatted_document() {
    let docs = DocsTree::new().file("page.md", "# Page\n\n```json\n{\"a\":1}\n```\n");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("md").arg(docs.path("page.md"));

    cmd.assert().success().stdout("# Page\n\n```json\n{\n  \"a\": 1\n}\n```\n");
}

#[test]
fn test_md_write_in_place() {
    let docs = DocsTree::new().file("page.md", "```py\nx = 1   \n```\n");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("md").arg(docs.path("page.md")).arg("--write");

    cmd.assert().success().stdout(predicate::str::contains("1 code block(s) reformatted"));
    assert_eq!(docs.read("page.md"), "```py\nx = 1\n```\n");
}

#[test]
fn test_md_check() {
    let docs = DocsTree::new()
        .file("messy.md", "```js\nconst a = \"x\"\n```\n")
        .file("clean.md", "```js\nconst a = 'x'\n```\n");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("md").arg(docs.path("messy.md")).arg("--check");
    cmd.assert().failure().stderr(predicate::str::contains("would be reformatted"));
    assert_eq!(docs.read("messy.md"), "```js\nconst a = \"x\"\n```\n");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("md").arg(docs.path("clean.md")).arg("--check");
    cmd.assert().success().stdout(predicate::str::contains("is formatted"));
}

#[test]
fn test_crumbs_text() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["crumbs", "/apis/sessions-api/reference/create-session"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("APIS"))
        .stdout(predicate::str::contains("Sessions API"))
        .stdout(predicate::str::contains("Create Session").not());
}

#[test]
fn test_crumbs_json() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["crumbs", "/resources/clarity", "--json"]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let items: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        items,
        serde_json::json!([
            { "name": "Resources", "url": "/resources" },
            { "name": "Clarity" }
        ])
    );
}

#[test]
fn test_export_index() {
    let docs = sample_site();

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("-d").arg(docs.root()).arg("export");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("# Acme Docs\n\n> Everything about Acme\n\n## Pages\n"))
        .stdout(predicate::str::contains(
            "- [Quick start](https://docs.acme.dev/guides/quick-start): Install and run",
        ))
        .stdout(predicate::str::contains("Secret").not());
}

#[test]
fn test_export_full_to_file() {
    let docs = sample_site();
    let out = docs.path("llms-full.txt");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("--docs-dir").arg(docs.root()).args(["export", "--full", "-o"]).arg(&out);

    cmd.assert().success().stderr(predicate::str::contains("Wrote 4 page(s)"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("## Quick start\n\nPath: Guides > Quick Start\n"));
    assert!(text.contains("```js\nconst x = { a: 1 }\n```"));
    assert!(!text.contains("import Hero"));
}

#[test]
fn test_export_to_directory_uses_conventional_name() {
    let docs = sample_site();
    let out = tempfile::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("-d").arg(docs.root()).args(["export", "-o"]).arg(out.path());

    cmd.assert().success();

    let text = fs::read_to_string(out.path().join("llms.txt")).unwrap();
    assert!(text.starts_with("# Acme Docs\n"));
    assert!(!out.path().join("llms-full.txt").exists());
}

#[test]
fn test_export_respects_config_excludes() {
    let docs = sample_site().config("[export]\nexclude = [\"drafts/**\"]\n");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("-d").arg(docs.root()).arg("export");

    cmd.assert().success().stdout(predicate::str::contains("drafts/wip").not());
}

#[test]
fn test_export_missing_docs_dir() {
    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.args(["-d", "/definitely/not/a/docs/dir", "export"]);

    cmd.assert().failure().stderr(predicate::str::contains("docs directory not found"));
}

#[test]
fn test_bad_config_reports_suggestion() {
    let docs = DocsTree::new().config("[site\ntitle = ");

    let mut cmd = cargo_bin_cmd!("docsite");
    cmd.arg("-d").arg(docs.root()).arg("export");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("Suggestion:"));
}
