// Test infrastructure for docsite integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway docs directory populated file by file
pub struct DocsTree {
    temp: TempDir,
}

impl DocsTree {
    pub fn new() -> Self {
        Self { temp: TempDir::new().unwrap() }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` at `relative`, creating parent directories
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        self
    }

    /// A page with `title`/`description` frontmatter
    pub fn page(self, relative: &str, title: &str, description: &str, body: &str) -> Self {
        let contents =
            format!("---\ntitle: {}\ndescription: {}\n---\n{}", title, description, body);
        self.file(relative, &contents)
    }

    pub fn config(self, toml: &str) -> Self {
        self.file("docsite.toml", toml)
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}

/// The sample site used across tests
pub fn sample_site() -> DocsTree {
    DocsTree::new()
        .config(
            r#"
[site]
title = "Acme Docs"
description = "Everything about Acme"
base_url = "https://docs.acme.dev"
"#,
        )
        .page("index.mdx", "Welcome", "Start here", "import Hero from './hero'\n\n# Welcome\n")
        .page(
            "guides/quick-start.md",
            "Quick start",
            "Install and run",
            "Run this:\n\n```js\nconst x = {a:1}\n```\n",
        )
        .file("apis/sessions-api/reference/create-session.md", "Creates a session.\n")
        .file("drafts/wip.md", "Not ready\n")
        .file(".hidden/secret.md", "Hidden\n")
        .file("assets/notes.txt", "Not a page\n")
}
