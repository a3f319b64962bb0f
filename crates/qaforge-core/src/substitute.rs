//! Placeholder substitution for template files.
//!
//! Template files carry `{{TOKEN}}` markers that stand in for configuration
//! values. Only file contents are rewritten; file and directory names are
//! copied verbatim even when they contain a token.

use crate::config::ConfigBag;
use crate::error::Result;
use crate::io;
use std::path::Path;
use walkdir::WalkDir;

pub const PROJECT_NAME: &str = "{{PROJECT_NAME}}";
pub const BASE_URL: &str = "{{BASE_URL}}";
pub const API_URL: &str = "{{API_URL}}";
pub const ADMIN_EMAIL: &str = "{{ADMIN_EMAIL}}";
pub const ADMIN_PASSWORD: &str = "{{ADMIN_PASSWORD}}";
pub const USER_EMAIL: &str = "{{USER_EMAIL}}";
pub const USER_PASSWORD: &str = "{{USER_PASSWORD}}";

/// Extensions whose contents go through substitution.
pub const SUBSTITUTED_EXTENSIONS: &[&str] = &["json", "js", "ts", "md", "example", "txt", "html"];

/// Token → value pairs for one configuration bag.
fn replacements(bag: &ConfigBag) -> [(&'static str, &str); 7] {
    [
        (PROJECT_NAME, bag.project_name()),
        (BASE_URL, bag.base_url()),
        (API_URL, bag.api_url()),
        (ADMIN_EMAIL, bag.admin_email()),
        (ADMIN_PASSWORD, bag.admin_password()),
        (USER_EMAIL, bag.user_email()),
        (USER_PASSWORD, bag.user_password()),
    ]
}

/// Replace every occurrence of every known token. Unknown `{{...}}` markers stay.
pub fn substitute(content: &str, bag: &ConfigBag) -> String {
    replacements(bag)
        .iter()
        .fold(content.to_string(), |acc, (token, value)| {
            if acc.contains(token) {
                acc.replace(token, value)
            } else {
                acc
            }
        })
}

pub fn is_substitutable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUBSTITUTED_EXTENSIONS.contains(&ext))
}

/// Rewrite `path` in place if its extension qualifies. Returns true if processed.
pub fn substitute_file(path: &Path, bag: &ConfigBag) -> Result<bool> {
    if !is_substitutable(path) {
        return Ok(false);
    }
    let Some(content) = io::read_text(path) else {
        return Ok(false);
    };
    let rendered = substitute(&content, bag);
    if rendered != content {
        io::atomic_write(path, rendered.as_bytes())?;
    }
    Ok(true)
}

/// Copy the tree at `src` into `dst`, then substitute each copied file.
/// Returns the relative paths of the files written.
pub fn copy_tree(src: &Path, dst: &Path, bag: &ConfigBag) -> Result<Vec<String>> {
    let mut written = Vec::new();
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .unwrap_or(entry.path())
            .to_path_buf();
        let target = dst.join(&rel);
        if entry.file_type().is_dir() {
            io::ensure_dir(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            io::ensure_dir(parent)?;
        }
        std::fs::copy(entry.path(), &target)?;
        substitute_file(&target, bag)?;
        written.push(rel.to_string_lossy().replace('\\', "/"));
    }
    Ok(written)
}
