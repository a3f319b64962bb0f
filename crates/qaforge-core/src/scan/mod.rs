//! Best-effort discovery of testable surface in an application's source tree.
//!
//! This is a regex matcher, not a parser: each extraction rule is a pure
//! `&str -> Vec<_>` function that can be tested on its own, and the walk
//! merely feeds file contents through the rules for the requested category.
//! False positives and misses are expected.

pub mod api;
pub mod ui;
pub mod walk;
pub mod websocket;

use crate::error::{ForgeError, Result};
use crate::paths;
use crate::types::{Category, HttpMethod};
use serde::Serialize;
use std::path::Path;

// ---------------------------------------------------------------------------
// Scan result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub source_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    pub source_file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocketImplementation {
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Candidates found by one scan. Lists keep every match in discovery order;
/// the boolean signals are OR-accumulated across files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub endpoints: Vec<Endpoint>,
    pub components: Vec<Component>,
    pub routes: Vec<Route>,
    pub sockets: Vec<SocketImplementation>,
    pub has_authentication: bool,
    pub has_forms: bool,
    pub has_websockets: bool,
}

impl ScanResult {
    /// Socket URLs with duplicates removed, first occurrence wins.
    pub fn socket_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        for url in self.sockets.iter().filter_map(|s| s.url.as_ref()) {
            if !urls.contains(url) {
                urls.push(url.clone());
            }
        }
        urls
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
            && self.components.is_empty()
            && self.routes.is_empty()
            && self.sockets.is_empty()
    }

    /// Number of candidates relevant to `category`.
    pub fn candidate_count(&self, category: Category) -> usize {
        match category {
            Category::Api => self.endpoints.len(),
            Category::Ui => self.routes.len() + self.components.len(),
            Category::WebSocket => self.socket_urls().len(),
            _ => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Scan the project at `root` for candidates of `category`.
///
/// Fails with [`ForgeError::NotAProject`] when `root` has no `package.json`.
/// Categories with nothing to scan for return an empty result.
pub fn scan(root: &Path, category: Category) -> Result<ScanResult> {
    if !paths::has_manifest(root) {
        return Err(ForgeError::NotAProject(root.to_path_buf()));
    }

    let mut result = ScanResult::default();
    match category {
        Category::Api => api::scan_tree(root, &mut result)?,
        Category::Ui => ui::scan_tree(root, &mut result)?,
        Category::WebSocket => websocket::scan_tree(root, &mut result)?,
        Category::Performance | Category::Visual | Category::Generic => {}
    }

    tracing::debug!(
        category = %category,
        endpoints = result.endpoints.len(),
        components = result.components.len(),
        routes = result.routes.len(),
        sockets = result.sockets.len(),
        "scan complete"
    );
    Ok(result)
}

/// Project-relative display form of `path`, with forward slashes.
pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
