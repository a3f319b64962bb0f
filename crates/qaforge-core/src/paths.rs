use crate::error::{ForgeError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File and directory constants
// ---------------------------------------------------------------------------

pub const MANIFEST_FILE: &str = "package.json";
pub const TSCONFIG_FILE: &str = "tsconfig.json";
pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

pub const SRC_DIR: &str = "src";
pub const API_DIR: &str = "src/api";
pub const CONFIG_DIR: &str = "src/config";
pub const E2E_DIR: &str = "src/e2e";
pub const UTILS_DIR: &str = "src/utils";
pub const MODELS_DIR: &str = "src/models";
pub const WEBSOCKET_DIR: &str = "src/websocket";
pub const PERFORMANCE_DIR: &str = "src/performance";
pub const VISUAL_DIR: &str = "src/visual";

pub const REPORTS_DIR: &str = "reports";
pub const REPORT_INDEX: &str = "reports/index.html";

/// Directories every generated project gets.
pub const BASE_DIRS: &[&str] = &[API_DIR, CONFIG_DIR, E2E_DIR, UTILS_DIR, MODELS_DIR];

/// Directory names the scanner never descends into.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

pub fn env_path(root: &Path) -> PathBuf {
    root.join(ENV_FILE)
}

pub fn has_manifest(root: &Path) -> bool {
    manifest_path(root).is_file()
}

/// Projects with a `tsconfig.json` get `.ts` test files.
pub fn test_extension(root: &Path) -> &'static str {
    if root.join(TSCONFIG_FILE).is_file() {
        "ts"
    } else {
        "js"
    }
}

// ---------------------------------------------------------------------------
// Test name slugs
// ---------------------------------------------------------------------------

static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();

/// Whitespace plus anything a filesystem treats as a path separator or
/// rejects in a file name.
fn separator_re() -> &'static Regex {
    SEPARATOR_RE.get_or_init(|| Regex::new(r#"[\s/\\:*?"<>|]+"#).unwrap())
}

/// Lower-case the name and hyphenate its whitespace: `"My Login Flow"` → `my-login-flow`.
///
/// The slug is always a single file-name component: separators become
/// hyphens and leading or trailing dots are dropped, so `../x` cannot
/// escape the category directory.
pub fn test_slug(name: &str) -> Result<String> {
    let invalid = || ForgeError::InvalidTestName(name.to_string());
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let hyphenated = separator_re().replace_all(&trimmed.to_lowercase(), "-").into_owned();
    let slug = hyphenated.trim_matches(|c: char| c == '-' || c == '.');
    if slug.is_empty() {
        return Err(invalid());
    }
    Ok(slug.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
