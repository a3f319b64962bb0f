use qaforge_core::paths;
use std::path::{Path, PathBuf};

/// Directory new projects are created in: `--root` / `QAFORGE_ROOT`, else cwd.
pub fn working_dir(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Resolve the test project root.
///
/// Priority:
/// 1. `--root` flag / `QAFORGE_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `package.json`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = working_dir(None);
    find_project_root(&cwd).unwrap_or(cwd)
}

fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| paths::has_manifest(dir))
        .map(Path::to_path_buf)
}
