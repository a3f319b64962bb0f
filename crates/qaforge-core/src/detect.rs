use crate::error::{ForgeError, Result};
use crate::paths;
use crate::types::Framework;
use std::path::Path;

const CONFIG_MARKERS: &[(&str, Framework)] = &[
    ("playwright.config.ts", Framework::Playwright),
    ("playwright.config.js", Framework::Playwright),
    ("cypress.config.ts", Framework::Cypress),
    ("cypress.config.js", Framework::Cypress),
    ("cypress.json", Framework::Cypress),
    (".mocharc.json", Framework::Selenium),
];

fn read_manifest(root: &Path) -> Result<serde_json::Value> {
    let path = paths::manifest_path(root);
    if !path.is_file() {
        return Err(ForgeError::NotAProject(root.to_path_buf()));
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text)?)
}

fn declares(manifest: &serde_json::Value, package: &str) -> bool {
    ["dependencies", "devDependencies"]
        .iter()
        .any(|section| manifest.get(section).and_then(|s| s.get(package)).is_some())
}

/// Test framework used by the project at `root`.
///
/// Declared dependencies win; config files are the fallback.
pub fn detect_framework(root: &Path) -> Result<Framework> {
    let manifest = read_manifest(root)?;
    for framework in [Framework::Playwright, Framework::Cypress, Framework::Selenium] {
        if declares(&manifest, framework.marker_package()) {
            return Ok(framework);
        }
    }
    CONFIG_MARKERS
        .iter()
        .find(|(file, _)| root.join(file).is_file())
        .map(|(_, framework)| *framework)
        .ok_or(ForgeError::NoTestStructure)
}

/// `name` from `package.json`, falling back to the directory name.
pub fn project_name(root: &Path) -> String {
    read_manifest(root)
        .ok()
        .and_then(|m| m.get("name").and_then(|n| n.as_str()).map(str::to_string))
        .filter(|n| !n.is_empty())
        .or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_manifest(json: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), json).unwrap();
        dir
    }

    #[test]
    fn detects_from_dev_dependencies() {
        let dir = with_manifest(r#"{"devDependencies":{"cypress":"^13.0.0"}}"#);
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::Cypress);
    }

    #[test]
    fn detects_from_dependencies() {
        let dir = with_manifest(r#"{"dependencies":{"selenium-webdriver":"4"}}"#);
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::Selenium);
    }

    #[test]
    fn falls_back_to_config_files() {
        let dir = with_manifest(r#"{"name":"x"}"#);
        std::fs::write(dir.path().join("playwright.config.ts"), "").unwrap();
        assert_eq!(detect_framework(dir.path()).unwrap(), Framework::Playwright);
    }

    #[test]
    fn nothing_recognisable() {
        let dir = with_manifest(r#"{"name":"x","dependencies":{"react":"18"}}"#);
        assert!(matches!(
            detect_framework(dir.path()),
            Err(ForgeError::NoTestStructure)
        ));
        let empty = TempDir::new().unwrap();
        assert!(matches!(
            detect_framework(empty.path()),
            Err(ForgeError::NotAProject(_))
        ));
    }

    #[test]
    fn project_name_prefers_manifest() {
        let dir = with_manifest(r#"{"name":"shop-tests"}"#);
        assert_eq!(project_name(dir.path()), "shop-tests");
        let bare = with_manifest("{}");
        assert_eq!(
            project_name(bare.path()),
            bare.path().file_name().unwrap().to_string_lossy()
        );
    }
}
