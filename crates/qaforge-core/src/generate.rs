use crate::error::Result;
use crate::io;
use crate::paths;
use crate::select::Selection;
use crate::template;
use crate::types::{Category, Framework};
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a generated test file ends up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    pub path: PathBuf,
    /// True when `<slug>.spec.<ext>` was taken and a timestamped name was used.
    pub renamed: bool,
}

/// Directory for tests of `category`, optionally nested one level under a
/// feature. The feature name is slugged like a test name.
pub fn target_dir(root: &Path, category: Category, feature: Option<&str>) -> PathBuf {
    let dir = root.join(category.output_dir());
    match feature.map(paths::test_slug) {
        Some(Ok(f)) => dir.join(f),
        _ => dir,
    }
}

/// `<slug>.spec.<ext>` if free, else `<slug>-<millis>.spec.<ext>` with the
/// timestamp bumped until nothing exists at that path.
pub fn free_path(dir: &Path, slug: &str, ext: &str, now_millis: i64) -> (PathBuf, bool) {
    let primary = dir.join(format!("{slug}.spec.{ext}"));
    if !primary.exists() {
        return (primary, false);
    }
    let mut stamp = now_millis;
    loop {
        let candidate = dir.join(format!("{slug}-{stamp}.spec.{ext}"));
        if !candidate.exists() {
            return (candidate, true);
        }
        stamp += 1;
    }
}

/// Render the `framework` template for `category` and write it under
/// `root` without ever overwriting an existing test file.
pub fn generate(
    root: &Path,
    framework: Framework,
    category: Category,
    name: &str,
    feature: Option<&str>,
    selection: Option<&Selection>,
) -> Result<Generated> {
    let slug = paths::test_slug(name)?;
    let ext = paths::test_extension(root);
    let dir = target_dir(root, category, feature);
    io::ensure_dir(&dir)?;

    let (path, renamed) = free_path(&dir, &slug, ext, Utc::now().timestamp_millis());
    if renamed {
        tracing::info!(path = %path.display(), "test file exists, using timestamped name");
    }

    let source = template::render(framework, category, name.trim(), selection);
    io::atomic_write(&path, source.as_bytes())?;
    Ok(Generated { path, renamed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::Endpoint;
    use crate::types::HttpMethod;
    use tempfile::TempDir;

    fn ts_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        dir
    }

    fn login_flow(dir: &TempDir) -> Generated {
        generate(dir.path(), Framework::Playwright, Category::Ui, "My Login Flow", None, None)
            .unwrap()
    }

    #[test]
    fn first_generation_uses_plain_slug() {
        let dir = ts_project();
        let out = login_flow(&dir);
        assert_eq!(out.path, dir.path().join("src/e2e/my-login-flow.spec.ts"));
        assert!(!out.renamed);
    }

    #[test]
    fn second_generation_never_overwrites() {
        let dir = ts_project();
        let first = login_flow(&dir);
        std::fs::write(&first.path, "// edited by hand").unwrap();

        let second = login_flow(&dir);
        assert!(second.renamed);
        let name = second.path.file_name().unwrap().to_string_lossy().into_owned();
        let stamp = name
            .strip_prefix("my-login-flow-")
            .and_then(|s| s.strip_suffix(".spec.ts"))
            .unwrap();
        assert!(stamp.parse::<i64>().is_ok(), "{name}");
        assert_eq!(
            std::fs::read_to_string(&first.path).unwrap(),
            "// edited by hand"
        );
    }

    #[test]
    fn names_with_separators_stay_in_the_category_dir() {
        let dir = TempDir::new().unwrap();
        let out = generate(
            dir.path(),
            Framework::Playwright,
            Category::Api,
            "../../outside/Users",
            None,
            None,
        )
        .unwrap();
        assert_eq!(out.path, dir.path().join("src/api/outside-users.spec.js"));
        assert!(!dir.path().join("outside").exists());

        let nested = target_dir(dir.path(), Category::Ui, Some("../Billing"));
        assert_eq!(nested, dir.path().join("src/e2e/billing"));
        assert_eq!(target_dir(dir.path(), Category::Ui, Some(" ")), dir.path().join("src/e2e"));
    }

    #[test]
    fn free_path_bumps_past_taken_timestamps() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.spec.js"), "").unwrap();
        std::fs::write(dir.path().join("a-100.spec.js"), "").unwrap();
        let (path, renamed) = free_path(dir.path(), "a", "js", 100);
        assert!(renamed);
        assert_eq!(path, dir.path().join("a-101.spec.js"));
    }

    #[test]
    fn feature_nests_and_js_without_tsconfig() {
        let dir = TempDir::new().unwrap();
        let out = generate(
            dir.path(),
            Framework::Playwright,
            Category::Api,
            "List Users",
            Some("users"),
            None,
        )
        .unwrap();
        assert_eq!(out.path, dir.path().join("src/api/users/list-users.spec.js"));
    }

    #[test]
    fn selected_post_endpoint_expects_201() {
        let dir = ts_project();
        let selection = Selection::Endpoint(Endpoint {
            method: HttpMethod::Post,
            path: "/users".into(),
            source_file: Some("server.js".into()),
        });
        let out = generate(
            dir.path(),
            Framework::Playwright,
            Category::Api,
            "Create User",
            None,
            Some(&selection),
        )
        .unwrap();
        let body = std::fs::read_to_string(out.path).unwrap();
        assert!(body.contains("expect(response.status).toBe(201);"));
        assert!(body.contains("const payload = {"));
    }

    #[test]
    fn cypress_projects_get_cypress_specs() {
        let dir = TempDir::new().unwrap();
        let out =
            generate(dir.path(), Framework::Cypress, Category::Ui, "Home", None, None).unwrap();
        let body = std::fs::read_to_string(out.path).unwrap();
        assert!(body.contains("cy.visit(BASE_URL);"));
        assert!(!body.contains("@playwright/test"));
    }
}
