//! Project scaffolding.
//!
//! Lays out the directory skeleton, then either copies a framework template
//! directory through placeholder substitution or synthesises a minimal
//! default file set, writes `.env`, and finally runs the package installs.
//! Nothing is rolled back if a later step fails.

use crate::config::{ConfigBag, Features};
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::runner::{self, CommandRunner};
use crate::substitute;
use crate::template;
use crate::types::{Category, Framework};
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Options / outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MaterializeOptions {
    /// Directory holding one template directory per framework.
    pub templates_root: Option<PathBuf>,
    /// Run npm/npx install steps.
    pub install: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Created,
    Exists,
    Copied,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Materialized {
    pub dirs: Vec<String>,
    pub files: Vec<FileOutcome>,
    pub from_template: Option<PathBuf>,
}

impl Materialized {
    fn record(&mut self, path: &str, status: FileStatus) {
        self.files.push(FileOutcome {
            path: path.to_string(),
            status,
        });
    }
}

// ---------------------------------------------------------------------------
// Skeleton
// ---------------------------------------------------------------------------

/// Base directories plus the ones switched on by `features`.
pub fn skeleton_dirs(features: Features) -> Vec<&'static str> {
    let mut dirs = paths::BASE_DIRS.to_vec();
    if features.websocket {
        dirs.push(paths::WEBSOCKET_DIR);
    }
    if features.performance {
        dirs.push(paths::PERFORMANCE_DIR);
    }
    if features.visual {
        dirs.push(paths::VISUAL_DIR);
    }
    dirs
}

/// Framework template directory under `templates_root`, if one exists.
pub fn template_dir(templates_root: Option<&Path>, framework: Framework) -> Option<PathBuf> {
    let dir = templates_root?.join(framework.as_str());
    dir.is_dir().then_some(dir)
}

// ---------------------------------------------------------------------------
// materialize
// ---------------------------------------------------------------------------

pub fn materialize(
    project_dir: &Path,
    bag: &ConfigBag,
    opts: &MaterializeOptions,
    runner: &dyn CommandRunner,
) -> Result<Materialized> {
    let mut out = Materialized::default();
    io::ensure_dir(project_dir)?;

    for dir in skeleton_dirs(bag.features()) {
        io::ensure_dir(&project_dir.join(dir))?;
        out.dirs.push(dir.to_string());
    }

    match template_dir(opts.templates_root.as_deref(), bag.framework()) {
        Some(src) => {
            tracing::info!(template = %src.display(), "copying template directory");
            for file in substitute::copy_tree(&src, project_dir, bag)? {
                out.record(&file, FileStatus::Copied);
            }
            out.from_template = Some(src);
        }
        None => write_defaults(project_dir, bag, &mut out)?,
    }

    let env = substitute::substitute(ENV_TEMPLATE, bag);
    let env_existed = paths::env_path(project_dir).exists();
    io::atomic_write(&paths::env_path(project_dir), env.as_bytes())?;
    io::ensure_gitignore_entry(project_dir, paths::ENV_FILE)?;
    out.record(
        paths::ENV_FILE,
        if env_existed {
            FileStatus::Updated
        } else {
            FileStatus::Created
        },
    );

    if opts.install {
        install(project_dir, bag, runner)?;
    }
    Ok(out)
}

fn install(project_dir: &Path, bag: &ConfigBag, runner: &dyn CommandRunner) -> Result<()> {
    runner::require_package_manager()?;
    if !paths::has_manifest(project_dir) {
        runner::run_checked(runner, &runner::npm_init(), project_dir)?;
    }
    for cmd in runner::install_commands(bag) {
        runner::run_checked(runner, &cmd, project_dir)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Default file set
// ---------------------------------------------------------------------------

/// Project-relative path → contents for the synthesised default files.
pub fn default_files(bag: &ConfigBag) -> Result<Vec<(String, String)>> {
    let ext = bag.extension();
    let mut files: Vec<(String, String)> = vec![
        (paths::MANIFEST_FILE.to_string(), package_json(bag)),
        (".gitignore".to_string(), GITIGNORE.to_string()),
        ("README.md".to_string(), substitute::substitute(README, bag)),
        (
            paths::ENV_EXAMPLE_FILE.to_string(),
            substitute::substitute(ENV_EXAMPLE, bag),
        ),
        (
            format!("{}/environment.{ext}", paths::CONFIG_DIR),
            substitute::substitute(ENVIRONMENT_MODULE, bag),
        ),
        (
            format!("{}/api-client.{ext}", paths::UTILS_DIR),
            API_CLIENT_MODULE.to_string(),
        ),
    ];

    let (config_name, config_body) = framework_config(bag);
    files.push((config_name, substitute::substitute(&config_body, bag)));

    if bag.typescript() {
        files.push((paths::TSCONFIG_FILE.to_string(), TSCONFIG.to_string()));
    }

    for (category, name) in sample_tests(bag) {
        let slug = paths::test_slug(name)?;
        files.push((
            format!("{}/{slug}.spec.{ext}", category.output_dir()),
            template::render(bag.framework(), category, name, None),
        ));
    }
    Ok(files)
}

/// One starter test per enabled area.
fn sample_tests(bag: &ConfigBag) -> Vec<(Category, &'static str)> {
    let mut tests = Vec::new();
    let project_type = bag.project_type();
    let features = bag.features();
    if project_type.includes_ui() {
        tests.push((Category::Ui, "Home Page"));
    }
    if project_type.includes_api() {
        tests.push((Category::Api, "Items API"));
    }
    if features.websocket {
        tests.push((Category::WebSocket, "WebSocket Connection"));
    }
    if features.performance {
        tests.push((Category::Performance, "Page Load Performance"));
    }
    if features.visual {
        tests.push((Category::Visual, "Visual Regression"));
    }
    tests
}

fn write_defaults(project_dir: &Path, bag: &ConfigBag, out: &mut Materialized) -> Result<()> {
    for (rel, content) in default_files(bag)? {
        let created = io::write_if_missing(&project_dir.join(&rel), content.as_bytes())?;
        out.record(
            &rel,
            if created {
                FileStatus::Created
            } else {
                FileStatus::Exists
            },
        );
    }
    Ok(())
}

fn package_json(bag: &ConfigBag) -> String {
    let (test, headed) = match bag.framework() {
        Framework::Playwright => ("playwright test", "playwright test --headed"),
        Framework::Cypress => ("cypress run", "cypress open"),
        Framework::Selenium => ("mocha", "mocha --watch"),
    };
    let report = match bag.framework() {
        Framework::Playwright => "playwright show-report",
        Framework::Cypress | Framework::Selenium => "open reports/index.html",
    };
    let manifest = serde_json::json!({
        "name": bag.project_name(),
        "version": "1.0.0",
        "private": true,
        "description": format!("{} test automation", bag.framework()),
        "scripts": {
            "test": test,
            "test:headed": headed,
            "report": report,
        },
    });
    let mut text = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    text.push('\n');
    text
}

fn framework_config(bag: &ConfigBag) -> (String, String) {
    let ext = bag.extension();
    match bag.framework() {
        Framework::Playwright => (format!("playwright.config.{ext}"), PLAYWRIGHT_CONFIG.to_string()),
        Framework::Cypress => (format!("cypress.config.{ext}"), CYPRESS_CONFIG.to_string()),
        Framework::Selenium => {
            let require = if bag.typescript() {
                r#"["dotenv/config", "ts-node/register"]"#
            } else {
                r#"["dotenv/config"]"#
            };
            (
                ".mocharc.json".to_string(),
                MOCHARC.replace("\"__REQUIRE__\"", require),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Default file contents
// ---------------------------------------------------------------------------

const ENV_TEMPLATE: &str = "TEST_ENV=local
ADMIN_EMAIL={{ADMIN_EMAIL}}
ADMIN_PASSWORD={{ADMIN_PASSWORD}}
USER_EMAIL={{USER_EMAIL}}
USER_PASSWORD={{USER_PASSWORD}}
BASE_URL={{BASE_URL}}
API_URL={{API_URL}}
";

const ENV_EXAMPLE: &str = "TEST_ENV=local
ADMIN_EMAIL=
ADMIN_PASSWORD=
USER_EMAIL=
USER_PASSWORD=
BASE_URL={{BASE_URL}}
API_URL={{API_URL}}
";

const GITIGNORE: &str = "node_modules/
reports/
test-results/
playwright-report/
.env
";

const README: &str = r#"# {{PROJECT_NAME}}

Automated tests for {{BASE_URL}}.

## Setup

```sh
npm install
cp .env.example .env   # then fill in credentials
```

## Running

```sh
qaforge run                 # all tests
qaforge test --auth         # only tests tagged @auth
qaforge generate api "List users" --analyze --target ../app
```

Tests live under `src/`: `api/`, `e2e/` and, when enabled, `websocket/`,
`performance/` and `visual/`.
"#;

const ENVIRONMENT_MODULE: &str = r#"const environments = {
  local: {
    baseUrl: process.env.BASE_URL || '{{BASE_URL}}',
    apiUrl: process.env.API_URL || '{{API_URL}}',
  },
  staging: {
    baseUrl: process.env.STAGING_BASE_URL || process.env.BASE_URL || '{{BASE_URL}}',
    apiUrl: process.env.STAGING_API_URL || process.env.API_URL || '{{API_URL}}',
  },
  production: {
    baseUrl: process.env.PRODUCTION_BASE_URL || process.env.BASE_URL || '{{BASE_URL}}',
    apiUrl: process.env.PRODUCTION_API_URL || process.env.API_URL || '{{API_URL}}',
  },
};

export const env = process.env.TEST_ENV || 'local';

export const config = {
  ...(environments[env] || environments.local),
  admin: {
    email: process.env.ADMIN_EMAIL || '',
    password: process.env.ADMIN_PASSWORD || '',
  },
  user: {
    email: process.env.USER_EMAIL || '',
    password: process.env.USER_PASSWORD || '',
  },
};
"#;

const API_CLIENT_MODULE: &str = r#"import axios from 'axios';
import { config } from '../config/environment';

export const apiClient = axios.create({
  baseURL: config.apiUrl,
  timeout: 10000,
  headers: { 'Content-Type': 'application/json' },
});

export async function login(email = config.user.email, password = config.user.password) {
  const response = await apiClient.post('/auth/login', { email, password });
  const token = response.data && response.data.token;
  if (token) {
    apiClient.defaults.headers.common.Authorization = `Bearer ${token}`;
  }
  return response;
}
"#;

const PLAYWRIGHT_CONFIG: &str = r#"import { defineConfig, devices } from '@playwright/test';
import 'dotenv/config';

export default defineConfig({
  testDir: './src',
  testMatch: '**/*.spec.{ts,js}',
  timeout: 30000,
  retries: process.env.CI ? 2 : 0,
  reporter: [['list'], ['html', { outputFolder: 'reports', open: 'never' }]],
  use: {
    baseURL: process.env.BASE_URL || '{{BASE_URL}}',
    trace: 'on-first-retry',
    screenshot: 'only-on-failure',
  },
  projects: [
    { name: 'chromium', use: { ...devices['Desktop Chrome'] } },
    { name: 'firefox', use: { ...devices['Desktop Firefox'] } },
    { name: 'webkit', use: { ...devices['Desktop Safari'] } },
  ],
});
"#;

const CYPRESS_CONFIG: &str = r#"const { defineConfig } = require('cypress');
require('dotenv').config();

module.exports = defineConfig({
  reporter: 'spec',
  e2e: {
    baseUrl: process.env.BASE_URL || '{{BASE_URL}}',
    specPattern: 'src/**/*.spec.{js,ts}',
    supportFile: false,
    env: {
      apiUrl: process.env.API_URL || '{{API_URL}}',
    },
  },
});
"#;

const MOCHARC: &str = r#"{
  "spec": "src/**/*.spec.{js,ts}",
  "timeout": 30000,
  "require": "__REQUIRE__"
}
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "commonjs",
    "strict": false,
    "esModuleInterop": true,
    "skipLibCheck": true,
    "resolveJsonModule": true,
    "types": ["node"]
  },
  "include": ["src/**/*", "*.config.ts"]
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::error::ForgeError;
    use crate::runner::ExternalCommand;
    use crate::types::ProjectType;
    use tempfile::TempDir;

    struct NeverRun;

    impl CommandRunner for NeverRun {
        fn run(&self, cmd: &ExternalCommand, _cwd: &Path) -> Result<i32> {
            panic!("unexpected command: {cmd}");
        }
    }

    fn bag() -> ConfigBag {
        ConfigBag::builder("shop-tests")
            .base_url("https://shop.test")
            .api_url("https://shop.test/api")
            .credentials(Credentials {
                admin_email: Some("admin@shop.test".into()),
                admin_password: Some("pw".into()),
                ..Default::default()
            })
            .features(Features {
                websocket: true,
                performance: false,
                visual: true,
            })
            .build()
    }

    #[test]
    fn skeleton_includes_enabled_features_only() {
        let dirs = skeleton_dirs(bag().features());
        assert!(dirs.contains(&"src/websocket"));
        assert!(dirs.contains(&"src/visual"));
        assert!(!dirs.contains(&"src/performance"));
        assert_eq!(&dirs[..5], paths::BASE_DIRS);
    }

    #[test]
    fn synthesises_defaults_without_template_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("shop-tests");
        let out = materialize(&root, &bag(), &MaterializeOptions::default(), &NeverRun).unwrap();

        assert!(out.from_template.is_none());
        for rel in [
            "src/api",
            "src/config",
            "src/e2e",
            "src/utils",
            "src/models",
            "src/websocket",
            "src/visual",
        ] {
            assert!(root.join(rel).is_dir(), "{rel}");
        }
        assert!(!root.join("src/performance").exists());
        assert!(root.join("playwright.config.ts").is_file());
        assert!(root.join("tsconfig.json").is_file());
        assert!(root.join("src/e2e/home-page.spec.ts").is_file());
        assert!(root.join("src/api/items-api.spec.ts").is_file());
        assert!(root.join("src/websocket/websocket-connection.spec.ts").is_file());

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["name"], "shop-tests");
        assert_eq!(manifest["scripts"]["test"], "playwright test");

        let readme = std::fs::read_to_string(root.join("README.md")).unwrap();
        assert!(readme.starts_with("# shop-tests"));
    }

    #[test]
    fn env_file_has_fixed_keys() {
        let dir = TempDir::new().unwrap();
        materialize(dir.path(), &bag(), &MaterializeOptions::default(), &NeverRun).unwrap();
        let env = std::fs::read_to_string(dir.path().join(".env")).unwrap();
        assert_eq!(
            env,
            "TEST_ENV=local\nADMIN_EMAIL=admin@shop.test\nADMIN_PASSWORD=pw\nUSER_EMAIL=\n\
             USER_PASSWORD=\nBASE_URL=https://shop.test\nAPI_URL=https://shop.test/api\n"
        );
        let gitignore = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(gitignore.lines().filter(|l| *l == ".env").count(), 1);
    }

    #[test]
    fn existing_files_are_kept() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name":"mine"}"#).unwrap();
        let out = materialize(dir.path(), &bag(), &MaterializeOptions::default(), &NeverRun).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
            r#"{"name":"mine"}"#
        );
        assert!(out.files.contains(&FileOutcome {
            path: "package.json".into(),
            status: FileStatus::Exists,
        }));
    }

    #[test]
    fn copies_framework_template_with_substitution() {
        let templates = TempDir::new().unwrap();
        let pw = templates.path().join("playwright");
        std::fs::create_dir_all(pw.join("src/config")).unwrap();
        std::fs::write(pw.join("package.json"), r#"{"name":"{{PROJECT_NAME}}"}"#).unwrap();
        std::fs::write(
            pw.join("src/config/urls.ts"),
            "export const a = '{{BASE_URL}}'; export const b = '{{BASE_URL}}';",
        )
        .unwrap();

        let dir = TempDir::new().unwrap();
        let opts = MaterializeOptions {
            templates_root: Some(templates.path().to_path_buf()),
            install: false,
        };
        let out = materialize(dir.path(), &bag(), &opts, &NeverRun).unwrap();

        assert_eq!(out.from_template, Some(pw));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
            r#"{"name":"shop-tests"}"#
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("src/config/urls.ts")).unwrap(),
            "export const a = 'https://shop.test'; export const b = 'https://shop.test';"
        );
        assert!(!dir.path().join("playwright.config.ts").exists());
    }

    #[test]
    fn selenium_javascript_defaults() {
        let bag = ConfigBag::builder("legacy")
            .framework(Framework::Selenium)
            .project_type(ProjectType::Api)
            .typescript(false)
            .build();
        let files = default_files(&bag).unwrap();
        let names: Vec<&str> = files.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&".mocharc.json"));
        assert!(names.contains(&"src/api/items-api.spec.js"));
        assert!(!names.contains(&"tsconfig.json"));
        assert!(!names.iter().any(|n| n.starts_with("src/e2e/")));

        let mocharc = &files.iter().find(|(n, _)| n == ".mocharc.json").unwrap().1;
        let parsed: serde_json::Value = serde_json::from_str(mocharc).unwrap();
        assert_eq!(parsed["require"], serde_json::json!(["dotenv/config"]));

        let sample = &files.iter().find(|(n, _)| n == "src/api/items-api.spec.js").unwrap().1;
        assert!(sample.starts_with("const { expect } = require('chai');"));
        assert!(!sample.contains("@playwright/test"));
    }

    #[test]
    fn cypress_samples_are_cypress_specs() {
        let bag = ConfigBag::builder("cy")
            .framework(Framework::Cypress)
            .project_type(ProjectType::Full)
            .typescript(false)
            .build();
        let files = default_files(&bag).unwrap();
        let samples: Vec<&String> = files
            .iter()
            .filter(|(n, _)| n.ends_with(".spec.js"))
            .map(|(_, body)| body)
            .collect();
        assert_eq!(samples.len(), 2);
        for body in samples {
            assert!(body.contains("cy."), "{body}");
            assert!(!body.contains("@playwright/test"), "{body}");
        }
    }

    #[test]
    fn unknown_framework_name_is_rejected_before_scaffolding() {
        let err = "nightwatch".parse::<Framework>().unwrap_err();
        assert!(matches!(err, ForgeError::UnknownFramework(_)));
    }
}
