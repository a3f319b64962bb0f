//! String templates for generated test files.
//!
//! Every template is a pure function of its inputs; nothing here touches the
//! filesystem. Each framework gets its own runner dialect: Playwright test
//! files, Cypress specs, or mocha suites driving selenium-webdriver. Output is
//! valid as both JavaScript and TypeScript.

pub mod api;
pub mod fixed;
pub mod ui;
pub mod websocket;

use crate::config::{DEFAULT_API_URL, DEFAULT_BASE_URL};
use crate::select::Selection;
use crate::types::{Category, Framework};

/// Source text for one runnable test file.
///
/// A selection that does not fit the category (an endpoint for a UI test,
/// say) is ignored and the category's generic template is used.
pub fn render(
    framework: Framework,
    category: Category,
    name: &str,
    selection: Option<&Selection>,
) -> String {
    match category {
        Category::Api => match selection {
            Some(Selection::Endpoint(endpoint)) => api::endpoint(framework, name, endpoint),
            _ => api::generic(framework, name),
        },
        Category::Ui => match selection {
            Some(Selection::Ui(target)) => ui::render(framework, name, target.kind()),
            _ => ui::generic(framework, name),
        },
        Category::WebSocket => match selection {
            Some(Selection::Socket { url }) => websocket::render(framework, name, url),
            _ => websocket::render(framework, name, websocket::DEFAULT_URL),
        },
        Category::Performance => fixed::performance(framework, name),
        Category::Visual => fixed::visual(framework, name),
        Category::Generic => fixed::generic(framework, name),
    }
}

// ---------------------------------------------------------------------------
// Suite
// ---------------------------------------------------------------------------

/// Node modules a suite imports besides the runner's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Module {
    Axios,
    Ws,
    Fs,
}

impl Module {
    fn binding(self) -> &'static str {
        match self {
            Module::Axios => "axios",
            Module::Ws => "WebSocket",
            Module::Fs => "fs",
        }
    }

    fn package(self) -> &'static str {
        match self {
            Module::Axios => "axios",
            Module::Ws => "ws",
            Module::Fs => "fs",
        }
    }
}

/// One `describe` block in the dialect of `framework`.
///
/// Case and hook bodies are written by the caller, indented four spaces.
pub(crate) struct Suite<'a> {
    framework: Framework,
    name: &'a str,
    modules: Vec<Module>,
    prelude: String,
    browser: bool,
    before_each: Option<String>,
    cases: Vec<(String, String)>,
}

impl<'a> Suite<'a> {
    pub(crate) fn new(framework: Framework, name: &'a str) -> Self {
        Self {
            framework,
            name,
            modules: Vec::new(),
            prelude: String::new(),
            browser: false,
            before_each: None,
            cases: Vec::new(),
        }
    }

    pub(crate) fn uses(mut self, module: Module) -> Self {
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
        self
    }

    /// Top-level declarations between the imports and the suite.
    pub(crate) fn prelude(mut self, text: impl AsRef<str>) -> Self {
        self.prelude.push_str(text.as_ref());
        self
    }

    /// Cases drive a browser: Playwright's `page` fixture, a WebDriver session.
    pub(crate) fn browser(mut self) -> Self {
        self.browser = true;
        self
    }

    pub(crate) fn before_each(mut self, body: impl Into<String>) -> Self {
        self.before_each = Some(body.into());
        self
    }

    pub(crate) fn case(mut self, title: &str, body: impl Into<String>) -> Self {
        self.cases.push((title.to_string(), body.into()));
        self
    }

    pub(crate) fn render(self) -> String {
        let mut out = self.imports();
        out.push('\n');
        if !self.prelude.is_empty() {
            out.push_str(&self.prelude);
            out.push('\n');
        }

        let name = js_str(self.name);
        out.push_str(&match self.framework {
            Framework::Playwright => format!("test.describe('{name}', () => {{\n"),
            Framework::Cypress => format!("describe('{name}', () => {{\n"),
            Framework::Selenium => format!("describe('{name}', function () {{\n"),
        });

        let mut blocks: Vec<String> = Vec::new();
        if self.framework == Framework::Selenium && self.browser {
            blocks.push(WEBDRIVER_HOOKS.to_string());
        }
        if let Some(body) = &self.before_each {
            let open = match self.framework {
                Framework::Playwright if self.browser => "test.beforeEach(async ({ page }) => {",
                Framework::Playwright => "test.beforeEach(async () => {",
                Framework::Cypress => "beforeEach(() => {",
                Framework::Selenium => "beforeEach(async function () {",
            };
            blocks.push(format!("  {open}\n{body}  }});\n"));
        }
        for (title, body) in &self.cases {
            let title = js_str(title);
            let open = match self.framework {
                Framework::Playwright if self.browser => {
                    format!("test('{title}', async ({{ page }}) => {{")
                }
                Framework::Playwright => format!("test('{title}', async () => {{"),
                Framework::Cypress => format!("it('{title}', () => {{"),
                Framework::Selenium => format!("it('{title}', async function () {{"),
            };
            blocks.push(format!("  {open}\n{body}  }});\n"));
        }
        out.push_str(&blocks.join("\n"));
        out.push_str("});\n");
        out
    }

    fn imports(&self) -> String {
        let mut out = String::new();
        match self.framework {
            Framework::Playwright => {
                out.push_str("import { test, expect } from '@playwright/test';\n");
                for m in &self.modules {
                    out.push_str(&format!("import {} from '{}';\n", m.binding(), m.package()));
                }
            }
            Framework::Cypress => {
                out.push_str("/// <reference types=\"cypress\" />\n");
                for m in &self.modules {
                    out.push_str(&format!("import {} from '{}';\n", m.binding(), m.package()));
                }
            }
            Framework::Selenium => {
                out.push_str("const { expect } = require('chai');\n");
                if self.browser {
                    out.push_str("const { Builder, By, until } = require('selenium-webdriver');\n");
                }
                for m in &self.modules {
                    out.push_str(&format!("const {} = require('{}');\n", m.binding(), m.package()));
                }
            }
        }
        out
    }
}

const WEBDRIVER_HOOKS: &str = "  let driver;

  before(async function () {
    driver = await new Builder().forBrowser(process.env.BROWSER || 'chrome').build();
  });

  after(async function () {
    if (driver) {
      await driver.quit();
    }
  });
";

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

// Playwright ships a jest-style `expect`; Cypress and mocha use chai.

pub(crate) fn expect_eq(framework: Framework, actual: &str, expected: &str) -> String {
    match framework {
        Framework::Playwright => format!("expect({actual}).toBe({expected});"),
        Framework::Cypress | Framework::Selenium => format!("expect({actual}).to.equal({expected});"),
    }
}

pub(crate) fn expect_at_least(framework: Framework, actual: &str, bound: &str) -> String {
    match framework {
        Framework::Playwright => format!("expect({actual}).toBeGreaterThanOrEqual({bound});"),
        Framework::Cypress | Framework::Selenium => format!("expect({actual}).to.be.at.least({bound});"),
    }
}

pub(crate) fn expect_below(framework: Framework, actual: &str, bound: &str) -> String {
    match framework {
        Framework::Playwright => format!("expect({actual}).toBeLessThan({bound});"),
        Framework::Cypress | Framework::Selenium => format!("expect({actual}).to.be.below({bound});"),
    }
}

pub(crate) fn expect_ok(framework: Framework, actual: &str) -> String {
    match framework {
        Framework::Playwright => format!("expect({actual}).toBeTruthy();"),
        Framework::Cypress | Framework::Selenium => format!("expect({actual}).to.be.ok;"),
    }
}

pub(crate) fn expect_defined(framework: Framework, actual: &str) -> String {
    match framework {
        Framework::Playwright => format!("expect({actual}).toBeDefined();"),
        Framework::Cypress | Framework::Selenium => format!("expect({actual}).to.exist;"),
    }
}

/// One statement at case-body indentation.
pub(crate) fn line(statement: &str) -> String {
    format!("    {statement}\n")
}

// ---------------------------------------------------------------------------
// Shared fragments
// ---------------------------------------------------------------------------

/// Cypress specs run in the browser, so they read Cypress config, not `process.env`.
fn base_url_const(framework: Framework) -> String {
    match framework {
        Framework::Cypress => {
            format!("const BASE_URL = Cypress.config('baseUrl') || '{DEFAULT_BASE_URL}';\n")
        }
        Framework::Playwright | Framework::Selenium => {
            format!("const BASE_URL = process.env.BASE_URL || '{DEFAULT_BASE_URL}';\n")
        }
    }
}

fn api_url_const(framework: Framework) -> String {
    match framework {
        Framework::Cypress => {
            format!("const API_URL = Cypress.env('apiUrl') || '{DEFAULT_API_URL}';\n")
        }
        Framework::Playwright | Framework::Selenium => {
            format!("const API_URL = process.env.API_URL || '{DEFAULT_API_URL}';\n")
        }
    }
}

/// Escape for a single-quoted JS string literal.
pub(crate) fn js_str(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// `UserCard` → `user-card`, `My Page` → `my-page`.
pub(crate) fn kebab(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase() && prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Replace `:param` segments with a sample value so the path can be requested.
pub(crate) fn concrete_path(path: &str) -> String {
    path.split('/')
        .map(|seg| if seg.starts_with(':') { "1" } else { seg })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
pub(crate) const ALL_FRAMEWORKS: [Framework; 3] =
    [Framework::Playwright, Framework::Cypress, Framework::Selenium];
