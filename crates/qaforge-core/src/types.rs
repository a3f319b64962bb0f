use crate::error::ForgeError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The closed set of test kinds the template selector dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Api,
    Ui,
    WebSocket,
    Performance,
    Visual,
    Generic,
}

impl Category {
    /// Aliases collapse onto one variant; anything unrecognised is `Generic`.
    pub fn parse(s: &str) -> Category {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Category::Api,
            "e2e" | "ui" => Category::Ui,
            "websocket" | "ws" => Category::WebSocket,
            "performance" | "perf" => Category::Performance,
            "visual" => Category::Visual,
            _ => Category::Generic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Api => "api",
            Category::Ui => "e2e",
            Category::WebSocket => "websocket",
            Category::Performance => "performance",
            Category::Visual => "visual",
            Category::Generic => "generic",
        }
    }

    /// Project-relative directory generated tests of this category land in.
    pub fn output_dir(self) -> &'static str {
        match self {
            Category::Api => paths::API_DIR,
            Category::Ui | Category::Generic => paths::E2E_DIR,
            Category::WebSocket => paths::WEBSOCKET_DIR,
            Category::Performance => paths::PERFORMANCE_DIR,
            Category::Visual => paths::VISUAL_DIR,
        }
    }

    /// Only these categories have something to scan for.
    pub fn is_scannable(self) -> bool {
        matches!(self, Category::Api | Category::Ui | Category::WebSocket)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Patch,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Lower-case name as used by JS HTTP clients (`request.get`, `axios.post`).
    pub fn client_fn(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
        }
    }

    pub fn success_status(self) -> u16 {
        match self {
            HttpMethod::Post => 201,
            HttpMethod::Get | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete => 200,
        }
    }

    pub fn has_payload(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            "put" => Ok(HttpMethod::Put),
            "delete" => Ok(HttpMethod::Delete),
            "patch" => Ok(HttpMethod::Patch),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Framework
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Playwright,
    Cypress,
    Selenium,
}

impl Framework {
    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Playwright => "playwright",
            Framework::Cypress => "cypress",
            Framework::Selenium => "selenium",
        }
    }

    /// The npm package whose presence marks a project as using this framework.
    pub fn marker_package(self) -> &'static str {
        match self {
            Framework::Playwright => "@playwright/test",
            Framework::Cypress => "cypress",
            Framework::Selenium => "selenium-webdriver",
        }
    }

    /// Dev dependencies installed into a freshly scaffolded project.
    pub fn dev_packages(self) -> &'static [&'static str] {
        match self {
            Framework::Playwright => &["@playwright/test"],
            Framework::Cypress => &["cypress"],
            Framework::Selenium => &["selenium-webdriver", "mocha", "chai"],
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Framework {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "playwright" => Ok(Framework::Playwright),
            "cypress" => Ok(Framework::Cypress),
            "selenium" => Ok(Framework::Selenium),
            _ => Err(ForgeError::UnknownFramework(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    E2e,
    Api,
    Full,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::E2e => "e2e",
            ProjectType::Api => "api",
            ProjectType::Full => "full",
        }
    }

    pub fn includes_ui(self) -> bool {
        matches!(self, ProjectType::E2e | ProjectType::Full)
    }

    pub fn includes_api(self) -> bool {
        matches!(self, ProjectType::Api | ProjectType::Full)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "e2e" => Ok(ProjectType::E2e),
            "api" => Ok(ProjectType::Api),
            "full" => Ok(ProjectType::Full),
            _ => Err(ForgeError::UnknownProjectType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Browser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
}

impl Browser {
    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Safari => "safari",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Browser {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "firefox" => Ok(Browser::Firefox),
            "safari" => Ok(Browser::Safari),
            _ => Err(ForgeError::UnknownBrowser(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TestEnv
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestEnv {
    #[default]
    Local,
    Staging,
    Production,
}

impl TestEnv {
    pub fn as_str(self) -> &'static str {
        match self {
            TestEnv::Local => "local",
            TestEnv::Staging => "staging",
            TestEnv::Production => "production",
        }
    }
}

impl fmt::Display for TestEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TestEnv {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(TestEnv::Local),
            "staging" => Ok(TestEnv::Staging),
            "production" => Ok(TestEnv::Production),
            _ => Err(ForgeError::UnknownEnv(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
