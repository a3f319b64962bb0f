use crate::types::{Framework, ProjectType};
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// Optional capabilities picked from the feature checklist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Features {
    pub websocket: bool,
    pub performance: bool,
    pub visual: bool,
}

impl Features {
    pub const CHECKLIST: &'static [&'static str] =
        &["WebSocket testing", "Performance testing", "Visual regression"];

    /// Build from checklist indices as returned by a multi-select prompt.
    pub fn from_checklist(selected: &[usize]) -> Self {
        Self {
            websocket: selected.contains(&0),
            performance: selected.contains(&1),
            visual: selected.contains(&2),
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub user_email: Option<String>,
    pub user_password: Option<String>,
}

// ---------------------------------------------------------------------------
// ConfigBag
// ---------------------------------------------------------------------------

/// Everything collected for one invocation. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigBag {
    project_name: String,
    base_url: String,
    api_url: String,
    credentials: Credentials,
    framework: Framework,
    project_type: ProjectType,
    typescript: bool,
    features: Features,
}

impl ConfigBag {
    pub fn builder(project_name: impl Into<String>) -> ConfigBagBuilder {
        ConfigBagBuilder {
            bag: ConfigBag {
                project_name: project_name.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
                api_url: DEFAULT_API_URL.to_string(),
                credentials: Credentials::default(),
                framework: Framework::Playwright,
                project_type: ProjectType::Full,
                typescript: true,
                features: Features::default(),
            },
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn admin_email(&self) -> &str {
        self.credentials.admin_email.as_deref().unwrap_or("")
    }

    pub fn admin_password(&self) -> &str {
        self.credentials.admin_password.as_deref().unwrap_or("")
    }

    pub fn user_email(&self) -> &str {
        self.credentials.user_email.as_deref().unwrap_or("")
    }

    pub fn user_password(&self) -> &str {
        self.credentials.user_password.as_deref().unwrap_or("")
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn typescript(&self) -> bool {
        self.typescript
    }

    pub fn features(&self) -> Features {
        self.features
    }

    /// Source extension for generated files.
    pub fn extension(&self) -> &'static str {
        if self.typescript {
            "ts"
        } else {
            "js"
        }
    }
}

pub struct ConfigBagBuilder {
    bag: ConfigBag,
}

impl ConfigBagBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.bag.base_url = url.into();
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.bag.api_url = url.into();
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.bag.credentials = credentials;
        self
    }

    pub fn framework(mut self, framework: Framework) -> Self {
        self.bag.framework = framework;
        self
    }

    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.bag.project_type = project_type;
        self
    }

    pub fn typescript(mut self, typescript: bool) -> Self {
        self.bag.typescript = typescript;
        self
    }

    pub fn features(mut self, features: Features) -> Self {
        self.bag.features = features;
        self
    }

    pub fn build(self) -> ConfigBag {
        self.bag
    }
}
