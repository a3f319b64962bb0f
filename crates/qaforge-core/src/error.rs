use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("not a recognizable project: no package.json found in {}", .0.display())]
    NotAProject(PathBuf),

    #[error("no recognizable test structure found: expected @playwright/test, cypress or selenium-webdriver")]
    NoTestStructure,

    #[error("unknown framework '{0}': expected playwright, cypress or selenium")]
    UnknownFramework(String),

    #[error("unknown project type '{0}': expected e2e, api or full")]
    UnknownProjectType(String),

    #[error("unknown browser '{0}': expected chrome, firefox or safari")]
    UnknownBrowser(String),

    #[error("unknown environment '{0}': expected local, staging or production")]
    UnknownEnv(String),

    #[error("invalid test name '{0}': must contain at least one non-whitespace character")]
    InvalidTestName(String),

    #[error("'{program}' exited with code {code}")]
    CommandFailed { program: String, code: i32 },

    #[error("failed to start '{program}': {reason}")]
    CommandSpawn { program: String, reason: String },

    #[error("npm/npx not found on PATH: install Node.js first")]
    NoPackageManager,

    #[error("test run failed")]
    TestRunFailed,

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
