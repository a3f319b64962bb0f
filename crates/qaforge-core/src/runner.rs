//! External command construction and invocation.
//!
//! Everything the tool shells out to (npm, npx, test runners, report
//! viewers, editors) is described as an [`ExternalCommand`] and executed
//! through a [`CommandRunner`], so command lines can be asserted on without
//! spawning anything.
//!
//! # Runners per framework
//! - Playwright: `npx playwright test`, browsers map to projects
//!   `chromium`/`firefox`/`webkit`.
//! - Cypress: `npx cypress run`, safari maps to `webkit`.
//! - Selenium: `npx mocha`, the browser is passed as `BROWSER`.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::ConfigBag;
use crate::error::{ForgeError, Result};
use crate::paths;
use crate::types::{Browser, Framework, TestEnv};

// ---------------------------------------------------------------------------
// ExternalCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// `npm`/`npx` resolve to their `.cmd` shims on Windows.
    pub fn node_tool(name: &str) -> Self {
        if cfg!(windows) {
            Self::new(format!("{name}.cmd"))
        } else {
            Self::new(name)
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.envs {
            write!(f, "{k}={v} ")?;
        }
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') || arg.contains('|') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CommandRunner
// ---------------------------------------------------------------------------

pub trait CommandRunner {
    /// Run to completion in `cwd` and return the exit code.
    fn run(&self, cmd: &ExternalCommand, cwd: &Path) -> Result<i32>;
}

/// Spawns real processes with inherited stdio.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ExternalCommand, cwd: &Path) -> Result<i32> {
        tracing::info!(command = %cmd, cwd = %cwd.display(), "running");
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .envs(cmd.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ForgeError::CommandSpawn {
                program: cmd.program.clone(),
                reason: e.to_string(),
            })?;
        // Killed by a signal: no code.
        Ok(status.code().unwrap_or(-1))
    }
}

/// Run `cmd` and turn a non-zero exit into [`ForgeError::CommandFailed`].
pub fn run_checked(runner: &dyn CommandRunner, cmd: &ExternalCommand, cwd: &Path) -> Result<()> {
    let code = runner.run(cmd, cwd)?;
    if code != 0 {
        return Err(ForgeError::CommandFailed {
            program: cmd.program.clone(),
            code,
        });
    }
    Ok(())
}

/// Fail early when Node's package tooling is not on PATH.
pub fn require_package_manager() -> Result<()> {
    if which::which("npm").is_ok() && which::which("npx").is_ok() {
        Ok(())
    } else {
        Err(ForgeError::NoPackageManager)
    }
}

// ---------------------------------------------------------------------------
// Scaffolding commands
// ---------------------------------------------------------------------------

pub fn npm_init() -> ExternalCommand {
    ExternalCommand::node_tool("npm").args(["init", "-y"])
}

/// Dev dependencies for a freshly scaffolded project.
pub fn dev_packages(bag: &ConfigBag) -> Vec<&'static str> {
    let mut pkgs: Vec<&'static str> = bag.framework().dev_packages().to_vec();
    pkgs.extend(["axios", "dotenv"]);
    // Cypress socket tests use the browser's own WebSocket.
    if bag.features().websocket && bag.framework() != Framework::Cypress {
        pkgs.push("ws");
    }
    if bag.typescript() {
        pkgs.extend(["typescript", "ts-node", "@types/node"]);
        if bag.framework() == Framework::Selenium {
            pkgs.extend(["@types/mocha", "@types/chai", "@types/selenium-webdriver"]);
        }
    }
    pkgs
}

/// Package install plus any framework-specific setup step, in order.
pub fn install_commands(bag: &ConfigBag) -> Vec<ExternalCommand> {
    let mut cmds = vec![ExternalCommand::node_tool("npm")
        .args(["install", "--save-dev"])
        .args(dev_packages(bag))];
    if bag.framework() == Framework::Playwright {
        cmds.push(ExternalCommand::node_tool("npx").args(["playwright", "install"]));
    }
    cmds
}

// ---------------------------------------------------------------------------
// Test run commands
// ---------------------------------------------------------------------------

/// Tag switches accepted by `qaforge test`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagFilter {
    pub auth: bool,
    pub posts: bool,
    pub websocket: bool,
    pub redis: bool,
    pub mobile: bool,
}

impl TagFilter {
    pub fn tags(&self) -> Vec<&'static str> {
        [
            (self.auth, "@auth"),
            (self.posts, "@posts"),
            (self.websocket, "@websocket"),
            (self.redis, "@redis"),
            (self.mobile, "@mobile"),
        ]
        .into_iter()
        .filter_map(|(on, tag)| on.then_some(tag))
        .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub pattern: Option<String>,
    pub env: TestEnv,
    pub browser: Option<Browser>,
    pub tags: TagFilter,
}

pub fn test_command(framework: Framework, opts: &RunOptions) -> ExternalCommand {
    let tags = opts.tags.tags();
    let grep = (!tags.is_empty()).then(|| tags.join("|"));

    let cmd = match framework {
        Framework::Playwright => {
            let mut cmd = ExternalCommand::node_tool("npx").args(["playwright", "test"]);
            if let Some(pattern) = &opts.pattern {
                cmd = cmd.arg(pattern);
            }
            if let Some(browser) = opts.browser {
                let project = match browser {
                    Browser::Chrome => "chromium",
                    Browser::Firefox => "firefox",
                    Browser::Safari => "webkit",
                };
                cmd = cmd.arg(format!("--project={project}"));
            }
            if let Some(grep) = grep {
                cmd = cmd.args(["--grep", grep.as_str()]);
            }
            cmd
        }
        Framework::Cypress => {
            let mut cmd = ExternalCommand::node_tool("npx").args(["cypress", "run"]);
            if let Some(pattern) = &opts.pattern {
                cmd = cmd.args(["--spec", pattern.as_str()]);
            }
            if let Some(browser) = opts.browser {
                let name = match browser {
                    Browser::Chrome => "chrome",
                    Browser::Firefox => "firefox",
                    Browser::Safari => "webkit",
                };
                cmd = cmd.args(["--browser", name]);
            }
            if let Some(grep) = grep {
                cmd = cmd
                    .arg("--env")
                    .arg(format!("grepTags={}", grep.replace('|', " ")));
            }
            cmd
        }
        Framework::Selenium => {
            let mut cmd = ExternalCommand::node_tool("npx").arg("mocha");
            cmd = cmd.arg(opts.pattern.as_deref().unwrap_or("src/**/*.spec.*"));
            if let Some(browser) = opts.browser {
                cmd = cmd.env("BROWSER", browser.as_str());
            }
            if let Some(grep) = grep {
                cmd = cmd.args(["--grep", grep.as_str()]);
            }
            cmd
        }
    };
    cmd.env("TEST_ENV", opts.env.as_str())
}

/// Command that serves the HTML report, when the framework has one.
/// Other frameworks write `reports/index.html`, opened directly.
pub fn report_command(framework: Framework) -> Option<ExternalCommand> {
    match framework {
        Framework::Playwright => {
            Some(ExternalCommand::node_tool("npx").args(["playwright", "show-report"]))
        }
        Framework::Cypress | Framework::Selenium => None,
    }
}

pub fn report_file(root: &Path) -> std::path::PathBuf {
    root.join(paths::REPORT_INDEX)
}

pub fn watch_command(framework: Framework) -> ExternalCommand {
    match framework {
        Framework::Playwright => ExternalCommand::node_tool("npx").args(["playwright", "test", "--ui"]),
        Framework::Cypress => ExternalCommand::node_tool("npx").args(["cypress", "open"]),
        Framework::Selenium => ExternalCommand::node_tool("npx").args(["mocha", "--watch"]),
    }
}

/// Editors to try in order: `$EDITOR`, then VS Code. The OS opener is the
/// caller's last resort.
pub fn editor_commands(file: &Path, editor: Option<&str>) -> Vec<ExternalCommand> {
    let file = file.to_string_lossy().into_owned();
    let mut cmds = Vec::new();
    if let Some(editor) = editor.map(str::trim).filter(|e| !e.is_empty()) {
        let mut parts = editor.split_whitespace();
        if let Some(program) = parts.next() {
            cmds.push(ExternalCommand::new(program).args(parts).arg(file.clone()));
        }
    }
    cmds.push(ExternalCommand::new("code").arg(file));
    cmds
}
