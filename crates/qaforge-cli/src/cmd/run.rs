use anyhow::Context;
use qaforge_core::{
    detect,
    runner::{self, CommandRunner, RunOptions, SystemRunner, TagFilter},
    types::{Browser, Framework, TestEnv},
    ForgeError,
};
use std::path::Path;

pub fn parse_options(
    pattern: Option<&str>,
    env: &str,
    browser: Option<&str>,
    tags: TagFilter,
) -> anyhow::Result<RunOptions> {
    let env: TestEnv = env.parse()?;
    let browser = browser.map(str::parse::<Browser>).transpose()?;
    Ok(RunOptions {
        pattern: pattern.map(str::to_string),
        env,
        browser,
        tags,
    })
}

/// Detect the framework and run its test command with inherited stdio.
/// Returns the framework and whether the run passed.
pub fn run_tests(
    root: &Path,
    opts: &RunOptions,
    runner: &dyn CommandRunner,
) -> anyhow::Result<(Framework, bool)> {
    let framework = detect::detect_framework(root)
        .with_context(|| format!("cannot run tests in {}", root.display()))?;
    let cmd = runner::test_command(framework, opts);
    println!("Running: {cmd}");
    let code = runner.run(&cmd, root)?;
    if code != 0 {
        tracing::warn!(code, "test run failed");
    }
    Ok((framework, code == 0))
}

/// Serve or open the HTML report. Failures are reported, never fatal.
pub fn show_report(root: &Path, framework: Framework, runner: &dyn CommandRunner) {
    if let Some(cmd) = runner::report_command(framework) {
        match runner.run(&cmd, root) {
            Ok(0) => {}
            Ok(code) => eprintln!("Report viewer exited with code {code}"),
            Err(e) => eprintln!("Could not open report: {e}"),
        }
        return;
    }
    let report = runner::report_file(root);
    if !report.is_file() {
        eprintln!("No report found at {}", report.display());
        return;
    }
    if let Err(e) = open::that(&report) {
        eprintln!("Could not open {}: {e}", report.display());
    }
}

pub fn run(
    root: &Path,
    pattern: Option<&str>,
    env: &str,
    browser: Option<&str>,
) -> anyhow::Result<()> {
    let opts = parse_options(pattern, env, browser, TagFilter::default())?;
    let (_, passed) = run_tests(root, &opts, &SystemRunner)?;
    if !passed {
        return Err(ForgeError::TestRunFailed.into());
    }
    Ok(())
}
