use crate::cmd::{
    create::{self, SetupArgs},
    generate::{self, GenerateArgs},
    run::{run_tests, show_report},
};
use crate::prompt::Prompter;
use qaforge_core::{
    detect, paths,
    runner::{self, CommandRunner, RunOptions, SystemRunner},
    types::Category,
};
use std::path::Path;

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    RunTests,
    Generate,
    EditConfig,
    ViewReport,
    Watch,
    Exit,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::RunTests,
        Action::Generate,
        Action::EditConfig,
        Action::ViewReport,
        Action::Watch,
        Action::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::RunTests => "Run tests",
            Action::Generate => "Generate a test",
            Action::EditConfig => "Edit configuration (.env)",
            Action::ViewReport => "View report",
            Action::Watch => "Watch mode",
            Action::Exit => "Exit",
        }
    }
}

const GENERATE_TYPES: &[&str] = &["api", "e2e", "websocket", "performance", "visual"];

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn run_once(root: &Path) -> anyhow::Result<()> {
    let (_, passed) = run_tests(root, &RunOptions::default(), &SystemRunner)?;
    if passed {
        println!("All tests passed.");
    } else {
        println!("Some tests failed.");
    }
    Ok(())
}

fn generate_interactive(root: &Path, prompter: &Prompter) -> anyhow::Result<()> {
    let test_type = GENERATE_TYPES[prompter.select("Test type", GENERATE_TYPES, 0)?];
    let test_name = prompter.required("Test name", None)?;
    let analyze = Category::parse(test_type).is_scannable()
        && prompter.confirm("Analyze the application source first?", false)?;
    let args = GenerateArgs {
        test_type: test_type.to_string(),
        test_name,
        feature: None,
        analyze,
        target: None,
    };
    generate::run(root, &args, prompter, false)
}

/// `$EDITOR`, then VS Code, then whatever the OS associates with the file.
fn edit_config(root: &Path, runner: &dyn CommandRunner) {
    let env = paths::env_path(root);
    if !env.is_file() {
        eprintln!("No {} in {}", paths::ENV_FILE, root.display());
        return;
    }
    let editor = std::env::var("EDITOR").ok();
    for cmd in runner::editor_commands(&env, editor.as_deref()) {
        match runner.run(&cmd, root) {
            Ok(0) => return,
            Ok(code) => tracing::warn!(program = %cmd.program, code, "editor exited non-zero"),
            Err(e) => tracing::info!(error = %e, "editor unavailable"),
        }
    }
    if let Err(e) = open::that(&env) {
        eprintln!("Could not open {}: {e}", env.display());
    }
}

fn watch(root: &Path, runner: &dyn CommandRunner) -> anyhow::Result<()> {
    let framework = detect::detect_framework(root)?;
    let cmd = runner::watch_command(framework);
    println!("Watching: {cmd}");
    // Quitting the watcher is the normal way out.
    if let Err(e) = runner.run(&cmd, root) {
        tracing::warn!(error = %e, "watch mode ended");
    }
    Ok(())
}

fn dispatch(action: Action, root: &Path, prompter: &Prompter) -> anyhow::Result<()> {
    match action {
        Action::RunTests => run_once(root),
        Action::Generate => generate_interactive(root, prompter),
        Action::EditConfig => {
            edit_config(root, &SystemRunner);
            Ok(())
        }
        Action::ViewReport => {
            let framework = detect::detect_framework(root)?;
            show_report(root, framework, &SystemRunner);
            Ok(())
        }
        Action::Watch => watch(root, &SystemRunner),
        Action::Exit => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// start
// ---------------------------------------------------------------------------

pub fn run(root: &Path, prompter: &Prompter) -> anyhow::Result<()> {
    if !paths::has_manifest(root) {
        println!("No test project found in {}.", root.display());
        if !prompter.confirm("Create a new one here?", true)? {
            return Ok(());
        }
        return create::run(root, None, None, &SetupArgs::default(), prompter, false);
    }

    println!("qaforge: {}", detect::project_name(root));
    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    loop {
        let action = Action::ALL[prompter.select("What do you want to do?", &labels, 0)?];
        if action == Action::Exit {
            return Ok(());
        }
        // A failed action returns to the menu rather than ending the session.
        if let Err(e) = dispatch(action, root, prompter) {
            eprintln!("error: {e:#}");
        }
        if !prompter.is_interactive() {
            return Ok(());
        }
    }
}
