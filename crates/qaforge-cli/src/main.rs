mod cmd;
mod output;
mod prompt;
mod root;

use clap::{Parser, Subcommand};
use cmd::{create::SetupArgs, test::TestArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qaforge",
    about = "Scaffold, generate and run test-automation projects (Playwright, Cypress, Selenium)",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: nearest directory with a package.json, else cwd)
    #[arg(long, global = true, env = "QAFORGE_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Accept defaults instead of prompting
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    /// Log progress to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new test project in a new directory
    Create {
        /// Directory (and package) name; prompted when omitted
        project_name: Option<String>,

        /// Project type: e2e, api or full
        #[arg(long = "type", short = 't')]
        project_type: Option<String>,

        #[command(flatten)]
        setup: SetupArgs,
    },

    /// Add test scaffolding to the existing project
    Init {
        /// Project type: e2e, api or full
        #[arg(long = "type", short = 't')]
        project_type: Option<String>,

        #[command(flatten)]
        setup: SetupArgs,
    },

    /// Generate a test file
    Generate {
        /// api, e2e/ui, websocket, performance, visual (anything else: generic)
        test_type: String,

        /// Human-readable test name, e.g. "User Login"
        test_name: String,

        /// Nest the file under a feature subdirectory
        #[arg(long)]
        feature: Option<String>,

        /// Scan the application source and target a discovered endpoint/route/socket
        #[arg(long, short = 'a')]
        analyze: bool,

        /// Application directory to scan (default: project root)
        #[arg(long)]
        target: Option<PathBuf>,
    },

    /// Run tests
    Run {
        /// Test file or glob to run
        test_pattern: Option<String>,

        /// local, staging or production
        #[arg(long, short = 'e', default_value = "local")]
        env: String,

        /// chrome, firefox or safari
        #[arg(long, short = 'b')]
        browser: Option<String>,
    },

    /// Run tests with tag filters and an optional report
    Test(TestArgs),

    /// Interactive menu
    Start,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root_path = cli.root.as_deref();
    let prompter = prompt::Prompter::new(cli.yes);

    let result = match cli.command {
        Commands::Create {
            project_name,
            project_type,
            setup,
        } => cmd::create::run(
            &root::working_dir(root_path),
            project_name.as_deref(),
            project_type.as_deref(),
            &setup,
            &prompter,
            cli.json,
        ),
        Commands::Init {
            project_type,
            setup,
        } => cmd::init::run(
            &root::resolve_root(root_path),
            project_type.as_deref(),
            &setup,
            &prompter,
            cli.json,
        ),
        Commands::Generate {
            test_type,
            test_name,
            feature,
            analyze,
            target,
        } => cmd::generate::run(
            &root::resolve_root(root_path),
            &cmd::generate::GenerateArgs {
                test_type,
                test_name,
                feature,
                analyze,
                target,
            },
            &prompter,
            cli.json,
        ),
        Commands::Run {
            test_pattern,
            env,
            browser,
        } => cmd::run::run(
            &root::resolve_root(root_path),
            test_pattern.as_deref(),
            &env,
            browser.as_deref(),
        ),
        Commands::Test(args) => cmd::test::run(&root::resolve_root(root_path), &args),
        Commands::Start => cmd::start::run(&root::resolve_root(root_path), &prompter),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
