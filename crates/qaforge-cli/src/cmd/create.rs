use crate::output::{print_json, print_materialized};
use crate::prompt::Prompter;
use anyhow::{bail, Context};
use clap::Args;
use qaforge_core::{
    config::{self, ConfigBag, Credentials, Features},
    materialize::{self, MaterializeOptions, Materialized},
    paths,
    runner::SystemRunner,
    types::{Framework, ProjectType},
};
use std::path::{Path, PathBuf};

/// Configuration flags shared by `create` and `init`. Anything left unset is
/// prompted for, or defaulted under `--yes`.
#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// playwright, cypress or selenium
    #[arg(long, short = 'f')]
    pub framework: Option<String>,

    /// Application under test
    #[arg(long, env = "QAFORGE_BASE_URL")]
    pub base_url: Option<String>,

    /// API base URL
    #[arg(long, env = "QAFORGE_API_URL")]
    pub api_url: Option<String>,

    #[arg(long, env = "QAFORGE_ADMIN_EMAIL")]
    pub admin_email: Option<String>,

    #[arg(long, env = "QAFORGE_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    #[arg(long, env = "QAFORGE_USER_EMAIL")]
    pub user_email: Option<String>,

    #[arg(long, env = "QAFORGE_USER_PASSWORD", hide_env_values = true)]
    pub user_password: Option<String>,

    /// Generate JavaScript instead of TypeScript
    #[arg(long)]
    pub javascript: bool,

    /// Optional features: websocket, performance, visual (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Directory holding one template directory per framework
    #[arg(long, env = "QAFORGE_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Skip npm install and browser downloads
    #[arg(long)]
    pub skip_install: bool,
}

// ---------------------------------------------------------------------------
// Config collection
// ---------------------------------------------------------------------------

const FRAMEWORKS: &[&str] = &["playwright", "cypress", "selenium"];
const PROJECT_TYPES: &[&str] = &["e2e", "api", "full"];

fn parse_features(names: &[String]) -> anyhow::Result<Features> {
    let mut features = Features::default();
    for name in names.iter().map(|n| n.trim().to_ascii_lowercase()) {
        match name.as_str() {
            "websocket" | "ws" => features.websocket = true,
            "performance" | "perf" => features.performance = true,
            "visual" => features.visual = true,
            "" => {}
            other => bail!("unknown feature '{other}': expected websocket, performance or visual"),
        }
    }
    Ok(features)
}

/// Gather everything materialization needs into one [`ConfigBag`].
pub fn collect_config(
    project_name: &str,
    project_type: Option<&str>,
    setup: &SetupArgs,
    prompter: &Prompter,
) -> anyhow::Result<ConfigBag> {
    let framework: Framework = match &setup.framework {
        Some(f) => f.parse()?,
        None => FRAMEWORKS[prompter.select("Test framework", FRAMEWORKS, 0)?].parse()?,
    };
    let project_type: ProjectType = match project_type {
        Some(t) => t.parse()?,
        None => PROJECT_TYPES[prompter.select("Project type", PROJECT_TYPES, 2)?].parse()?,
    };

    let base_url = prompter.text(
        "Application base URL",
        setup.base_url.as_deref(),
        config::DEFAULT_BASE_URL,
    )?;
    let api_url = prompter.text(
        "API base URL",
        setup.api_url.as_deref(),
        config::DEFAULT_API_URL,
    )?;

    let credentials = Credentials {
        admin_email: prompter.optional("Admin email", setup.admin_email.as_deref())?,
        admin_password: prompter.secret("Admin password", setup.admin_password.as_deref())?,
        user_email: prompter.optional("User email", setup.user_email.as_deref())?,
        user_password: prompter.secret("User password", setup.user_password.as_deref())?,
    };

    let typescript = !setup.javascript && prompter.confirm("Use TypeScript?", true)?;

    let features = if setup.features.is_empty() {
        Features::from_checklist(&prompter.checklist("Optional features", Features::CHECKLIST)?)
    } else {
        parse_features(&setup.features)?
    };

    Ok(ConfigBag::builder(project_name)
        .framework(framework)
        .project_type(project_type)
        .base_url(base_url)
        .api_url(api_url)
        .credentials(credentials)
        .typescript(typescript)
        .features(features)
        .build())
}

/// Materialize with the real process runner and print the outcome.
pub fn scaffold(
    project_dir: &Path,
    bag: &ConfigBag,
    setup: &SetupArgs,
    json: bool,
) -> anyhow::Result<Materialized> {
    let opts = MaterializeOptions {
        templates_root: setup.templates.clone(),
        install: !setup.skip_install,
    };
    let out = materialize::materialize(project_dir, bag, &opts, &SystemRunner)
        .with_context(|| format!("failed to scaffold {}", project_dir.display()))?;

    if json {
        print_json(&out)?;
    } else {
        print_materialized(&out);
        if !opts.install {
            println!("\nSkipped dependency install. Run `npm install` when ready.");
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

fn validate_name(name: &str) -> anyhow::Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        bail!("project name must not be empty");
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        bail!("invalid project name '{name}': must be a single directory name");
    }
    Ok(name)
}

pub fn run(
    cwd: &Path,
    project_name: Option<&str>,
    project_type: Option<&str>,
    setup: &SetupArgs,
    prompter: &Prompter,
    json: bool,
) -> anyhow::Result<()> {
    let entered;
    let name = match project_name {
        Some(n) => n,
        None => {
            entered = prompter.required("Project name", None)?;
            entered.as_str()
        }
    };
    let name = validate_name(name)?;

    let project_dir = cwd.join(name);
    if paths::has_manifest(&project_dir) {
        bail!(
            "{} already contains a package.json; run `qaforge init` there instead",
            project_dir.display()
        );
    }

    let bag = collect_config(name, project_type, setup, prompter)?;
    if !json {
        println!(
            "Creating {} project ({}) in: {}",
            bag.framework(),
            bag.project_type(),
            project_dir.display()
        );
    }
    scaffold(&project_dir, &bag, setup, json)?;

    if !json {
        println!("\nNext steps:");
        println!("  cd {name}");
        println!("  qaforge generate api \"Users API\" --analyze");
        println!("  qaforge test");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_names_accept_aliases() {
        let f = parse_features(&["ws".into(), "visual".into()]).unwrap();
        assert!(f.websocket && f.visual && !f.performance);
        assert!(parse_features(&["redis".into()]).is_err());
    }

    #[test]
    fn project_names_are_single_segments() {
        assert_eq!(validate_name("  demo ").unwrap(), "demo");
        assert!(validate_name("").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn defaults_mode_builds_default_bag() {
        let bag = collect_config("demo", None, &SetupArgs::default(), &Prompter::new(true)).unwrap();
        assert_eq!(bag.framework(), Framework::Playwright);
        assert_eq!(bag.project_type(), ProjectType::Full);
        assert_eq!(bag.base_url(), config::DEFAULT_BASE_URL);
        assert!(bag.typescript());
        assert_eq!(bag.admin_email(), "");
        assert_eq!(bag.features(), Features::default());
    }

    #[test]
    fn flags_override_prompts() {
        let setup = SetupArgs {
            framework: Some("cypress".into()),
            base_url: Some("http://app.test".into()),
            admin_email: Some("admin@test".into()),
            javascript: true,
            features: vec!["performance".into()],
            ..SetupArgs::default()
        };
        let bag = collect_config("demo", Some("e2e"), &setup, &Prompter::new(true)).unwrap();
        assert_eq!(bag.framework(), Framework::Cypress);
        assert_eq!(bag.project_type(), ProjectType::E2e);
        assert_eq!(bag.base_url(), "http://app.test");
        assert_eq!(bag.admin_email(), "admin@test");
        assert!(!bag.typescript());
        assert!(bag.features().performance);
    }
}
