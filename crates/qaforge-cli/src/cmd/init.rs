use crate::cmd::create::{collect_config, scaffold, SetupArgs};
use crate::prompt::Prompter;
use qaforge_core::{detect, paths, ForgeError};
use std::path::Path;

/// Scaffold into an existing project. Files already present are kept.
pub fn run(
    root: &Path,
    project_type: Option<&str>,
    setup: &SetupArgs,
    prompter: &Prompter,
    json: bool,
) -> anyhow::Result<()> {
    if !paths::has_manifest(root) {
        return Err(ForgeError::NotAProject(root.to_path_buf()).into());
    }

    let project_name = detect::project_name(root);

    // A framework already declared in package.json wins over the prompt.
    let mut setup = setup.clone();
    if setup.framework.is_none() {
        if let Ok(framework) = detect::detect_framework(root) {
            tracing::info!(%framework, "using detected framework");
            setup.framework = Some(framework.to_string());
        }
    }

    let bag = collect_config(&project_name, project_type, &setup, prompter)?;
    if !json {
        println!("Initializing {} tests in: {}", bag.framework(), root.display());
    }
    scaffold(root, &bag, &setup, json)?;
    Ok(())
}
