use crate::output::{print_json, print_scan};
use crate::prompt::Prompter;
use anyhow::{bail, Context};
use qaforge_core::{
    detect, generate,
    scan::{self, ScanResult},
    select::{self, Selection},
    types::{Category, Framework},
    ForgeError,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub test_type: String,
    pub test_name: String,
    pub feature: Option<String>,
    pub analyze: bool,
    pub target: Option<PathBuf>,
}

/// Scan `target` and reduce the result to one selection.
///
/// `Ok(None)` with a scan means nothing was picked; a scan error is
/// reported and turned into a generic-template fallback if the user agrees.
fn analyze(
    category: Category,
    target: &Path,
    prompter: &Prompter,
    json: bool,
) -> anyhow::Result<(Option<ScanResult>, Option<Selection>)> {
    let result = match scan::scan(target, category) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, target = %target.display(), "analysis failed");
            eprintln!("Analysis failed: {e}");
            if prompter.confirm("Generate a generic template instead?", true)? {
                return Ok((None, None));
            }
            bail!("generation cancelled");
        }
    };

    if !json {
        println!("Analyzed {}:", target.display());
        print_scan(&result);
        println!("{} {category} candidate(s)", result.candidate_count(category));
    }
    let selection = select::resolve_selection(category, &result, prompter)?;
    Ok((Some(result), selection))
}

/// The project's framework; a directory with no test setup yet gets Playwright.
fn framework(root: &Path) -> anyhow::Result<Framework> {
    match detect::detect_framework(root) {
        Ok(framework) => Ok(framework),
        Err(e @ (ForgeError::NotAProject(_) | ForgeError::NoTestStructure)) => {
            tracing::info!(reason = %e, "no framework detected, generating for playwright");
            Ok(Framework::Playwright)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run(
    root: &Path,
    args: &GenerateArgs,
    prompter: &Prompter,
    json: bool,
) -> anyhow::Result<()> {
    let category = Category::parse(&args.test_type);
    let framework = framework(root)?;

    let (scanned, selection) = if args.analyze && category.is_scannable() {
        let target = args.target.as_deref().unwrap_or(root);
        analyze(category, target, prompter, json)?
    } else {
        if args.analyze {
            tracing::info!(%category, "category has nothing to analyze");
        }
        (None, None)
    };

    let generated = generate::generate(
        root,
        framework,
        category,
        &args.test_name,
        args.feature.as_deref(),
        selection.as_ref(),
    )
    .with_context(|| format!("failed to generate {} test", category))?;

    if json {
        let candidates = scanned.as_ref().map(|s| s.candidate_count(category));
        print_json(&serde_json::json!({
            "framework": framework,
            "candidates": candidates,
            "scan": scanned,
            "selection": selection,
            "generated": generated,
        }))?;
        return Ok(());
    }

    let shown = generated.path.strip_prefix(root).unwrap_or(&generated.path);
    println!("Created test: {}", shown.display());
    if generated.renamed {
        println!("  (a test with that name already existed; kept it and used a timestamped name)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(test_type: &str, name: &str) -> GenerateArgs {
        GenerateArgs {
            test_type: test_type.into(),
            test_name: name.into(),
            feature: None,
            analyze: false,
            target: None,
        }
    }

    #[test]
    fn scan_failure_falls_back_to_generic() {
        let project = TempDir::new().unwrap();
        let app = TempDir::new().unwrap();
        let mut a = args("api", "Orders API");
        a.analyze = true;
        a.target = Some(app.path().to_path_buf());

        run(project.path(), &a, &Prompter::new(true), true).unwrap();

        let file = project.path().join("src/api/orders-api.spec.js");
        let body = std::fs::read_to_string(file).unwrap();
        assert!(body.contains("/items"));
    }

    #[test]
    fn analyze_picks_the_only_endpoint() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("tsconfig.json"), "{}").unwrap();
        let app = TempDir::new().unwrap();
        std::fs::write(app.path().join("package.json"), "{}").unwrap();
        std::fs::write(
            app.path().join("server.js"),
            "app.post('/api/orders', createOrder);\n",
        )
        .unwrap();
        let mut a = args("api", "Create Order");
        a.analyze = true;
        a.target = Some(app.path().to_path_buf());

        run(project.path(), &a, &Prompter::new(true), true).unwrap();

        let body =
            std::fs::read_to_string(project.path().join("src/api/create-order.spec.ts")).unwrap();
        assert!(body.contains("/api/orders"));
        assert!(body.contains("toBe(201)"));
    }

    #[test]
    fn detected_framework_picks_the_template() {
        let project = TempDir::new().unwrap();
        std::fs::write(
            project.path().join("package.json"),
            r#"{"devDependencies":{"selenium-webdriver":"^4.0.0","mocha":"^10.0.0"}}"#,
        )
        .unwrap();

        run(project.path(), &args("ui", "Home"), &Prompter::new(true), false).unwrap();

        let body = std::fs::read_to_string(project.path().join("src/e2e/home.spec.js")).unwrap();
        assert!(body.contains("require('selenium-webdriver')"));
        assert!(body.contains("await driver.get(BASE_URL);"));
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let project = TempDir::new().unwrap();
        std::fs::write(project.path().join("package.json"), "{ not json").unwrap();
        assert!(run(project.path(), &args("ui", "Home"), &Prompter::new(true), false).is_err());
    }

    #[test]
    fn feature_nests_under_category_dir() {
        let project = TempDir::new().unwrap();
        let mut a = args("ui", "Checkout");
        a.feature = Some("cart".into());

        run(project.path(), &a, &Prompter::new(true), false).unwrap();

        assert!(project.path().join("src/e2e/cart/checkout.spec.js").is_file());
    }

    #[test]
    fn blank_name_is_rejected() {
        let project = TempDir::new().unwrap();
        assert!(run(project.path(), &args("api", "   "), &Prompter::new(true), false).is_err());
    }
}
