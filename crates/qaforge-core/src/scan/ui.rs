use super::{relative_display, walk, Component, Route, ScanResult};
use crate::error::Result;
use crate::io;
use regex::Regex;
use std::path::{Component as PathComponent, Path};
use std::sync::OnceLock;

/// Component files.
pub const EXTENSIONS: &[&str] = &["jsx", "tsx"];

/// Files under a pages directory that map to routes.
pub const PAGE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Pages directories checked relative to the project root.
pub const PAGES_DIRS: &[&str] = &["pages", "src/pages"];

const FORM_MARKERS: &[&str] = &["<form", "<Form", "onSubmit", "handleSubmit"];

static COMPONENT_RE: OnceLock<Regex> = OnceLock::new();
static ROUTE_ELEMENT_RE: OnceLock<Regex> = OnceLock::new();
static ROUTE_CONFIG_RE: OnceLock<Regex> = OnceLock::new();

fn component_re() -> &'static Regex {
    COMPONENT_RE.get_or_init(|| {
        Regex::new(r"export\s+(?:default\s+)?(?:function|const|class)\s+([A-Z][A-Za-z0-9_]*)")
            .unwrap()
    })
}

/// `<Route path="/users" element={...} />`
fn route_element_re() -> &'static Regex {
    ROUTE_ELEMENT_RE.get_or_init(|| Regex::new(r#"<Route\b[^>]*?\bpath=["']([^"']+)["']"#).unwrap())
}

/// `{ path: '/users', component: Users }`
fn route_config_re() -> &'static Regex {
    ROUTE_CONFIG_RE.get_or_init(|| Regex::new(r#"\bpath\s*:\s*['"`]([^'"`]+)['"`]"#).unwrap())
}

fn first_group(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text).map(|c| c[1].to_string()).collect()
}

/// Exported identifiers starting with a capital letter.
pub fn extract_components(text: &str) -> Vec<String> {
    first_group(component_re(), text)
}

pub fn extract_route_elements(text: &str) -> Vec<String> {
    first_group(route_element_re(), text)
}

pub fn extract_route_config_paths(text: &str) -> Vec<String> {
    first_group(route_config_re(), text)
}

pub fn has_forms(text: &str) -> bool {
    FORM_MARKERS.iter().any(|m| text.contains(m))
}

/// Route for a file given its path relative to a pages directory.
///
/// `users/[id].tsx` → `/users/:id`, `users/index.tsx` → `/users`.
/// The root page (`index.tsx`) and `_`-prefixed framework files yield `None`.
pub fn page_route(relative: &Path) -> Option<String> {
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            PathComponent::Normal(s) => s.to_str().map(str::to_string),
            _ => None,
        })
        .collect();

    let file = segments.pop()?;
    let stem = match file.rsplit_once('.') {
        Some((stem, ext)) if PAGE_EXTENSIONS.contains(&ext) => stem.to_string(),
        _ => return None,
    };
    if stem.starts_with('_') {
        return None;
    }
    if stem != "index" {
        segments.push(stem);
    }

    let route: Vec<String> = segments.iter().map(|s| param_segment(s)).collect();
    if route.is_empty() {
        return None;
    }
    Some(format!("/{}", route.join("/")))
}

/// `[id]` → `:id`, `[...slug]` → `:slug`; other segments pass through.
fn param_segment(segment: &str) -> String {
    match segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    {
        Some(inner) => format!(":{}", inner.trim_start_matches("...")),
        None => segment.to_string(),
    }
}

/// Apply component, route and form rules to one file's contents.
pub fn scan_text(text: &str, source_file: &str, result: &mut ScanResult) {
    for name in extract_components(text) {
        tracing::debug!(%name, file = source_file, "component");
        result.components.push(Component {
            name,
            source_file: source_file.to_string(),
        });
    }
    let paths = extract_route_elements(text)
        .into_iter()
        .chain(extract_route_config_paths(text));
    for path in paths {
        tracing::debug!(%path, file = source_file, "route");
        result.routes.push(Route {
            path,
            source_file: source_file.to_string(),
        });
    }
    if has_forms(text) {
        result.has_forms = true;
    }
}

pub fn scan_tree(root: &Path, result: &mut ScanResult) -> Result<()> {
    for file in walk::collect_files(root, EXTENSIONS)? {
        if let Some(text) = io::read_text(&file) {
            scan_text(&text, &relative_display(root, &file), result);
        }
    }

    for pages in PAGES_DIRS.iter().map(|d| root.join(d)) {
        for file in walk::collect_files(&pages, PAGE_EXTENSIONS)? {
            let Ok(relative) = file.strip_prefix(&pages) else {
                continue;
            };
            if let Some(path) = page_route(relative) {
                tracing::debug!(%path, "page route");
                result.routes.push(Route {
                    path,
                    source_file: relative_display(root, &file),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn components_need_a_capital() {
        let src = "export default function UserCard() {}\n\
                   export const Header = () => null;\n\
                   export class Modal extends React.Component {}\n\
                   export function useThing() {}\n";
        assert_eq!(extract_components(src), vec!["UserCard", "Header", "Modal"]);
    }

    #[test]
    fn route_elements_and_config_paths() {
        let src = r#"
            <Route path="/users" element={<Users />} />
            <Route exact path='/about' component={About} />
            const routes = [{ path: '/settings', component: Settings }];
        "#;
        assert_eq!(extract_route_elements(src), vec!["/users", "/about"]);
        assert_eq!(extract_route_config_paths(src), vec!["/settings"]);
    }

    #[test]
    fn page_routes() {
        assert_eq!(
            page_route(Path::new("users/[id].tsx")).as_deref(),
            Some("/users/:id")
        );
        assert_eq!(page_route(Path::new("users/index.jsx")).as_deref(), Some("/users"));
        assert_eq!(page_route(Path::new("about.js")).as_deref(), Some("/about"));
        assert_eq!(
            page_route(Path::new("blog/[...slug].tsx")).as_deref(),
            Some("/blog/:slug")
        );
        assert_eq!(page_route(Path::new("index.tsx")), None);
        assert_eq!(page_route(Path::new("_app.tsx")), None);
        assert_eq!(page_route(Path::new("styles.css")), None);
    }

    #[test]
    fn form_markers() {
        assert!(has_forms("<form onSubmit={save}>"));
        assert!(has_forms("const { handleSubmit } = useForm();"));
        assert!(!has_forms("<div>no inputs</div>"));
    }

    #[test]
    fn pages_pass_adds_routes() {
        let dir = TempDir::new().unwrap();
        let pages = dir.path().join("pages/users");
        std::fs::create_dir_all(&pages).unwrap();
        std::fs::write(dir.path().join("pages/index.tsx"), "").unwrap();
        std::fs::write(pages.join("[id].tsx"), "").unwrap();

        let mut result = ScanResult::default();
        scan_tree(dir.path(), &mut result).unwrap();
        let routes: Vec<&str> = result.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(routes, vec!["/users/:id"]);
        assert_eq!(result.routes[0].source_file, "pages/users/[id].tsx");
    }
}
