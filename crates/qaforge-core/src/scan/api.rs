use super::{relative_display, walk, Endpoint, ScanResult};
use crate::error::Result;
use crate::io;
use crate::types::HttpMethod;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];

const AUTH_MARKERS: &[&str] = &["login", "signin", "authenticate", "auth"];

static ROUTE_CALL_RE: OnceLock<Regex> = OnceLock::new();
static ROUTE_DECORATOR_RE: OnceLock<Regex> = OnceLock::new();

/// `app.get('/users', ...)`, `router.post("/login", ...)`
fn route_call_re() -> &'static Regex {
    ROUTE_CALL_RE.get_or_init(|| {
        Regex::new(r#"\b(?:app|router|server|api)\.(get|post|put|delete|patch)\s*\(\s*['"`](/[^'"`]*)['"`]"#)
            .unwrap()
    })
}

/// `@Get('/users')`, `@Post("/orders")`
fn route_decorator_re() -> &'static Regex {
    ROUTE_DECORATOR_RE.get_or_init(|| {
        Regex::new(r#"@(Get|Post|Put|Delete|Patch)\s*\(\s*['"`](/[^'"`]*)['"`]"#).unwrap()
    })
}

fn captures(re: &Regex, text: &str) -> Vec<(HttpMethod, String)> {
    re.captures_iter(text)
        .filter_map(|c| {
            let method = c[1].parse::<HttpMethod>().ok()?;
            Some((method, c[2].to_string()))
        })
        .collect()
}

/// Route registrations in web-framework call form.
pub fn extract_route_calls(text: &str) -> Vec<(HttpMethod, String)> {
    captures(route_call_re(), text)
}

/// Route registrations in decorator form.
pub fn extract_route_decorators(text: &str) -> Vec<(HttpMethod, String)> {
    captures(route_decorator_re(), text)
}

pub fn mentions_authentication(text: &str) -> bool {
    AUTH_MARKERS.iter().any(|m| text.contains(m))
}

/// Apply every API rule to one file's contents.
pub fn scan_text(text: &str, source_file: &str, result: &mut ScanResult) {
    let found = extract_route_calls(text)
        .into_iter()
        .chain(extract_route_decorators(text));
    for (method, path) in found {
        tracing::debug!(%method, %path, file = source_file, "endpoint");
        result.endpoints.push(Endpoint {
            method,
            path,
            source_file: Some(source_file.to_string()),
        });
    }
    if mentions_authentication(text) {
        result.has_authentication = true;
    }
}

pub fn scan_tree(root: &Path, result: &mut ScanResult) -> Result<()> {
    for file in walk::collect_files(root, EXTENSIONS)? {
        if let Some(text) = io::read_text(&file) {
            scan_text(&text, &relative_display(root, &file), result);
        }
    }
    Ok(())
}
