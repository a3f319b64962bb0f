//! Turning scan candidates into the one element a test is generated for.
//!
//! Disambiguation is delegated to a [`Chooser`], so the same resolution logic
//! runs behind a terminal prompt, a scripted caller, or a test.

use crate::error::{ForgeError, Result};
use crate::scan::{Endpoint, ScanResult};
use crate::types::{Category, HttpMethod};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormTarget {
    pub path: Option<String>,
}

/// What a UI test should target. When more than one field is set the
/// precedence is route, component, form, url.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiTarget {
    pub route: Option<String>,
    pub component: Option<String>,
    pub form: Option<FormTarget>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiKind<'a> {
    Route(&'a str),
    Component(&'a str),
    Form(Option<&'a str>),
    Url(&'a str),
    Generic,
}

impl UiTarget {
    pub fn route(path: impl Into<String>) -> Self {
        Self {
            route: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn component(name: impl Into<String>) -> Self {
        Self {
            component: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn form(path: Option<String>) -> Self {
        Self {
            form: Some(FormTarget { path }),
            ..Default::default()
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> UiKind<'_> {
        if let Some(route) = &self.route {
            UiKind::Route(route)
        } else if let Some(component) = &self.component {
            UiKind::Component(component)
        } else if let Some(form) = &self.form {
            UiKind::Form(form.path.as_deref())
        } else if let Some(url) = &self.url {
            UiKind::Url(url)
        } else {
            UiKind::Generic
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Endpoint(Endpoint),
    Ui(UiTarget),
    Socket { url: String },
}

// ---------------------------------------------------------------------------
// Chooser
// ---------------------------------------------------------------------------

/// Picks one of several candidates, or asks for a manual value.
pub trait Chooser {
    /// Index into `items` (never empty).
    fn choose(&self, prompt: &str, items: &[String]) -> Result<usize>;

    fn input(&self, prompt: &str, default: &str) -> Result<String>;
}

/// Non-interactive: always the first candidate, always the default.
pub struct FirstChoice;

impl Chooser for FirstChoice {
    fn choose(&self, _prompt: &str, _items: &[String]) -> Result<usize> {
        Ok(0)
    }

    fn input(&self, _prompt: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }
}

/// Replays canned answers in order; falls back to [`FirstChoice`] behaviour
/// once exhausted.
#[derive(Default)]
pub struct Scripted {
    choices: RefCell<VecDeque<usize>>,
    inputs: RefCell<VecDeque<String>>,
}

impl Scripted {
    pub fn new(choices: Vec<usize>, inputs: Vec<String>) -> Self {
        Self {
            choices: RefCell::new(choices.into()),
            inputs: RefCell::new(inputs.into()),
        }
    }
}

impl Chooser for Scripted {
    fn choose(&self, _prompt: &str, items: &[String]) -> Result<usize> {
        let pick = self.choices.borrow_mut().pop_front().unwrap_or(0);
        Ok(pick.min(items.len().saturating_sub(1)))
    }

    fn input(&self, _prompt: &str, default: &str) -> Result<String> {
        Ok(self
            .inputs
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| default.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Ask `chooser` to pick from `labels` and return the matching item.
///
/// `labels` and `items` are parallel; an index past the end is a prompt
/// error, never a panic.
fn pick<'a, T>(
    chooser: &dyn Chooser,
    prompt: &str,
    labels: &[String],
    items: &'a [T],
) -> Result<&'a T> {
    let index = chooser.choose(prompt, labels)?;
    items.get(index).ok_or_else(|| {
        ForgeError::Prompt(format!(
            "{prompt}: choice {index} is out of range ({} options)",
            items.len()
        ))
    })
}

/// Reduce `scan` to a single selection for `category`.
///
/// One candidate is used as-is, several go through `chooser`, none falls back
/// to manual entry. An empty manual entry means "no selection".
pub fn resolve_selection(
    category: Category,
    scan: &ScanResult,
    chooser: &dyn Chooser,
) -> Result<Option<Selection>> {
    match category {
        Category::Api => resolve_endpoint(scan, chooser),
        Category::Ui => resolve_ui(scan, chooser),
        Category::WebSocket => resolve_socket(scan, chooser),
        Category::Performance | Category::Visual | Category::Generic => Ok(None),
    }
}

fn resolve_endpoint(scan: &ScanResult, chooser: &dyn Chooser) -> Result<Option<Selection>> {
    let endpoint = match scan.endpoints.as_slice() {
        [] => {
            let Some(path) = non_empty(chooser.input("No endpoints found. Endpoint path", "")?)
            else {
                return Ok(None);
            };
            let methods: Vec<String> = HttpMethod::all()
                .iter()
                .map(|m| m.as_str().to_string())
                .collect();
            let method = *pick(chooser, "HTTP method", &methods, HttpMethod::all())?;
            Endpoint {
                method,
                path,
                source_file: None,
            }
        }
        [only] => only.clone(),
        many => {
            let labels: Vec<String> = many
                .iter()
                .map(|e| match &e.source_file {
                    Some(file) => format!("{} {} ({file})", e.method, e.path),
                    None => format!("{} {}", e.method, e.path),
                })
                .collect();
            pick(chooser, "Select an endpoint to test", &labels, many)?.clone()
        }
    };
    Ok(Some(Selection::Endpoint(endpoint)))
}

enum UiCandidate<'a> {
    Route(&'a str),
    Component(&'a str),
    Form,
}

fn resolve_ui(scan: &ScanResult, chooser: &dyn Chooser) -> Result<Option<Selection>> {
    let mut candidates: Vec<UiCandidate<'_>> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    for route in &scan.routes {
        candidates.push(UiCandidate::Route(&route.path));
        labels.push(format!("route {} ({})", route.path, route.source_file));
    }
    for component in &scan.components {
        candidates.push(UiCandidate::Component(&component.name));
        labels.push(format!(
            "component {} ({})",
            component.name, component.source_file
        ));
    }
    if scan.has_forms {
        candidates.push(UiCandidate::Form);
        labels.push("form submission".to_string());
    }

    let picked = match candidates.len() {
        0 => {
            return Ok(non_empty(
                chooser.input("Nothing found. Page URL or path to test", "")?,
            )
            .map(|url| Selection::Ui(UiTarget::url(url))));
        }
        1 => &candidates[0],
        _ => pick(chooser, "Select what to test", &labels, &candidates)?,
    };

    let target = match picked {
        UiCandidate::Route(path) => UiTarget::route(*path),
        UiCandidate::Component(name) => UiTarget::component(*name),
        UiCandidate::Form => {
            UiTarget::form(non_empty(chooser.input("Path of the page with the form", "")?))
        }
    };
    Ok(Some(Selection::Ui(target)))
}

fn resolve_socket(scan: &ScanResult, chooser: &dyn Chooser) -> Result<Option<Selection>> {
    let urls = scan.socket_urls();
    let url = match urls.as_slice() {
        [] => match non_empty(chooser.input("No socket URLs found. WebSocket URL", "")?) {
            Some(url) => url,
            None => return Ok(None),
        },
        [only] => only.clone(),
        many => pick(chooser, "Select a WebSocket URL", many, many)?.clone(),
    };
    Ok(Some(Selection::Socket { url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{Component, Route};

    fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
        Endpoint {
            method,
            path: path.into(),
            source_file: Some("server.js".into()),
        }
    }

    #[test]
    fn ui_precedence() {
        let all = UiTarget {
            route: Some("/users".into()),
            component: Some("UserCard".into()),
            form: Some(FormTarget::default()),
            url: Some("https://x.test".into()),
        };
        assert_eq!(all.kind(), UiKind::Route("/users"));

        let no_route = UiTarget {
            route: None,
            ..all.clone()
        };
        assert_eq!(no_route.kind(), UiKind::Component("UserCard"));

        let form_and_url = UiTarget {
            form: Some(FormTarget {
                path: Some("/signup".into()),
            }),
            url: Some("https://x.test".into()),
            ..Default::default()
        };
        assert_eq!(form_and_url.kind(), UiKind::Form(Some("/signup")));
        assert_eq!(UiTarget::url("https://x.test").kind(), UiKind::Url("https://x.test"));
        assert_eq!(UiTarget::default().kind(), UiKind::Generic);
    }

    #[test]
    fn single_endpoint_is_used_without_asking() {
        let scan = ScanResult {
            endpoints: vec![endpoint(HttpMethod::Get, "/health")],
            ..Default::default()
        };
        let chooser = Scripted::new(vec![5], vec![]);
        let sel = resolve_selection(Category::Api, &scan, &chooser).unwrap();
        assert_eq!(
            sel,
            Some(Selection::Endpoint(endpoint(HttpMethod::Get, "/health")))
        );
    }

    #[test]
    fn chooser_picks_among_several_endpoints() {
        let scan = ScanResult {
            endpoints: vec![
                endpoint(HttpMethod::Get, "/users"),
                endpoint(HttpMethod::Post, "/users"),
            ],
            ..Default::default()
        };
        let sel = resolve_selection(Category::Api, &scan, &Scripted::new(vec![1], vec![]))
            .unwrap();
        assert_eq!(
            sel,
            Some(Selection::Endpoint(endpoint(HttpMethod::Post, "/users")))
        );
    }

    #[test]
    fn manual_endpoint_when_nothing_found() {
        let chooser = Scripted::new(vec![3], vec!["/orders/:id".into()]);
        let sel = resolve_selection(Category::Api, &ScanResult::default(), &chooser).unwrap();
        assert_eq!(
            sel,
            Some(Selection::Endpoint(Endpoint {
                method: HttpMethod::Delete,
                path: "/orders/:id".into(),
                source_file: None,
            }))
        );
    }

    #[test]
    fn empty_manual_entry_means_no_selection() {
        for category in [Category::Api, Category::Ui, Category::WebSocket] {
            let sel = resolve_selection(category, &ScanResult::default(), &FirstChoice).unwrap();
            assert_eq!(sel, None, "{category}");
        }
    }

    #[test]
    fn ui_candidates_list_routes_then_components_then_form() {
        let scan = ScanResult {
            routes: vec![Route {
                path: "/users".into(),
                source_file: "App.tsx".into(),
            }],
            components: vec![Component {
                name: "LoginForm".into(),
                source_file: "LoginForm.tsx".into(),
            }],
            has_forms: true,
            ..Default::default()
        };
        let pick = |choice: usize, inputs: Vec<String>| {
            resolve_selection(Category::Ui, &scan, &Scripted::new(vec![choice], inputs))
                .unwrap()
                .unwrap()
        };
        assert_eq!(pick(0, vec![]), Selection::Ui(UiTarget::route("/users")));
        assert_eq!(pick(1, vec![]), Selection::Ui(UiTarget::component("LoginForm")));
        assert_eq!(
            pick(2, vec!["/login".into()]),
            Selection::Ui(UiTarget::form(Some("/login".into())))
        );
    }

    #[test]
    fn socket_choices_are_deduplicated() {
        let scan = ScanResult {
            sockets: ["ws://a", "ws://a", "ws://b"]
                .iter()
                .map(|u| crate::scan::SocketImplementation {
                    source_file: "s.js".into(),
                    url: Some(u.to_string()),
                })
                .collect(),
            ..Default::default()
        };
        let sel = resolve_selection(Category::WebSocket, &scan, &Scripted::new(vec![1], vec![]))
            .unwrap();
        assert_eq!(sel, Some(Selection::Socket { url: "ws://b".into() }));
    }

    /// Answers every choice with an index past the end of the list.
    struct PastTheEnd;

    impl Chooser for PastTheEnd {
        fn choose(&self, _prompt: &str, items: &[String]) -> Result<usize> {
            Ok(items.len())
        }

        fn input(&self, _prompt: &str, _default: &str) -> Result<String> {
            Ok("/manual".into())
        }
    }

    #[test]
    fn out_of_range_choice_is_a_prompt_error() {
        let endpoints = ScanResult {
            endpoints: vec![
                endpoint(HttpMethod::Get, "/a"),
                endpoint(HttpMethod::Post, "/b"),
            ],
            ..Default::default()
        };
        let ui = ScanResult {
            routes: vec![Route {
                path: "/users".into(),
                source_file: "App.tsx".into(),
            }],
            has_forms: true,
            ..Default::default()
        };
        let sockets = ScanResult {
            sockets: ["ws://a", "ws://b"]
                .iter()
                .map(|u| crate::scan::SocketImplementation {
                    source_file: "s.js".into(),
                    url: Some(u.to_string()),
                })
                .collect(),
            ..Default::default()
        };
        let cases = [
            (Category::Api, &endpoints),
            (Category::Api, &ScanResult::default()),
            (Category::Ui, &ui),
            (Category::WebSocket, &sockets),
        ];
        for (category, scan) in cases {
            let err = resolve_selection(category, scan, &PastTheEnd).unwrap_err();
            assert!(matches!(err, ForgeError::Prompt(ref m) if m.contains("out of range")), "{err}");
        }
    }
}
