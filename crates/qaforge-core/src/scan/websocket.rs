use super::{relative_display, walk, ScanResult, SocketImplementation};
use crate::error::Result;
use crate::io;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx"];

static PRESENCE_RE: OnceLock<Regex> = OnceLock::new();
static URL_RES: OnceLock<[Regex; 3]> = OnceLock::new();

fn presence_re() -> &'static Regex {
    PRESENCE_RE.get_or_init(|| Regex::new(r"(?i)websocket|socket\.io|\bws\b").unwrap())
}

fn url_res() -> &'static [Regex; 3] {
    URL_RES.get_or_init(|| {
        [
            // new WebSocket('ws://...')
            Regex::new(r#"new\s+WebSocket\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap(),
            // io('http://...')
            Regex::new(r#"\bio\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap(),
            // socket.connect('ws://...'), io.connect(...)
            Regex::new(r#"\.connect\s*\(\s*['"`]([^'"`]+)['"`]"#).unwrap(),
        ]
    })
}

pub fn mentions_websocket(text: &str) -> bool {
    presence_re().is_match(text)
}

/// Every URL passed to a socket client constructor, in pattern order.
pub fn extract_socket_urls(text: &str) -> Vec<String> {
    url_res()
        .iter()
        .flat_map(|re| re.captures_iter(text).map(|c| c[1].to_string()))
        .collect()
}

pub fn scan_text(text: &str, source_file: &str, result: &mut ScanResult) {
    if mentions_websocket(text) {
        result.has_websockets = true;
    }
    for url in extract_socket_urls(text) {
        tracing::debug!(%url, file = source_file, "socket");
        result.sockets.push(SocketImplementation {
            source_file: source_file.to_string(),
            url: Some(url),
        });
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_is_case_insensitive() {
        assert!(mentions_websocket("const sock = new WEBSOCKET(url)"));
        assert!(mentions_websocket("import io from 'socket.io-client'"));
        assert!(mentions_websocket("import { WebSocketServer } from 'ws'"));
        assert!(!mentions_websocket("const rows = fetchRows()"));
    }

    #[test]
    fn url_shapes() {
        let src = r#"
            const a = new WebSocket('ws://localhost:8080/feed');
            const b = io("http://localhost:4000");
            const c = client.connect(`wss://chat.test/socket`);
        "#;
        assert_eq!(
            extract_socket_urls(src),
            vec![
                "ws://localhost:8080/feed",
                "http://localhost:4000",
                "wss://chat.test/socket",
            ]
        );
    }

    #[test]
    fn duplicate_urls_are_kept_until_offered() {
        let mut result = ScanResult::default();
        scan_text("new WebSocket('ws://a')", "one.js", &mut result);
        scan_text("new WebSocket('ws://a')", "two.js", &mut result);
        assert!(result.has_websockets);
        assert_eq!(result.sockets.len(), 2);
        assert_eq!(result.socket_urls(), vec!["ws://a"]);
    }
}
