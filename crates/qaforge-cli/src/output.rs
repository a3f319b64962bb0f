use qaforge_core::materialize::{FileStatus, Materialized};
use qaforge_core::scan::ScanResult;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let header_row: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_row.join("  "));

    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

/// One `created:` / `exists:` line per file, like `git status` but terser.
pub fn print_materialized(out: &Materialized) {
    if let Some(src) = &out.from_template {
        println!("  template: {}", src.display());
    }
    for file in &out.files {
        let label = match file.status {
            FileStatus::Created => "created:",
            FileStatus::Exists => "exists: ",
            FileStatus::Copied => "copied: ",
            FileStatus::Updated => "updated:",
        };
        println!("  {label} {}", file.path);
    }
}

/// Everything the scanner found, as a table.
pub fn print_scan(scan: &ScanResult) {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for e in &scan.endpoints {
        rows.push(vec![
            "endpoint".into(),
            format!("{} {}", e.method, e.path),
            e.source_file.clone().unwrap_or_default(),
        ]);
    }
    for r in &scan.routes {
        rows.push(vec!["route".into(), r.path.clone(), r.source_file.clone()]);
    }
    for c in &scan.components {
        rows.push(vec!["component".into(), c.name.clone(), c.source_file.clone()]);
    }
    for s in &scan.sockets {
        rows.push(vec![
            "socket".into(),
            s.url.clone().unwrap_or_default(),
            s.source_file.clone(),
        ]);
    }
    if rows.is_empty() {
        println!("Nothing found.");
        return;
    }
    print_table(&["KIND", "TARGET", "FILE"], rows);
}
