//! Hygiene: source-level budgets for the wheel engine.
//!
//! The engine runs inside a browser tab where a panic takes the whole board
//! down, so production sources under `src/` may not contain panicking calls,
//! silently discarded results, or direct console printing (everything goes
//! through `log`). Each rule has a budget; budgets only ever shrink.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Rule {
    name: &'static str,
    pattern: &'static str,
    max: usize,
}

const RULES: &[Rule] = &[
    Rule { name: "unwrap", pattern: ".unwrap()", max: 0 },
    Rule { name: "expect", pattern: ".expect(", max: 0 },
    Rule { name: "panic", pattern: "panic!(", max: 0 },
    Rule { name: "unreachable", pattern: "unreachable!(", max: 0 },
    Rule { name: "todo", pattern: "todo!(", max: 0 },
    Rule { name: "unimplemented", pattern: "unimplemented!(", max: 0 },
    Rule { name: "silent discard", pattern: "let _ =", max: 0 },
    Rule { name: "dot ok", pattern: ".ok()", max: 0 },
    Rule { name: "allow dead code", pattern: "#[allow(dead_code)]", max: 0 },
    Rule { name: "println", pattern: "println!(", max: 0 },
    Rule { name: "eprintln", pattern: "eprintln!(", max: 0 },
    Rule { name: "dbg", pattern: "dbg!(", max: 0 },
];

/// Production sources: every `.rs` under `src/` except `*_test.rs`.
fn sources() -> Vec<(String, String)> {
    let mut out = Vec::new();
    walk(Path::new("src"), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn hits(files: &[(String, String)], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|(path, content)| (path.clone(), content.lines().filter(|l| l.contains(pattern)).count()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn sources_are_found() {
    assert!(sources().iter().any(|(p, _)| p.ends_with("engine.rs")), "run from the wheel crate root");
}

#[test]
fn budgets_hold() {
    let files = sources();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > rule.max {
            let detail: Vec<String> = found.iter().map(|(p, n)| format!("    {p}: {n}")).collect();
            failures.push(format!("  {} ({}): found {count}, max {}\n{}", rule.name, rule.pattern, rule.max, detail.join("\n")));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
