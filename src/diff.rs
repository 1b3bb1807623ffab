use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

// (binary, diff args, probe args). `diff --version` is GNU-only, so the
// probe compares /dev/null with itself instead.
const DIFF_TOOLS: &[(&str, &[&str], &[&str])] = &[
    ("delta", &[], &["--version"]),
    ("diff", &["-u"], &["/dev/null", "/dev/null"]),
];

/// Streams a diff between the live settings file and the candidate
/// rewrite to the terminal. `delta` is preferred when present, plain
/// `diff` otherwise; if neither runs, both documents are printed in
/// full. Diff exit codes signal difference, not failure, and are
/// ignored.
pub fn show_diff(original: &Path, candidate: &Path) {
    for (tool, args, probe_args) in DIFF_TOOLS {
        if !tool_available(tool, probe_args) {
            continue;
        }
        let status = Command::new(tool)
            .args(*args)
            .arg(original)
            .arg(candidate)
            .status();
        if status.is_ok() {
            return;
        }
    }
    print_fallback(original, candidate);
}

fn tool_available(name: &str, probe_args: &[&str]) -> bool {
    Command::new(name)
        .args(probe_args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn print_fallback(original: &Path, candidate: &Path) {
    println!("--- current: {}", original.display());
    println!("{}", fs::read_to_string(original).unwrap_or_default());
    println!("--- proposed: {}", candidate.display());
    println!("{}", fs::read_to_string(candidate).unwrap_or_default());
}
