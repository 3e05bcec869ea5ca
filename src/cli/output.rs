//! Output formatting utilities for the CLI.

use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Truncate a string to a maximum number of characters, appending "..."
/// if truncated. Counts chars rather than bytes so multibyte text never
/// splits mid-character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Report a command failure and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        eprintln!("{}", serde_json::json!({ "error": err.to_string() }));
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
