//! Markdown rendering and export of a [`ResultSet`].
//!
//! The output is line-oriented and meant for humans; nothing parses it
//! back. Rendering never mutates the result set it is given.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::aggregator::ResultSet;

/// Renders the full comparison as a markdown document: prompt, timestamp,
/// then one labeled block per model in dispatch order.
pub fn render_markdown(results: &ResultSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Prompt: {}", results.prompt());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "_Generated: {}_",
        results.created_at().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out);

    for result in results.iter() {
        match result.elapsed {
            Some(elapsed) => {
                let _ = writeln!(
                    out,
                    "## Model: {} ({:.2}s)",
                    result.model_key,
                    elapsed.as_secs_f64()
                );
            }
            None => {
                let _ = writeln!(out, "## Model: {}", result.model_key);
            }
        }
        let _ = writeln!(out);
        match result.text() {
            Some(text) => {
                let _ = writeln!(out, "```\n{text}\n```");
            }
            None => {
                let message = result.failure_message().unwrap_or("unknown failure");
                let _ = writeln!(out, "_error: {message}_");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out);
    }

    out
}

/// Writes the rendered markdown to `path`.
pub fn write_markdown(results: &ResultSet, path: &Path) -> io::Result<()> {
    std::fs::write(path, render_markdown(results))
}

/// Default export filename in the current directory, stamped to the second.
pub fn default_report_path() -> PathBuf {
    PathBuf::from(format!(
        "runway_output_{}.md",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}
