// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Output filtering and formatting for the bundler process.
//!
//! In quiet mode only warnings and errors reach the terminal. Otherwise the
//! asset table is shown, minus blank lines, and the `Time:` line is condensed.

use console::style;
use regex::Regex;

/// Output filter for bundler processes.
pub struct OutputFilter {
    /// Tool name for prefixing messages
    tool_name: String,
    /// Matches lines that must never be hidden
    problem_pattern: Regex,
    /// Matches webpack's "Time: 123ms" summary line
    time_pattern: Regex,
    /// Hide informational lines
    quiet: bool,
}

impl OutputFilter {
    /// Creates a new output filter for the given tool.
    pub fn new(tool_name: &str, quiet: bool) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            problem_pattern: Regex::new(r"(?i)\b(error|warning|failed)\b").expect("valid regex"),
            time_pattern: Regex::new(r"^\s*Time:\s*(\d+)\s*ms").expect("valid regex"),
            quiet,
        }
    }

    /// Returns `true` for lines reporting a warning or an error.
    pub fn is_problem(&self, line: &str) -> bool {
        self.problem_pattern.is_match(line)
    }

    /// Determines if a line should be suppressed (not shown to user).
    pub fn should_suppress(&self, line: &str) -> bool {
        if self.is_problem(line) {
            return false;
        }
        if self.quiet {
            return true;
        }
        line.trim().is_empty()
    }

    /// Extracts the build time from webpack's summary line.
    pub fn extract_time_ms(&self, line: &str) -> Option<u64> {
        let caps = self.time_pattern.captures(line)?;
        caps.get(1)?.as_str().parse().ok()
    }

    /// Formats a line for display with the tool prefix.
    pub fn format_line(&self, line: &str) -> String {
        let trimmed = line.trim_end();

        if self.is_problem(trimmed) {
            let lower = trimmed.to_lowercase();
            let body = if lower.contains("warning") {
                style(trimmed).yellow()
            } else {
                style(trimmed).red()
            };
            return format!("  {} {}", style(&self.tool_name).cyan(), body);
        }

        if let Some(ms) = self.extract_time_ms(trimmed) {
            return format!(
                "  {} {} {}",
                style(&self.tool_name).cyan(),
                style("✓").green(),
                style(format!("{}ms", ms)).dim()
            );
        }

        format!("  {} {}", style(&self.tool_name).cyan(), style(trimmed).dim())
    }

    /// Prints every unsuppressed line of `output`.
    pub fn print(&self, output: &str) {
        for line in output.lines() {
            if !self.should_suppress(line) {
                println!("{}", self.format_line(line));
            }
        }
    }
}
