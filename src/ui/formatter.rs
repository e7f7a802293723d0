//! Formatting functions for UI output.
//!
//! Everything here prints or renders text; nothing reads input.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::WorkflowResult;
use crate::domain::{BumpDecision, BumpEvent, Version};

/// Longest commit subject shown in the analysis summary.
const MAX_SUBJECT_CHARS: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

fn subject(message: &str) -> String {
    let first_line = message.lines().next().unwrap_or("");
    if first_line.chars().count() > MAX_SUBJECT_CHARS {
        let truncated: String = first_line.chars().take(MAX_SUBJECT_CHARS).collect();
        format!("{}…", truncated)
    } else {
        first_line.to_string()
    }
}

/// Show the commit that drove the decision and the decision itself.
pub fn display_bump_analysis(event: &BumpEvent, decision: BumpDecision) {
    println!("\n{}", style("Analyzing latest commit").bold());
    println!("  Message:       {}", subject(&event.message));
    println!("  Lines changed: {}", event.lines_changed);
    println!("  Bump:          {}", style(decision).cyan());
}

/// Display the version change.
pub fn display_proposed_version(previous: &Version, next: &Version) {
    println!("\n{}", style("Version Change:").bold());
    println!("  From: {}", style(previous).red());
    println!("  To:   {}", style(next).green());
}

/// Display manual push instruction for a branch that was committed but not pushed.
pub fn display_manual_push_instruction(branch: &str, remote: &str) {
    println!(
        "\n{} To push this commit later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, branch)).cyan()
    );
}

/// `key=value` lines suitable for a CI step output file.
pub fn render_step_outputs(result: &WorkflowResult) -> String {
    format!(
        "previous={}\nversion={}\ndecision={}\nlines_changed={}\ncommitted={}\npushed={}\n",
        result.previous,
        result.version,
        result.decision,
        result.event.lines_changed,
        result.commit.is_some(),
        result.pushed
    )
}
