//! User interface module - terminal output for a non-interactive CI run.
//!
//! `formatter` holds the display functions; styling comes from `console`,
//! which drops colors when the output is not a terminal.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_bump_analysis, display_error, display_manual_push_instruction,
    display_proposed_version, display_status, display_success, render_step_outputs,
};
