//! Command-line workflow, separated from argument parsing

pub mod orchestration;

pub use orchestration::{run_bump_workflow, BumpWorkflowArgs, WorkflowOutcome, WorkflowResult};
