//! Turns the latest commit into a bump decision

pub mod bump_analyzer;

pub use bump_analyzer::{Analysis, BumpAnalyzer};
