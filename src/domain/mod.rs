//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod bump;
pub mod version;

pub use branch::BranchContext;
pub use bump::{BumpDecision, BumpEvent, BumpRules};
pub use version::Version;
