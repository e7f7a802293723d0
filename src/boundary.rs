use std::fmt;

/// Non-fatal conditions met during a bump.
/// These are reported to the user but never fail the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The run is not on the branch that should trigger bumps
    UntriggeredBranch { branch: String, trigger: String },
    /// HEAD is a commit produced by a previous bump
    SelfBumpCommit { commit_hash: String },
    /// HEAD has no parent, so its diff size was taken as 0
    NoParentCommit { commit_hash: String },
    /// Writing the new version left the tree unchanged
    NothingToCommit { version: String },
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UntriggeredBranch { branch, trigger } => {
                write!(
                    f,
                    "On branch '{}', bumps only run on '{}'; skipping",
                    branch, trigger
                )
            }
            BoundaryWarning::SelfBumpCommit { commit_hash } => {
                write!(
                    f,
                    "Commit {} is already a version bump; skipping",
                    short_hash(commit_hash)
                )
            }
            BoundaryWarning::NoParentCommit { commit_hash } => {
                write!(
                    f,
                    "Commit {} has no parent; treating lines changed as 0",
                    short_hash(commit_hash)
                )
            }
            BoundaryWarning::NothingToCommit { version } => {
                write!(f, "Nothing to commit for version {}", version)
            }
        }
    }
}
