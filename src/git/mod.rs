//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the few Git operations
//! a bump needs, so the workflow can run against a real repository or a mock.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use version_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head_commit()?;
//! println!("{} changed {:?} lines", head.hash, head.lines_changed);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
    /// Lines added plus removed against the first parent, `None` for a root commit
    pub lines_changed: Option<usize>,
}

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]. Implementations map underlying
/// errors (like `git2::Error`) to the appropriate
/// [crate::error::VersionBumpError] variants.
pub trait Repository {
    /// Name of the branch HEAD points at
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g., "main")
    /// * `Err` - If HEAD is detached or unborn
    fn current_branch(&self) -> Result<String>;

    /// The commit at HEAD, with its diff size against the first parent
    fn head_commit(&self) -> Result<CommitInfo>;

    /// Stage `path` and commit it on top of HEAD.
    ///
    /// # Arguments
    /// * `path` - File to stage, absolute or relative to the current directory
    /// * `message` - Commit message
    ///
    /// # Returns
    /// * `Ok(Some(hash))` - Hash of the new commit
    /// * `Ok(None)` - The staged tree equals HEAD's tree; nothing was committed
    /// * `Err` - If the file is outside the work tree or a Git error occurs
    fn commit_file(&self, path: &Path, message: &str) -> Result<Option<String>>;

    /// Push a local branch to the same-named branch on `remote`.
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - If the remote is missing, authentication fails or the push is rejected
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;
}
