use crate::error::{Result, VersionBumpError};
use crate::git::{CommitInfo, Repository};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A commit recorded by [`MockRepository::commit_file`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCommit {
    pub hash: String,
    pub path: PathBuf,
    pub message: String,
}

/// Mock repository for testing without actual git operations
///
/// Files are "committed" by snapshotting their contents; committing the same
/// contents twice is reported as nothing to commit.
pub struct MockRepository {
    branch: Option<String>,
    head: CommitInfo,
    push_error: Option<String>,
    snapshots: RefCell<HashMap<PathBuf, String>>,
    commits: RefCell<Vec<RecordedCommit>>,
    pushes: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a mock on branch `main` whose HEAD has the given message and diff size
    pub fn new(message: impl Into<String>, lines_changed: Option<usize>) -> Self {
        MockRepository {
            branch: Some("main".to_string()),
            head: CommitInfo {
                hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
                message: message.into(),
                author: "Test User".to_string(),
                lines_changed,
            },
            push_error: None,
            snapshots: RefCell::new(HashMap::new()),
            commits: RefCell::new(Vec::new()),
            pushes: RefCell::new(Vec::new()),
        }
    }

    /// Put HEAD on a different branch, or detach it with `None`
    pub fn set_branch(&mut self, branch: Option<&str>) {
        self.branch = branch.map(str::to_string);
    }

    /// Make every push fail with `message`
    pub fn fail_pushes(&mut self, message: impl Into<String>) {
        self.push_error = Some(message.into());
    }

    /// Record `path`'s current contents as already committed
    pub fn snapshot(&self, path: &Path) -> Result<()> {
        let contents = fs::read_to_string(path)?;
        self.snapshots
            .borrow_mut()
            .insert(path.to_path_buf(), contents);
        Ok(())
    }

    pub fn commits(&self) -> Vec<RecordedCommit> {
        self.commits.borrow().clone()
    }

    /// `(remote, branch)` pairs in push order
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| VersionBumpError::branch("HEAD is detached"))
    }

    fn head_commit(&self) -> Result<CommitInfo> {
        Ok(self.head.clone())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<Option<String>> {
        let contents = fs::read_to_string(path)?;
        let mut snapshots = self.snapshots.borrow_mut();
        if snapshots.get(path) == Some(&contents) {
            return Ok(None);
        }
        snapshots.insert(path.to_path_buf(), contents);

        let mut commits = self.commits.borrow_mut();
        let hash = format!("{:040x}", commits.len() + 1);
        commits.push(RecordedCommit {
            hash: hash.clone(),
            path: path.to_path_buf(),
            message: message.to_string(),
        });
        Ok(Some(hash))
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(VersionBumpError::remote(message.clone()));
        }
        self.pushes
            .borrow_mut()
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }
}
