use crate::config::GitConfig;
use crate::error::{Result, VersionBumpError};
use crate::git::CommitInfo;
use git2::{Cred, CredentialType, Repository as Git2Repo, Signature};
use std::path::{Path, PathBuf};

/// Credential callbacks are retried by libgit2 on failure; give up after this many.
const MAX_CREDENTIAL_ATTEMPTS: u32 = 3;

/// Username paired with a token for HTTPS pushes.
const TOKEN_USERNAME: &str = "x-access-token";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    author_name: String,
    author_email: String,
    token_env: String,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let defaults = GitConfig::default();
        Git2Repository {
            repo,
            author_name: defaults.author_name,
            author_email: defaults.author_email,
            token_env: defaults.token_env,
        }
    }

    /// Use the fallback identity and token variable from `config`
    pub fn with_config(mut self, config: &GitConfig) -> Self {
        self.author_name = config.author_name.clone();
        self.author_email = config.author_email.clone();
        self.token_env = config.token_env.clone();
        self
    }

    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(sig) => Ok(sig),
            Err(e) => {
                tracing::debug!("no repository signature ({}), using fallback identity", e);
                Ok(Signature::now(&self.author_name, &self.author_email)?)
            }
        }
    }

    /// Path of `path` relative to the work tree, as the index expects it
    fn workdir_relative(&self, path: &Path) -> Result<PathBuf> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| VersionBumpError::manifest("Repository has no work tree"))?;
        let workdir = workdir.canonicalize()?;
        let absolute = path.canonicalize().map_err(|e| {
            VersionBumpError::manifest(format!("Cannot resolve '{}': {}", path.display(), e))
        })?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                VersionBumpError::manifest(format!(
                    "'{}' is outside the repository at '{}'",
                    path.display(),
                    workdir.display()
                ))
            })
    }

    fn remote_callbacks(&self) -> git2::RemoteCallbacks<'static> {
        let token = std::env::var(&self.token_env).ok().filter(|t| !t.is_empty());
        let mut attempts = 0;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Some(token) = &token {
                    return Cred::userpass_plaintext(TOKEN_USERNAME, token);
                }
            }

            if allowed_types.contains(CredentialType::SSH_KEY) {
                let user = username_from_url.unwrap_or("git");
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let key_path = home.join(".ssh").join(key);
                        if key_path.exists() {
                            if let Ok(cred) = Cred::ssh_key(user, None, &key_path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }

                if let Ok(cred) = Cred::ssh_key_from_agent(user) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| VersionBumpError::branch(format!("Cannot resolve HEAD: {}", e)))?;

        if !head.is_branch() {
            return Err(VersionBumpError::branch("HEAD is detached"));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| VersionBumpError::branch("Branch name is not valid UTF-8"))
    }

    fn head_commit(&self) -> Result<CommitInfo> {
        let commit = self.repo.head()?.peel_to_commit()?;

        let lines_changed = if commit.parent_count() == 0 {
            None
        } else {
            let parent_tree = commit.parent(0)?.tree()?;
            let tree = commit.tree()?;
            let diff = self
                .repo
                .diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;
            let stats = diff.stats()?;
            Some(stats.insertions() + stats.deletions())
        };

        let author = commit.author().name().unwrap_or("unknown").to_string();

        Ok(CommitInfo {
            hash: commit.id().to_string(),
            message: commit.message().unwrap_or("(empty message)").to_string(),
            author,
            lines_changed,
        })
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<Option<String>> {
        let relative = self.workdir_relative(path)?;

        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let parent = self.repo.head()?.peel_to_commit()?;
        if parent.tree_id() == tree_id {
            tracing::debug!("tree {} unchanged, skipping commit", tree_id);
            return Ok(None);
        }

        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.signature()?;
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(Some(oid.to_string()))
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| VersionBumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(self.remote_callbacks());

        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    VersionBumpError::remote(format!("Network error during push: {}", e))
                }
                git2::ErrorClass::Reference => {
                    VersionBumpError::remote(format!("Reference error during push: {}", e))
                }
                _ => VersionBumpError::remote(format!(
                    "Failed to push '{}' to '{}': {}",
                    branch, remote, e
                )),
            })
    }
}
