//! Main workflow orchestration logic
//!
//! Keeps CLI argument parsing in `main.rs` apart from the bump itself, which
//! runs against any [`Repository`] so it can be exercised with a mock.

use std::path::PathBuf;

use crate::analyzer::BumpAnalyzer;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchContext, BumpDecision, BumpEvent, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::manifest::Manifest;

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// JSON file holding the version
    pub manifest_path: PathBuf,

    /// Run even off the trigger branch or on a bump commit
    pub force: bool,

    /// Compute the new version without writing, committing or pushing
    pub dry_run: bool,

    /// Commit but do not push
    pub no_push: bool,
}

impl BumpWorkflowArgs {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        BumpWorkflowArgs {
            manifest_path: manifest_path.into(),
            force: false,
            dry_run: false,
            no_push: false,
        }
    }
}

/// Result of a bump that got as far as computing a new version
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub previous: Version,
    pub version: Version,
    pub decision: BumpDecision,
    pub event: BumpEvent,
    /// Branch the commit was made on
    pub branch: String,
    /// Hash of the bump commit, `None` for dry runs and no-op commits
    pub commit: Option<String>,
    pub pushed: bool,
    pub warnings: Vec<BoundaryWarning>,
}

/// What a workflow run did
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// Nothing was read or written
    Skipped(BoundaryWarning),
    Bumped(WorkflowResult),
}

/// Main bump workflow
///
/// 1. Check the run is on the trigger branch and not on a bump commit
/// 2. Decide the bump category from HEAD's message and diff size
/// 3. Read the current version and compute the next one
/// 4. Write the JSON file, commit it and push the branch
pub fn run_bump_workflow<R: Repository>(
    repo: &R,
    config: &Config,
    args: &BumpWorkflowArgs,
) -> Result<WorkflowOutcome> {
    let branch = BranchContext::new(repo.current_branch()?, config.git.branch.clone());
    if !branch.is_trigger_branch() && !args.force {
        return Ok(WorkflowOutcome::Skipped(BoundaryWarning::UntriggeredBranch {
            branch: branch.name,
            trigger: branch.trigger,
        }));
    }

    let head = repo.head_commit()?;
    if config.git.is_bump_commit(&head.message) && !args.force {
        return Ok(WorkflowOutcome::Skipped(BoundaryWarning::SelfBumpCommit {
            commit_hash: head.hash,
        }));
    }

    let mut warnings = Vec::new();
    let analysis = BumpAnalyzer::new(config.rules.to_bump_rules()).analyze_commit(&head);
    if !analysis.lines_known {
        warnings.push(BoundaryWarning::NoParentCommit {
            commit_hash: head.hash.clone(),
        });
    }

    let mut manifest = Manifest::load(&args.manifest_path, config.manifest.field.clone())?;
    let previous = manifest.version()?;
    let version = previous.bump(analysis.decision);
    tracing::info!(%previous, %version, decision = %analysis.decision, "computed new version");

    let mut result = WorkflowResult {
        previous,
        version,
        decision: analysis.decision,
        event: analysis.event,
        branch: branch.name,
        commit: None,
        pushed: false,
        warnings,
    };

    if args.dry_run {
        return Ok(WorkflowOutcome::Bumped(result));
    }

    manifest.set_version(&version);
    manifest.save()?;

    let message = config.git.commit_message_for(&version);
    result.commit = repo.commit_file(manifest.path(), &message)?;

    match &result.commit {
        None => {
            tracing::info!("nothing to commit");
            result.warnings.push(BoundaryWarning::NothingToCommit {
                version: version.to_string(),
            });
        }
        Some(hash) if !args.no_push => {
            tracing::info!(commit = %hash, remote = %config.git.remote, "pushing {}", result.branch);
            repo.push_branch(&config.git.remote, &result.branch)?;
            result.pushed = true;
        }
        Some(hash) => {
            tracing::info!(commit = %hash, "push skipped");
        }
    }

    Ok(WorkflowOutcome::Bumped(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use std::fs;
    use tempfile::TempDir;

    fn manifest_with(version: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            format!("{{\n  \"name\": \"demo\",\n  \"version\": \"{}\"\n}}\n", version),
        )
        .unwrap();
        (dir, path)
    }

    fn bumped(outcome: WorkflowOutcome) -> WorkflowResult {
        match outcome {
            WorkflowOutcome::Bumped(result) => result,
            WorkflowOutcome::Skipped(warning) => panic!("unexpected skip: {}", warning),
        }
    }

    #[test]
    fn test_large_diff_bumps_major_and_pushes() {
        let (_dir, path) = manifest_with("0.3.4");
        let repo = MockRepository::new("fix typo", Some(150));

        let result = bumped(
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap(),
        );

        assert_eq!(result.decision, BumpDecision::Major);
        assert_eq!(result.version.to_string(), "0.4.0");
        assert!(result.pushed);
        assert!(fs::read_to_string(&path).unwrap().contains("\"0.4.0\""));

        let commits = repo.commits();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].message, "Bump version to 0.4.0");
        assert_eq!(
            repo.pushes(),
            vec![("origin".to_string(), "main".to_string())]
        );
    }

    #[test]
    fn test_minor_rollover_into_software() {
        let (_dir, path) = manifest_with("1.9.9");
        let repo = MockRepository::new("small fix", Some(2));

        let result = bumped(
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap(),
        );
        assert_eq!(result.previous.to_string(), "1.9.9");
        assert_eq!(result.version.to_string(), "2.0.0");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_dir, path) = manifest_with("1.2.3");
        let before = fs::read_to_string(&path).unwrap();
        let repo = MockRepository::new("[MAJOR] rewrite", Some(1));
        let args = BumpWorkflowArgs {
            dry_run: true,
            ..BumpWorkflowArgs::new(&path)
        };

        let result = bumped(run_bump_workflow(&repo, &Config::default(), &args).unwrap());
        assert_eq!(result.version.to_string(), "1.3.0");
        assert_eq!(result.commit, None);
        assert!(!result.pushed);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_no_push_commits_only() {
        let (_dir, path) = manifest_with("1.2.3");
        let repo = MockRepository::new("tweak", Some(1));
        let args = BumpWorkflowArgs {
            no_push: true,
            ..BumpWorkflowArgs::new(&path)
        };

        let result = bumped(run_bump_workflow(&repo, &Config::default(), &args).unwrap());
        assert!(result.commit.is_some());
        assert!(!result.pushed);
        assert!(repo.pushes().is_empty());
    }

    #[test]
    fn test_unchanged_file_is_not_committed() {
        let (_dir, path) = manifest_with("1.2.3");
        let repo = MockRepository::new("tweak", Some(1));
        // The tree already holds what the bump will write.
        fs::write(
            &path,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.2.4\"\n}\n",
        )
        .unwrap();
        repo.snapshot(&path).unwrap();
        fs::write(
            &path,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.2.3\"\n}\n",
        )
        .unwrap();

        let result = bumped(
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap(),
        );
        assert_eq!(result.commit, None);
        assert!(!result.pushed);
        assert!(result.warnings.contains(&BoundaryWarning::NothingToCommit {
            version: "1.2.4".to_string()
        }));
        assert!(repo.pushes().is_empty());
    }

    #[test]
    fn test_root_commit_warns_and_uses_zero_lines() {
        let (_dir, path) = manifest_with("0.0.0");
        let repo = MockRepository::new("initial commit", None);

        let result = bumped(
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap(),
        );
        assert_eq!(result.event.lines_changed, 0);
        assert_eq!(result.version.to_string(), "0.0.1");
        assert!(matches!(
            result.warnings.first(),
            Some(BoundaryWarning::NoParentCommit { .. })
        ));
    }

    #[test]
    fn test_other_branch_is_skipped() {
        let (_dir, path) = manifest_with("1.2.3");
        let mut repo = MockRepository::new("feature work", Some(1));
        repo.set_branch(Some("feature/x"));

        let outcome =
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap();
        assert!(matches!(
            outcome,
            WorkflowOutcome::Skipped(BoundaryWarning::UntriggeredBranch { .. })
        ));
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_force_runs_on_other_branch_and_pushes_it() {
        let (_dir, path) = manifest_with("1.2.3");
        let mut repo = MockRepository::new("feature work", Some(1));
        repo.set_branch(Some("release"));
        let args = BumpWorkflowArgs {
            force: true,
            ..BumpWorkflowArgs::new(&path)
        };

        let result = bumped(run_bump_workflow(&repo, &Config::default(), &args).unwrap());
        assert_eq!(result.branch, "release");
        assert_eq!(
            repo.pushes(),
            vec![("origin".to_string(), "release".to_string())]
        );
    }

    #[test]
    fn test_bump_commit_is_skipped() {
        let (_dir, path) = manifest_with("1.2.3");
        let repo = MockRepository::new("Bump version to 1.2.3", Some(1));

        let outcome =
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap();
        assert!(matches!(
            outcome,
            WorkflowOutcome::Skipped(BoundaryWarning::SelfBumpCommit { .. })
        ));
    }

    #[test]
    fn test_human_message_starting_like_a_bump_still_bumps() {
        let (_dir, path) = manifest_with("0.3.4");
        let repo = MockRepository::new("Bump version to serde 2.0 [MAJOR]", Some(500));

        let result = bumped(
            run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path)).unwrap(),
        );
        assert_eq!(result.decision, BumpDecision::Major);
        assert_eq!(result.version.to_string(), "0.4.0");
        assert_eq!(repo.commits().len(), 1);
    }

    #[test]
    fn test_malformed_version_fails_loudly() {
        let (_dir, path) = manifest_with("one.two.three");
        let repo = MockRepository::new("tweak", Some(1));

        let err = run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path))
            .unwrap_err();
        assert!(err.to_string().contains("Version parsing error"));
        assert!(repo.commits().is_empty());
    }

    #[test]
    fn test_push_failure_is_fatal() {
        let (_dir, path) = manifest_with("1.2.3");
        let mut repo = MockRepository::new("tweak", Some(1));
        repo.fail_pushes("permission denied");

        let err = run_bump_workflow(&repo, &Config::default(), &BumpWorkflowArgs::new(&path))
            .unwrap_err();
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(repo.commits().len(), 1);
    }

    #[test]
    fn test_custom_remote_branch_and_message() {
        let (_dir, path) = manifest_with("4.5.6");
        let mut repo = MockRepository::new("ship it", Some(1));
        repo.set_branch(Some("trunk"));

        let mut config = Config::default();
        config.git.branch = "trunk".to_string();
        config.git.remote = "upstream".to_string();
        config.git.commit_message = "chore(release): {version}".to_string();

        let result =
            bumped(run_bump_workflow(&repo, &config, &BumpWorkflowArgs::new(&path)).unwrap());
        assert_eq!(result.version.to_string(), "4.5.7");
        assert_eq!(repo.commits()[0].message, "chore(release): 4.5.7");
        assert_eq!(
            repo.pushes(),
            vec![("upstream".to_string(), "trunk".to_string())]
        );
    }
}
