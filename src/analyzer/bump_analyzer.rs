use crate::domain::{BumpDecision, BumpEvent, BumpRules};
use crate::error::Result;
use crate::git::{CommitInfo, Repository};

/// Outcome of analyzing one commit
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub event: BumpEvent,
    pub decision: BumpDecision,
    /// False when the diff size could not be computed and 0 was used
    pub lines_known: bool,
}

/// Analyzes the latest commit to determine the bump category
pub struct BumpAnalyzer {
    rules: BumpRules,
}

impl BumpAnalyzer {
    /// Create a new bump analyzer
    pub fn new(rules: BumpRules) -> Self {
        BumpAnalyzer { rules }
    }

    /// Analyze the commit at HEAD of a repository
    pub fn analyze_head<R: Repository>(&self, repo: &R) -> Result<Analysis> {
        let head = repo.head_commit()?;
        Ok(self.analyze_commit(&head))
    }

    /// Analyze a single commit; an unknown diff size counts as 0
    pub fn analyze_commit(&self, commit: &CommitInfo) -> Analysis {
        let event = BumpEvent::new(commit.message.clone(), commit.lines_changed.unwrap_or(0));
        let decision = self.rules.decide(&event);
        tracing::debug!(
            lines_changed = event.lines_changed,
            %decision,
            "analyzed commit {}",
            commit.hash
        );

        Analysis {
            event,
            decision,
            lines_known: commit.lines_changed.is_some(),
        }
    }
}
