/// The branch a run happens on, relative to the branch that should trigger bumps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub trigger: String,
}

impl BranchContext {
    /// Create a new branch context
    pub fn new(name: impl Into<String>, trigger: impl Into<String>) -> Self {
        BranchContext {
            name: name.into(),
            trigger: trigger.into(),
        }
    }

    /// Check if pushes to this branch should bump the version
    pub fn is_trigger_branch(&self) -> bool {
        self.name == self.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_branch() {
        let branch = BranchContext::new("main", "main");
        assert!(branch.is_trigger_branch());
    }

    #[test]
    fn test_feature_branch() {
        let branch = BranchContext::new("feature/login", "main");
        assert!(!branch.is_trigger_branch());
    }

    #[test]
    fn test_custom_trigger() {
        assert!(BranchContext::new("master", "master").is_trigger_branch());
        assert!(!BranchContext::new("main", "master").is_trigger_branch());
    }
}
