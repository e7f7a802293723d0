use std::fmt;

/// Which version component a push bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpDecision {
    Major,
    Minor,
}

impl fmt::Display for BumpDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpDecision::Major => write!(f, "major"),
            BumpDecision::Minor => write!(f, "minor"),
        }
    }
}

/// The inputs to a bump decision: the latest commit message and its diff size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpEvent {
    pub message: String,
    /// Lines added plus lines removed relative to the previous commit
    pub lines_changed: usize,
}

impl BumpEvent {
    pub fn new(message: impl Into<String>, lines_changed: usize) -> Self {
        BumpEvent {
            message: message.into(),
            lines_changed,
        }
    }
}

pub const DEFAULT_MAJOR_MARKER: &str = "[MAJOR]";
pub const DEFAULT_MINOR_MARKER: &str = "[MINOR]";
pub const DEFAULT_MAJOR_LINE_THRESHOLD: usize = 100;

/// Marker strings and the diff-size threshold used to pick a [`BumpDecision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpRules {
    pub major_marker: String,
    pub minor_marker: String,
    /// Diffs strictly larger than this are a major bump
    pub major_line_threshold: usize,
}

impl Default for BumpRules {
    fn default() -> Self {
        BumpRules {
            major_marker: DEFAULT_MAJOR_MARKER.to_string(),
            minor_marker: DEFAULT_MINOR_MARKER.to_string(),
            major_line_threshold: DEFAULT_MAJOR_LINE_THRESHOLD,
        }
    }
}

impl BumpRules {
    /// Decide the bump category for an event.
    ///
    /// Explicit markers win over the diff-size heuristic, and the major
    /// marker wins over the minor one.
    pub fn decide(&self, event: &BumpEvent) -> BumpDecision {
        if event.message.contains(&self.major_marker) {
            BumpDecision::Major
        } else if event.message.contains(&self.minor_marker) {
            BumpDecision::Minor
        } else if event.lines_changed > self.major_line_threshold {
            BumpDecision::Major
        } else {
            BumpDecision::Minor
        }
    }
}
