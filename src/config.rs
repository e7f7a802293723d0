use crate::domain::bump::{
    BumpRules, DEFAULT_MAJOR_LINE_THRESHOLD, DEFAULT_MAJOR_MARKER, DEFAULT_MINOR_MARKER,
};
use crate::domain::Version;
use crate::error::{Result, VersionBumpError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "versionbump.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".versionbump.toml";

/// Placeholder replaced by the new version in the commit message template.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Represents the complete configuration for version-bump.
///
/// Contains the location of the versioned JSON file, the bump rules and the git settings
/// used to commit and push the result.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_version_field() -> String {
    "version".to_string()
}

/// Where the persisted version lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,

    #[serde(default = "default_version_field")]
    pub field: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
            field: default_version_field(),
        }
    }
}

fn default_major_marker() -> String {
    DEFAULT_MAJOR_MARKER.to_string()
}

fn default_minor_marker() -> String {
    DEFAULT_MINOR_MARKER.to_string()
}

fn default_major_line_threshold() -> usize {
    DEFAULT_MAJOR_LINE_THRESHOLD
}

/// Configuration for the bump decision.
///
/// Markers are matched as literal, case-sensitive substrings of the commit message.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RulesConfig {
    #[serde(default = "default_major_marker")]
    pub major_marker: String,

    #[serde(default = "default_minor_marker")]
    pub minor_marker: String,

    #[serde(default = "default_major_line_threshold")]
    pub major_line_threshold: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            major_marker: default_major_marker(),
            minor_marker: default_minor_marker(),
            major_line_threshold: default_major_line_threshold(),
        }
    }
}

impl RulesConfig {
    pub fn to_bump_rules(&self) -> BumpRules {
        BumpRules {
            major_marker: self.major_marker.clone(),
            minor_marker: self.minor_marker.clone(),
            major_line_threshold: self.major_line_threshold,
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    format!("Bump version to {}", VERSION_PLACEHOLDER)
}

fn default_author_name() -> String {
    "github-actions[bot]".to_string()
}

fn default_author_email() -> String {
    "41898282+github-actions[bot]@users.noreply.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

/// Configuration for committing and pushing the bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    /// Branch whose pushes trigger a bump; also the push target
    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Commit message template, `{version}` is replaced by the new version
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Fallback author name when the repository has no `user.name`
    #[serde(default = "default_author_name")]
    pub author_name: String,

    /// Fallback author email when the repository has no `user.email`
    #[serde(default = "default_author_email")]
    pub author_email: String,

    /// Environment variable holding the repository-write token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            branch: default_branch(),
            remote: default_remote(),
            commit_message: default_commit_message(),
            author_name: default_author_name(),
            author_email: default_author_email(),
            token_env: default_token_env(),
        }
    }
}

impl GitConfig {
    /// Renders the commit message for a new version.
    pub fn commit_message_for(&self, version: &Version) -> String {
        self.commit_message
            .replace(VERSION_PLACEHOLDER, &version.to_string())
    }

    /// Whether a commit message was produced by a previous bump.
    ///
    /// Only an exact rendering of the template for some valid version matches,
    /// ignoring surrounding whitespace.
    pub fn is_bump_commit(&self, message: &str) -> bool {
        let message = message.trim();
        let Some(idx) = self.commit_message.find(VERSION_PLACEHOLDER) else {
            return false;
        };
        let Some(rest) = message.strip_prefix(&self.commit_message[..idx]) else {
            return false;
        };

        // The suffix may itself start with digits or dots, so try every split.
        let candidate_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        (1..=candidate_len).rev().any(|end| match Version::parse(&rest[..end]) {
            Ok(version) => self.commit_message_for(&version).trim() == message,
            Err(_) => false,
        })
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.manifest.field.trim().is_empty() {
            return Err(VersionBumpError::config("manifest.field must not be empty"));
        }
        if self.rules.major_marker.is_empty() || self.rules.minor_marker.is_empty() {
            return Err(VersionBumpError::config("bump markers must not be empty"));
        }
        if self.git.branch.trim().is_empty() {
            return Err(VersionBumpError::config("git.branch must not be empty"));
        }
        if self.git.remote.trim().is_empty() {
            return Err(VersionBumpError::config("git.remote must not be empty"));
        }
        Ok(())
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| VersionBumpError::config(format!("Invalid TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionbump.toml` in current directory
/// 3. `.versionbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            VersionBumpError::config(format!("Cannot read config file '{}': {}", path, e))
        })?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
