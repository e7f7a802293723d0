//! The JSON file that stores the persisted version.
//!
//! Only the version field is touched; every other field, and the order of
//! fields, survives a load/save cycle.

use crate::domain::Version;
use crate::error::{Result, VersionBumpError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded JSON configuration record holding a version field
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    field: String,
    document: Value,
}

impl Manifest {
    /// Reads and parses the file at `path`.
    pub fn load(path: impl AsRef<Path>, field: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            VersionBumpError::manifest(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::parse(path, field, &contents)
    }

    /// Parses manifest contents that were read from `path`.
    ///
    /// The top level must be a JSON object. The version field itself is checked
    /// lazily by [`Manifest::version`].
    pub fn parse(path: impl Into<PathBuf>, field: impl Into<String>, contents: &str) -> Result<Self> {
        let path = path.into();
        let document: Value = serde_json::from_str(contents)?;
        if !document.is_object() {
            return Err(VersionBumpError::manifest(format!(
                "'{}' must contain a JSON object",
                path.display()
            )));
        }

        Ok(Manifest {
            path,
            field: field.into(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored version, failing if the field is missing or malformed.
    pub fn version(&self) -> Result<Version> {
        match self.document.get(&self.field) {
            Some(Value::String(raw)) => Version::parse(raw),
            Some(other) => Err(VersionBumpError::manifest(format!(
                "Field '{}' in '{}' must be a string, found {}",
                self.field,
                self.path.display(),
                other
            ))),
            None => Err(VersionBumpError::manifest(format!(
                "Field '{}' is missing from '{}'",
                self.field,
                self.path.display()
            ))),
        }
    }

    /// Replaces the version field in memory.
    pub fn set_version(&mut self, version: &Version) {
        if let Value::Object(map) = &mut self.document {
            map.insert(self.field.clone(), Value::String(version.to_string()));
        }
    }

    /// Pretty-printed document with a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut rendered = serde_json::to_string_pretty(&self.document)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Overwrites the file on disk with the current document.
    pub fn save(&self) -> Result<()> {
        let rendered = self.to_json_string()?;
        fs::write(&self.path, rendered).map_err(|e| {
            VersionBumpError::manifest(format!("Cannot write '{}': {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Manifest> {
        Manifest::parse("config.json", "version", contents)
    }

    #[test]
    fn test_reads_version() {
        let manifest = parse(r#"{"name": "app", "version": "1.2.3"}"#).unwrap();
        assert_eq!(manifest.version().unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_missing_field_fails() {
        let manifest = parse(r#"{"name": "app"}"#).unwrap();
        let err = manifest.version().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_non_string_field_fails() {
        let manifest = parse(r#"{"version": 123}"#).unwrap();
        assert!(matches!(
            manifest.version(),
            Err(VersionBumpError::Manifest(_))
        ));
    }

    #[test]
    fn test_malformed_version_fails() {
        let manifest = parse(r#"{"version": "1.2"}"#).unwrap();
        assert!(matches!(manifest.version(), Err(VersionBumpError::Version(_))));
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(parse(r#"["1.2.3"]"#).is_err());
        assert!(parse("not json").is_err());
    }

    #[test]
    fn test_set_version_preserves_other_fields_and_order() {
        let mut manifest =
            parse(r#"{"name": "app", "version": "0.3.4", "debug": true, "nested": {"a": 1}}"#)
                .unwrap();
        manifest.set_version(&Version::new(0, 4, 0));

        let rendered = manifest.to_json_string().unwrap();
        assert!(rendered.ends_with("}\n"));

        let name_pos = rendered.find("\"name\"").unwrap();
        let version_pos = rendered.find("\"version\"").unwrap();
        let debug_pos = rendered.find("\"debug\"").unwrap();
        assert!(name_pos < version_pos && version_pos < debug_pos);

        let reparsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(reparsed["version"], "0.4.0");
        assert_eq!(reparsed["debug"], true);
        assert_eq!(reparsed["nested"]["a"], 1);
    }

    #[test]
    fn test_custom_field() {
        let mut manifest =
            Manifest::parse("app.json", "appVersion", r#"{"appVersion": "2.0.9"}"#).unwrap();
        assert_eq!(manifest.version().unwrap(), Version::new(2, 0, 9));
        manifest.set_version(&Version::new(2, 1, 0));
        assert_eq!(manifest.version().unwrap(), Version::new(2, 1, 0));
    }

    #[test]
    fn test_load_and_save_round_trip_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{\n  \"version\": \"1.9.9\"\n}\n").unwrap();

        let mut manifest = Manifest::load(&path, "version").unwrap();
        let next = manifest
            .version()
            .unwrap()
            .bump(crate::domain::BumpDecision::Minor);
        manifest.set_version(&next);
        manifest.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"version\": \"2.0.0\"\n}\n");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Manifest::load("/definitely/not/here.json", "version").unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
