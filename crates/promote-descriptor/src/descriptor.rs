//! Artifact descriptor model.
//!
//! An `ArtifactDescriptor` carries the coordinates of one build output plus
//! the location of its file. Descriptors built from live build state have no
//! handler; descriptors rebuilt by [`crate::decode`] carry an
//! [`ArtifactHandler`] with the type and extension inferred at decode time.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Qualifier that replaces the timestamp of a resolved snapshot version.
pub const SNAPSHOT_QUALIFIER: &str = "SNAPSHOT";

/// Type and extension inferred for a decoded artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactHandler {
    /// Effective type (declared type, or the file extension when blank)
    #[serde(rename = "type")]
    pub artifact_type: String,

    /// Extension of the stored file path (empty when unknown)
    pub extension: String,
}

impl ArtifactHandler {
    /// Infer a handler from a declared type and the stored file path.
    ///
    /// The extension always comes from `path`. A blank `declared_type` falls
    /// back to that extension.
    pub fn infer(declared_type: &str, path: Option<&str>) -> Self {
        let extension = path.map(extension_of).unwrap_or_default();
        let artifact_type = if declared_type.trim().is_empty() {
            extension.clone()
        } else {
            declared_type.to_string()
        };
        Self {
            artifact_type,
            extension,
        }
    }
}

/// A single build artifact: coordinates, type, classifier and file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub group_id: String,
    pub artifact_id: String,

    /// Version, possibly a resolved snapshot (`1.0-20240101.120000-3`)
    pub version: String,

    /// Unresolved form of `version` (`1.0-SNAPSHOT`)
    pub base_version: String,

    /// Packaging type as declared (may be empty)
    #[serde(rename = "type")]
    pub artifact_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,

    /// Informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<ArtifactHandler>,
}

impl ArtifactDescriptor {
    /// Create a descriptor; the base version is derived from `version`.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        artifact_type: impl Into<String>,
    ) -> Self {
        let version = version.into();
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            base_version: base_version_of(&version),
            version,
            artifact_type: artifact_type.into(),
            classifier: None,
            scope: None,
            file: None,
            handler: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_base_version(mut self, base_version: impl Into<String>) -> Self {
        self.base_version = base_version.into();
        self
    }

    /// Display identity: `groupId:artifactId:type[:classifier]:baseVersion`.
    pub fn id(&self) -> String {
        let mut id = format!("{}:{}:{}", self.group_id, self.artifact_id, self.artifact_type);
        if let Some(classifier) = &self.classifier {
            id.push(':');
            id.push_str(classifier);
        }
        id.push(':');
        id.push_str(&self.base_version);
        id
    }

    /// Type used downstream: the handler's inferred type when decoded,
    /// otherwise the declared type.
    pub fn effective_type(&self) -> &str {
        match &self.handler {
            Some(handler) => &handler.artifact_type,
            None => &self.artifact_type,
        }
    }

    /// File extension of the artifact, if known.
    pub fn extension(&self) -> Option<&str> {
        self.handler.as_ref().map(|h| h.extension.as_str())
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

impl fmt::Display for ArtifactDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

fn snapshot_timestamp() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.*)-([0-9]{8}\.[0-9]{6})-([0-9]+)$").expect("snapshot pattern is valid")
    })
}

/// Derive the base version of `version`.
///
/// A timestamped snapshot (`1.0-20240101.120000-3`) maps to `1.0-SNAPSHOT`;
/// every other version is its own base version.
pub fn base_version_of(version: &str) -> String {
    match snapshot_timestamp().captures(version) {
        Some(caps) => format!("{}-{}", &caps[1], SNAPSHOT_QUALIFIER),
        None => version.to_string(),
    }
}

/// Extension of the last segment of `path`, empty when it has none.
///
/// Both `/` and `\` count as separators so stored paths from either
/// platform give the same answer.
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) => name[dot + 1..].to_string(),
        None => String::new(),
    }
}
