//! Build project model
//!
//! A `BuildProject` is the live build state the promotable artifacts file is
//! written from: the primary artifact, the attached artifacts in order, and
//! the build output directory. It is read from a TOML project manifest
//! (promote-project.toml):
//!
//! ```toml
//! group_id = "com.example"
//! artifact_id = "demo"
//! version = "1.0.0"
//! build_directory = "target"
//!
//! [artifact]
//! type = "jar"
//! file = "target/demo-1.0.0.jar"
//!
//! [[attached]]
//! classifier = "sources"
//! file = "target/demo-1.0.0-sources.jar"
//! ```
//!
//! Artifact entries inherit the project coordinates they leave out.

use promote_descriptor::ArtifactDescriptor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_ARTIFACT_TYPE, DEFAULT_BUILD_DIRECTORY};

/// Errors loading a project manifest
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Failed to read project manifest: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Artifact entry as written in the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactEntry {
    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub artifact_id: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Defaults to the version's base form
    #[serde(default)]
    pub base_version: Option<String>,

    /// Packaging type (default: "jar")
    #[serde(rename = "type", default)]
    pub artifact_type: Option<String>,

    #[serde(default)]
    pub classifier: Option<String>,

    #[serde(default)]
    pub scope: Option<String>,

    /// Artifact file, relative to the manifest directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Project manifest (promote-project.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub artifact_id: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Build output directory (default: "target")
    #[serde(default)]
    pub build_directory: Option<PathBuf>,

    /// Primary artifact; a project may have none (e.g. pom-only aggregators)
    #[serde(default)]
    pub artifact: Option<ArtifactEntry>,

    /// Attached artifacts, in attachment order
    #[serde(default)]
    pub attached: Vec<ArtifactEntry>,
}

/// Live build state: the artifacts a build produced and where it wrote them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProject {
    /// Build output directory; the promotable artifacts file lands here
    pub build_directory: PathBuf,

    pub artifact: Option<ArtifactDescriptor>,

    pub attached: Vec<ArtifactDescriptor>,
}

impl BuildProject {
    /// A project with no artifacts yet
    pub fn new(build_directory: impl Into<PathBuf>) -> Self {
        Self {
            build_directory: build_directory.into(),
            artifact: None,
            attached: Vec::new(),
        }
    }

    pub fn with_artifact(mut self, artifact: ArtifactDescriptor) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Attach a secondary artifact after those already attached
    pub fn attach(mut self, artifact: ArtifactDescriptor) -> Self {
        self.attached.push(artifact);
        self
    }

    /// Load a project from its manifest file.
    ///
    /// Relative paths in the manifest are taken from the manifest's directory.
    pub fn from_manifest(path: &Path) -> Result<Self, ProjectError> {
        let contents = fs::read_to_string(path)?;
        let root = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_str(&contents, root)
    }

    /// Parse a manifest; relative paths are joined onto `root`
    pub fn from_str(s: &str, root: &Path) -> Result<Self, ProjectError> {
        let manifest: ProjectManifest = toml::from_str(s)?;
        manifest.into_project(root)
    }
}

impl ProjectManifest {
    /// Resolve inherited coordinates and paths into a `BuildProject`
    pub fn into_project(self, root: &Path) -> Result<BuildProject, ProjectError> {
        let build_directory = root.join(
            self.build_directory
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIRECTORY)),
        );

        let artifact = match &self.artifact {
            Some(entry) => Some(self.descriptor(entry, root, "artifact")?),
            None => None,
        };

        let attached = self
            .attached
            .iter()
            .enumerate()
            .map(|(i, entry)| self.descriptor(entry, root, &format!("attached[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BuildProject {
            build_directory,
            artifact,
            attached,
        })
    }

    fn descriptor(
        &self,
        entry: &ArtifactEntry,
        root: &Path,
        label: &str,
    ) -> Result<ArtifactDescriptor, ProjectError> {
        let group_id = inherit(&entry.group_id, &self.group_id, "group_id", label)?;
        let artifact_id = inherit(&entry.artifact_id, &self.artifact_id, "artifact_id", label)?;
        let version = inherit(&entry.version, &self.version, "version", label)?;
        let artifact_type = entry
            .artifact_type
            .clone()
            .unwrap_or_else(|| DEFAULT_ARTIFACT_TYPE.to_string());

        let mut descriptor = ArtifactDescriptor::new(group_id, artifact_id, version, artifact_type);
        if let Some(base_version) = &entry.base_version {
            descriptor = descriptor.with_base_version(base_version.as_str());
        }
        descriptor.classifier = entry.classifier.clone();
        descriptor.scope = entry.scope.clone();
        descriptor.file = entry.file.as_ref().map(|file| root.join(file));
        Ok(descriptor)
    }
}

fn inherit(
    own: &Option<String>,
    project: &Option<String>,
    field: &str,
    label: &str,
) -> Result<String, ProjectError> {
    match own.as_ref().or(project.as_ref()) {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(ProjectError::ValidationError(format!(
            "{label}: '{field}' is missing and not set on the project"
        ))),
    }
}
