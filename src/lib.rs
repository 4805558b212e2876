//! Promote Artifacts - hand build outputs over to a later promotion step
//!
//! The build step records its primary and attached artifacts in
//! `promotable-artifacts.properties` inside the build directory. A separate
//! promotion step reads that file to find the same artifacts again without
//! rebuilding. The encoding itself lives in the `promote-descriptor` crate.

pub mod config;
pub mod logging;
pub mod project;
pub mod promotable;

pub use config::{ConfigError, ConfigOverrides, PromoteConfig};
pub use project::{BuildProject, ProjectError};
pub use promotable::{make_promotable, read_promotable, PromoteError, FILENAME};
pub use promote_descriptor::{ArtifactDescriptor, BasePath, DescriptorSet, PromotableArtifacts};
