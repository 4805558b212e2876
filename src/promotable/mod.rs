//! Promotable artifacts file
//!
//! At packaging time the project's artifacts are encoded into one flat
//! property set and written to `promotable-artifacts.properties` in the build
//! directory. The promotion step later reads that file back and decodes the
//! primary artifact plus every `attached.<n>` entry.

use chrono::Utc;
use promote_descriptor::{
    attached_prefix, decode_all, encode, read_properties, write_properties, BasePath,
    DescriptorSet, PromotableArtifacts, PropertiesError, PRIMARY_PREFIX,
};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::PromoteConfig;
use crate::project::BuildProject;

/// File in which artifact information is kept between build and promotion
pub const FILENAME: &str = "promotable-artifacts.properties";

/// Errors writing or reading the promotable artifacts file
#[derive(Debug, thiserror::Error)]
pub enum PromoteError {
    #[error("Error writing artifacts to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading artifacts from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing artifacts in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },
}

/// Path of the promotable artifacts file for a build directory
pub fn properties_file(build_directory: &Path) -> PathBuf {
    build_directory.join(FILENAME)
}

/// Base against which artifact paths are stored
pub fn target_base(build_directory: &Path) -> BasePath {
    BasePath::new(build_directory)
}

/// Encode the project's artifacts into one property set.
///
/// The primary artifact goes under `artifact.`, attached artifacts under
/// `attached.<index>.` in attachment order.
pub fn collect(project: &BuildProject, base: Option<&BasePath>) -> DescriptorSet {
    let mut properties = DescriptorSet::new();

    match &project.artifact {
        Some(artifact) => {
            info!("Artifact: {}", artifact.id());
            let encoded = encode(artifact, Some(PRIMARY_PREFIX), base);
            debug!("Artifact properties: {:?}", encoded);
            properties.merge(encoded);
        }
        None => debug!("No main artifact found"),
    }

    for (index, attached) in project.attached.iter().enumerate() {
        info!("Attached artifact: {}", attached.id());
        let encoded = encode(attached, Some(&attached_prefix(index)), base);
        debug!("Attached artifact properties: {:?}", encoded);
        properties.merge(encoded);
    }

    properties
}

/// Write the promotable artifacts file for `project`.
///
/// Returns the path written. The build directory is created if needed.
pub fn make_promotable(
    project: &BuildProject,
    config: &PromoteConfig,
) -> Result<PathBuf, PromoteError> {
    let base = target_base(&project.build_directory);
    let properties = collect(project, config.relative_paths.then_some(&base));

    let path = properties_file(&project.build_directory);
    let write_err = |source| PromoteError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(&project.build_directory).map_err(write_err)?;
    info!("Writing artifact information to {}", path.display());
    let file = File::create(&path).map_err(write_err)?;
    write_properties(
        &properties,
        Some(&config.comment),
        Utc::now(),
        BufWriter::new(file),
    )
    .map_err(write_err)?;
    debug!("Written artifact properties: {:?}", properties);

    Ok(path)
}

/// Read back the artifacts recorded in `build_directory`.
pub fn read_promotable(build_directory: &Path) -> Result<PromotableArtifacts, PromoteError> {
    let path = properties_file(build_directory);
    let file = File::open(&path).map_err(|source| PromoteError::Read {
        path: path.clone(),
        source,
    })?;

    let properties = read_properties(BufReader::new(file)).map_err(|err| match err {
        PropertiesError::Io(source) => PromoteError::Read {
            path: path.clone(),
            source,
        },
        other => PromoteError::Parse {
            path: path.clone(),
            source: other,
        },
    })?;

    let artifacts = decode_all(&properties, Some(&target_base(build_directory)));
    debug!(
        "Read {} artifact(s) from {}",
        artifacts.len(),
        path.display()
    );
    Ok(artifacts)
}
