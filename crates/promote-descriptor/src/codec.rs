//! Descriptor encoding and decoding.
//!
//! `encode` flattens one descriptor into prefixed keys; `decode` rebuilds it
//! from the keys under one prefix. A descriptor exists at a prefix exactly
//! when `<prefix>id` is present.

use serde::Serialize;

use crate::descriptor::{base_version_of, ArtifactDescriptor, ArtifactHandler};
use crate::path::BasePath;
use crate::prefix::{
    attached_prefix, normalize_prefix, KEY_ARTIFACT_ID, KEY_BASE_VERSION, KEY_CLASSIFIER,
    KEY_FILE, KEY_GROUP_ID, KEY_ID, KEY_SCOPE, KEY_TYPE, KEY_VERSION, PRIMARY_PREFIX,
};
use crate::set::DescriptorSet;

/// Encode `descriptor` under `prefix`.
///
/// `scope`, `classifier` and `file` are omitted when absent. With a `base`
/// the file is stored relative to it, otherwise as given.
pub fn encode(
    descriptor: &ArtifactDescriptor,
    prefix: Option<&str>,
    base: Option<&BasePath>,
) -> DescriptorSet {
    let prefix = normalize_prefix(prefix);
    let key = |field: &str| format!("{prefix}{field}");

    let mut out = DescriptorSet::new();
    out.insert(key(KEY_ID), descriptor.id());
    out.insert(key(KEY_GROUP_ID), descriptor.group_id.as_str());
    out.insert(key(KEY_ARTIFACT_ID), descriptor.artifact_id.as_str());
    out.insert(key(KEY_VERSION), descriptor.version.as_str());
    if let Some(scope) = &descriptor.scope {
        out.insert(key(KEY_SCOPE), scope.as_str());
    }
    out.insert(key(KEY_TYPE), descriptor.artifact_type.as_str());
    if let Some(classifier) = &descriptor.classifier {
        out.insert(key(KEY_CLASSIFIER), classifier.as_str());
    }
    if let Some(file) = &descriptor.file {
        let stored = match base {
            Some(base) => base.relativize(file),
            None => file.to_string_lossy().into_owned(),
        };
        out.insert(key(KEY_FILE), stored);
    }
    out.insert(key(KEY_BASE_VERSION), descriptor.base_version.as_str());
    out
}

/// Decode the descriptor stored under `prefix`, or `None` when there is none.
///
/// Only `<prefix>id` is checked for presence. Other missing required fields
/// come back as empty strings; missing optional fields as `None`.
pub fn decode(
    properties: &DescriptorSet,
    prefix: Option<&str>,
    base: Option<&BasePath>,
) -> Option<ArtifactDescriptor> {
    let prefix = normalize_prefix(prefix);
    let get = |field: &str| properties.get(&format!("{prefix}{field}"));

    if get(KEY_ID).is_none() {
        return None;
    }

    let version = get(KEY_VERSION).unwrap_or_default().to_string();
    let base_version = match get(KEY_BASE_VERSION) {
        Some(base_version) => base_version.to_string(),
        None => base_version_of(&version),
    };
    let artifact_type = get(KEY_TYPE).unwrap_or_default().to_string();
    let stored_file = get(KEY_FILE);

    let file = stored_file.map(|stored| match base {
        Some(base) => base.resolve(stored),
        None => stored.into(),
    });

    Some(ArtifactDescriptor {
        group_id: get(KEY_GROUP_ID).unwrap_or_default().to_string(),
        artifact_id: get(KEY_ARTIFACT_ID).unwrap_or_default().to_string(),
        version,
        base_version,
        handler: Some(ArtifactHandler::infer(&artifact_type, stored_file)),
        artifact_type,
        classifier: get(KEY_CLASSIFIER).map(str::to_string),
        scope: get(KEY_SCOPE).map(str::to_string),
        file,
    })
}

/// Every descriptor recorded for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromotableArtifacts {
    /// Primary artifact, stored under `artifact.`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<ArtifactDescriptor>,

    /// Attached artifacts, stored under `attached.<index>.` in order
    pub attached: Vec<ArtifactDescriptor>,
}

impl PromotableArtifacts {
    /// Primary artifact first, then attached artifacts in order.
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.primary.iter().chain(self.attached.iter())
    }

    pub fn len(&self) -> usize {
        self.attached.len() + usize::from(self.primary.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.attached.is_empty()
    }
}

/// Encode a primary artifact and its attached artifacts into one set.
pub fn encode_all<'a>(
    primary: Option<&ArtifactDescriptor>,
    attached: impl IntoIterator<Item = &'a ArtifactDescriptor>,
    base: Option<&BasePath>,
) -> DescriptorSet {
    let mut out = DescriptorSet::new();
    if let Some(primary) = primary {
        out.merge(encode(primary, Some(PRIMARY_PREFIX), base));
    }
    for (index, artifact) in attached.into_iter().enumerate() {
        out.merge(encode(artifact, Some(&attached_prefix(index)), base));
    }
    out
}

/// Decode the primary artifact and probe `attached.0`, `attached.1`, ...
/// until a prefix has no descriptor.
pub fn decode_all(properties: &DescriptorSet, base: Option<&BasePath>) -> PromotableArtifacts {
    let primary = decode(properties, Some(PRIMARY_PREFIX), base);

    let mut attached = Vec::new();
    loop {
        let prefix = attached_prefix(attached.len());
        match decode(properties, Some(&prefix), base) {
            Some(descriptor) => attached.push(descriptor),
            None => break,
        }
    }

    PromotableArtifacts { primary, attached }
}
