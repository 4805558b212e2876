//! Artifact descriptors for build promotion.
//!
//! A build records its artifacts as a flat set of `prefix.field=value`
//! entries; a later promotion step reads the same set back and rebuilds the
//! artifact descriptors, with file paths resolved against the build
//! directory.

mod codec;
mod descriptor;
mod error;
mod path;
mod prefix;
mod properties;
mod set;

pub use codec::{decode, decode_all, encode, encode_all, PromotableArtifacts};
pub use descriptor::{
    base_version_of, extension_of, ArtifactDescriptor, ArtifactHandler, SNAPSHOT_QUALIFIER,
};
pub use error::PropertiesError;
pub use path::BasePath;
pub use prefix::{
    attached_prefix, normalize_prefix, ATTACHED_PREFIX, KEY_ARTIFACT_ID, KEY_BASE_VERSION,
    KEY_CLASSIFIER, KEY_FILE, KEY_GROUP_ID, KEY_ID, KEY_SCOPE, KEY_TYPE, KEY_VERSION,
    PRIMARY_PREFIX, SEPARATOR,
};
pub use properties::{
    parse_properties, read_properties, to_properties_string, write_properties, TIMESTAMP_FORMAT,
};
pub use set::DescriptorSet;
