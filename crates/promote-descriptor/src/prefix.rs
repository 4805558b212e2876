//! Key prefixes and field names.
//!
//! Several descriptors share one flat key space. Each one owns the keys
//! under its prefix: `artifact.groupId`, `attached.0.groupId`, and so on.

/// Separator between a prefix and a field name.
pub const SEPARATOR: char = '.';

/// Prefix of the project's primary artifact.
pub const PRIMARY_PREFIX: &str = "artifact";

/// Prefix root of attached artifacts (`attached.<index>`).
pub const ATTACHED_PREFIX: &str = "attached";

pub const KEY_ID: &str = "id";
pub const KEY_GROUP_ID: &str = "groupId";
pub const KEY_ARTIFACT_ID: &str = "artifactId";
pub const KEY_VERSION: &str = "version";
pub const KEY_SCOPE: &str = "scope";
pub const KEY_TYPE: &str = "type";
pub const KEY_CLASSIFIER: &str = "classifier";
pub const KEY_FILE: &str = "file";
pub const KEY_BASE_VERSION: &str = "baseVersion";

/// Normalize a prefix so that `prefix + field` is a full key.
///
/// Absent and empty prefixes stay empty; anything else ends with the
/// separator afterwards. Normalizing twice is a no-op.
pub fn normalize_prefix(prefix: Option<&str>) -> String {
    match prefix {
        None => String::new(),
        Some(p) if p.is_empty() || p.ends_with(SEPARATOR) => p.to_string(),
        Some(p) => format!("{p}{SEPARATOR}"),
    }
}

/// Prefix for the attached artifact at `index`.
pub fn attached_prefix(index: usize) -> String {
    format!("{ATTACHED_PREFIX}{SEPARATOR}{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(normalize_prefix(None), "");
        assert_eq!(normalize_prefix(Some("")), "");
    }

    #[test]
    fn test_separator_appended_once() {
        assert_eq!(normalize_prefix(Some("artifact")), "artifact.");
        assert_eq!(normalize_prefix(Some("artifact.")), "artifact.");
        let once = normalize_prefix(Some("attached.3"));
        assert_eq!(normalize_prefix(Some(&once)), once);
    }

    #[test]
    fn test_attached_prefix() {
        assert_eq!(attached_prefix(0), "attached.0");
        assert_eq!(attached_prefix(12), "attached.12");
    }
}
