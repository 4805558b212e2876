//! Built-in defaults (layer 1)

/// Header comment written at the top of the properties file
pub const DEFAULT_COMMENT: &str = "Generated by promote-artifacts";

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = ".promote.toml";

/// Default project manifest name, looked up in the working directory
pub const DEFAULT_PROJECT_FILE: &str = "promote-project.toml";

/// Default build output directory, relative to the project manifest
pub const DEFAULT_BUILD_DIRECTORY: &str = "target";

/// Default artifact type when a project manifest entry names none
pub const DEFAULT_ARTIFACT_TYPE: &str = "jar";
