//! Stable identifiers, well-known keys, and defaults.

// Schemas
pub const SCHEMA_CONFIG_V1: &str = "modsan.config.v1";

// Module metadata keys
pub const KEY_VARIANTS: &str = "variants";
pub const KEY_DEPENDENCIES: &str = "dependencies";
pub const KEY_GROUP: &str = "group";
pub const KEY_MODULE: &str = "module";
pub const KEY_NAME: &str = "name";

// Defaults
pub const DEFAULT_EXCLUDE_GROUP: &str = "com.wonder";
pub const DEFAULT_EXCLUDE_MODULE: &str = "wonder-dependencies";
pub const DEFAULT_PUBLICATION: &str = "apiInterface";
pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_INDENT: usize = 4;

// Files
pub const MODULE_METADATA_FILE: &str = "module.json";
pub const PUBLICATIONS_DIR: &str = "publications";
pub const CONFIG_FILE: &str = "modsan.toml";
pub const LEGACY_PUBLISH_CONFIG: &str = "publish.json";
