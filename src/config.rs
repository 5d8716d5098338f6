use crate::changelog::{
    EmptyChangelogStrategy, LineStrategy, DEFAULT_COMMIT_MESSAGE_KEY, DEFAULT_ISSUE_NUMBER_PATTERN,
};
use crate::domain::DEFAULT_TAG_PATTERN;
use crate::error::{BuildPublishError, Result};
use crate::strategy::{OutputNameStrategy, VersionCodeStrategy, VersionNameStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "buildpublish.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE_NAME: &str = ".buildpublish.toml";

/// Represents the complete configuration for build-publish.
///
/// Contains tag lookup settings, changelog settings, output locations and
/// per-variant overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub variants: BTreeMap<String, VariantConfig>,
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

fn default_true() -> bool {
    true
}

/// How build tags are found and what happens without one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Tag pattern template; `%s` stands for the variant name
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,

    #[serde(default = "default_true")]
    pub use_versions_from_tag: bool,

    #[serde(default = "default_true")]
    pub use_stubs_for_tag_as_fallback: bool,

    #[serde(default = "default_true")]
    pub use_defaults_for_versions_as_fallback: bool,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
            use_versions_from_tag: true,
            use_stubs_for_tag_as_fallback: true,
            use_defaults_for_versions_as_fallback: true,
        }
    }
}

fn default_commit_message_key() -> String {
    DEFAULT_COMMIT_MESSAGE_KEY.to_string()
}

fn default_issue_number_pattern() -> Option<String> {
    Some(DEFAULT_ISSUE_NUMBER_PATTERN.to_string())
}

/// Which commit lines end up in the changelog and how they look.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_commit_message_key")]
    pub commit_message_key: String,

    /// Issue key pattern used for deduplication; unset disables deduplication
    #[serde(default = "default_issue_number_pattern")]
    pub issue_number_pattern: Option<String>,

    #[serde(default)]
    pub line: LineStrategy,

    #[serde(default)]
    pub empty: EmptyChangelogStrategy,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            commit_message_key: default_commit_message_key(),
            issue_number_pattern: default_issue_number_pattern(),
            line: LineStrategy::default(),
            empty: EmptyChangelogStrategy::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build").join("build-publish")
}

fn default_base_file_name() -> String {
    "app".to_string()
}

/// Where variant-scoped files go and how artifacts are named.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_base_file_name")]
    pub base_file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
            base_file_name: default_base_file_name(),
        }
    }
}

/// Per-variant overrides; unset fields fall back to the global sections.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VariantConfig {
    #[serde(default)]
    pub tag_pattern: Option<String>,

    #[serde(default)]
    pub base_file_name: Option<String>,

    #[serde(default)]
    pub version_code: VersionCodeStrategy,

    #[serde(default)]
    pub version_name: VersionNameStrategy,

    #[serde(default)]
    pub output_name: OutputNameStrategy,
}

/// Settings of one variant with all overrides applied
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSettings {
    pub variant: String,
    pub tag_pattern: String,
    pub base_file_name: String,
    pub use_versions_from_tag: bool,
    pub use_stubs_for_tag_as_fallback: bool,
    pub use_defaults_for_versions_as_fallback: bool,
    pub version_code: VersionCodeStrategy,
    pub version_name: VersionNameStrategy,
    pub output_name: OutputNameStrategy,
}

impl Config {
    /// Merge the global sections with the overrides of `variant`
    pub fn variant_settings(&self, variant: &str) -> VariantSettings {
        let overrides = self.variants.get(variant).cloned().unwrap_or_default();

        VariantSettings {
            variant: variant.to_string(),
            tag_pattern: overrides
                .tag_pattern
                .unwrap_or_else(|| self.tag.pattern.clone()),
            base_file_name: overrides
                .base_file_name
                .unwrap_or_else(|| self.output.base_file_name.clone()),
            use_versions_from_tag: self.tag.use_versions_from_tag,
            use_stubs_for_tag_as_fallback: self.tag.use_stubs_for_tag_as_fallback,
            use_defaults_for_versions_as_fallback: self.tag.use_defaults_for_versions_as_fallback,
            version_code: overrides.version_code,
            version_name: overrides.version_name,
            output_name: overrides.output_name,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `buildpublish.toml` in current directory
/// 3. `.buildpublish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(path) = dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE_NAME))
        .filter(|path| path.exists())
    {
        path
    } else {
        log::debug!("No configuration file found, using defaults");
        return Ok(Config::default());
    };

    log::debug!("Loading configuration from {}", path.display());
    let config_str = fs::read_to_string(&path)?;
    toml::from_str(&config_str).map_err(|e| {
        BuildPublishError::config(format!("Cannot parse {}: {}", path.display(), e))
    })
}
