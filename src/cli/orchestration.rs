//! Per-variant workflows behind the command-line tool
//!
//! Each workflow step reads or writes the variant-scoped files described in
//! [`crate::outputs`]. Tag resolution writes the snapshot; every later step
//! reads it back, so separate invocations agree on the same tags.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::changelog::{ChangelogBuilder, NOT_GENERATED_MESSAGE};
use crate::config::{load_config, Config, VariantSettings};
use crate::domain::{BuildTag, BuildTagSnapshot, TagPattern};
use crate::git::{Git2Repository, Repository};
use crate::outputs::{self, OutputPaths};
use crate::resolver::TagResolver;
use crate::strategy::VersionSource;
use crate::ui;

/// Arguments shared by every variant workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic,
/// so the workflow can be called programmatically without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantWorkflowArgs {
    /// Path to custom config file
    pub config_path: Option<PathBuf>,

    /// Directory inside the git repository
    pub repo_path: PathBuf,

    /// Overrides the configured output directory
    pub output_dir: Option<PathBuf>,
}

/// Everything produced for one variant by [`Workflow::run_all`]
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub variant: String,
    pub tag: String,
    pub version_code: Option<u32>,
    pub version_name: Option<String>,
    pub output_file_name: String,
    pub changelog: String,
}

/// Repository, configuration and output locations for running variant steps
pub struct Workflow<R: Repository> {
    repo: R,
    config: Config,
    paths: OutputPaths,
}

impl Workflow<Git2Repository> {
    /// Load configuration and open the repository described by `args`
    pub fn open(args: &VariantWorkflowArgs) -> Result<Self> {
        let config = load_config(args.config_path.as_deref()).context("Failed to load config")?;
        let repo = Git2Repository::open(&args.repo_path).with_context(|| {
            format!("Cannot read git repository at {}", args.repo_path.display())
        })?;
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.dir.clone());

        Ok(Workflow::new(repo, config, OutputPaths::new(dir)))
    }
}

impl<R: Repository> Workflow<R> {
    pub fn new(repo: R, config: Config, paths: OutputPaths) -> Self {
        Workflow {
            repo,
            config,
            paths,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn paths(&self) -> &OutputPaths {
        &self.paths
    }

    fn settings(&self, variant: &str) -> VariantSettings {
        self.config.variant_settings(variant)
    }

    /// Resolve the variant's tags without writing anything
    pub fn resolve(&self, variant: &str) -> Result<BuildTagSnapshot> {
        let settings = self.settings(variant);
        let resolution = TagResolver::new(&self.repo)
            .resolve_with_warnings(
                variant,
                &settings.tag_pattern,
                settings.use_stubs_for_tag_as_fallback,
            )
            .with_context(|| {
                format!(
                    "Failed to resolve build tag for variant '{}' (pattern '{}')",
                    variant, settings.tag_pattern
                )
            })?;

        for warning in &resolution.warnings {
            ui::display_boundary_warning(warning);
        }

        Ok(resolution.snapshot)
    }

    /// Resolve the variant's tags and persist the snapshot
    pub fn write_snapshot(&self, variant: &str) -> Result<BuildTagSnapshot> {
        let snapshot = self.resolve(variant)?;
        snapshot.write_to(&self.paths.snapshot(variant))?;
        Ok(snapshot)
    }

    /// Read the persisted snapshot, if one was written
    pub fn read_snapshot(&self, variant: &str) -> Result<Option<BuildTagSnapshot>> {
        let snapshot = BuildTagSnapshot::read_from(&self.paths.snapshot(variant))?;
        if snapshot.is_none() {
            log::info!("No tag snapshot for variant '{}'", variant);
        }
        Ok(snapshot)
    }

    /// Compute and write the version code file
    pub fn write_version_code(&self, variant: &str) -> Result<Option<u32>> {
        let snapshot = self.read_snapshot(variant)?;
        let settings = self.settings(variant);
        let version_code = select_source(&settings, snapshot.as_ref())
            .version_code(&settings.version_code);
        outputs::write_value(&self.paths.version_code(variant), version_code)?;
        Ok(version_code)
    }

    /// Compute and write the version name file
    pub fn write_version_name(&self, variant: &str) -> Result<Option<String>> {
        let snapshot = self.read_snapshot(variant)?;
        let settings = self.settings(variant);
        let version_name = select_source(&settings, snapshot.as_ref())
            .version_name(&settings.version_name);
        outputs::write_value(&self.paths.version_name(variant), version_name.as_ref())?;
        Ok(version_name)
    }

    /// Compute and write the output artifact file name
    pub fn write_output_file_name(
        &self,
        variant: &str,
        original_file_name: &str,
    ) -> Result<String> {
        let snapshot = self.read_snapshot(variant)?;
        let settings = self.settings(variant);
        let name = settings.output_name.build(
            original_file_name,
            snapshot.as_ref().map(|s| &s.current),
            &settings.base_file_name,
        );
        outputs::write_text(&self.paths.output_file_name(variant), &name)?;
        Ok(name)
    }

    /// Build and write the changelog; without a snapshot a not-generated note is written
    pub fn write_changelog(&self, variant: &str) -> Result<String> {
        let changelog_config = &self.config.changelog;
        let text = match self.read_snapshot(variant)? {
            Some(snapshot) => {
                let builder = ChangelogBuilder::new(
                    &self.repo,
                    changelog_config.issue_number_pattern.as_deref(),
                )
                .context("Invalid changelog configuration")?;

                let changelog = builder
                    .build_with_warnings(
                        &changelog_config.commit_message_key,
                        &snapshot,
                        &changelog_config.line,
                        &changelog_config.empty,
                    )
                    .with_context(|| {
                        format!("Failed to build changelog for variant '{}'", variant)
                    })?;

                for warning in &changelog.warnings {
                    ui::display_boundary_warning(warning);
                }
                changelog.text
            }
            None => NOT_GENERATED_MESSAGE.to_string(),
        };

        outputs::write_text(&self.paths.changelog(variant), &text)?;
        Ok(text)
    }

    /// The current build tag of the variant
    pub fn last_tag(&self, variant: &str) -> Result<BuildTag> {
        Ok(self.resolve(variant)?.current)
    }

    /// The tag name that should follow the current build tag
    pub fn next_tag(&self, variant: &str) -> Result<String> {
        let settings = self.settings(variant);
        let current = self.last_tag(variant)?;
        let pattern = TagPattern::new(&settings.tag_pattern, variant)?;
        Ok(pattern.next_tag_name(&current)?)
    }

    /// Run every step for a variant
    ///
    /// If tag resolution fails, version files are still written from the
    /// fallback defaults before the error is returned.
    pub fn run_all(&self, variant: &str, original_file_name: &str) -> Result<WorkflowResult> {
        let snapshot = match self.write_snapshot(variant) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let settings = self.settings(variant);
                let source = select_source(&settings, None);
                outputs::write_value(
                    &self.paths.version_code(variant),
                    source.version_code(&settings.version_code),
                )?;
                outputs::write_value(
                    &self.paths.version_name(variant),
                    source.version_name(&settings.version_name),
                )?;
                return Err(e);
            }
        };

        Ok(WorkflowResult {
            variant: variant.to_string(),
            tag: snapshot.current.name,
            version_code: self.write_version_code(variant)?,
            version_name: self.write_version_name(variant)?,
            output_file_name: self.write_output_file_name(variant, original_file_name)?,
            changelog: self.write_changelog(variant)?,
        })
    }
}

fn select_source<'a>(
    settings: &VariantSettings,
    snapshot: Option<&'a BuildTagSnapshot>,
) -> VersionSource<'a> {
    VersionSource::select(
        snapshot,
        settings.use_versions_from_tag,
        settings.use_defaults_for_versions_as_fallback,
    )
}
