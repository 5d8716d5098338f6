//! Resolution of the current and previous build tags of a variant

use crate::boundary::BoundaryWarning;
use crate::domain::{BuildTag, BuildTagSnapshot, TagPattern};
use crate::error::{BuildPublishError, Result};
use crate::git::{Repository, TagInfo};

/// Resolves build tag snapshots for build variants
pub struct TagResolver<'a, R: Repository> {
    repo: &'a R,
}

/// A snapshot plus the non-fatal issues noticed while building it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub snapshot: BuildTagSnapshot,
    pub warnings: Vec<BoundaryWarning>,
}

impl<'a, R: Repository> TagResolver<'a, R> {
    /// Create a resolver reading from `repo`
    pub fn new(repo: &'a R) -> Self {
        TagResolver { repo }
    }

    /// Resolve the snapshot for `variant`
    ///
    /// # Arguments
    /// * `variant` - Build variant name substituted into the pattern
    /// * `pattern` - Tag pattern template, e.g. `.+\.(\d+)-%s`
    /// * `use_stub_as_fallback` - Synthesize a stub tag when nothing matches
    ///
    /// # Returns
    /// * `Ok(BuildTagSnapshot)` - Resolved (or stub) snapshot
    /// * `Err(TagNotFound)` - No tag matched and fallback is disabled
    /// * `Err(TagParse)` - The current or a previous tag has an invalid build number
    pub fn resolve(
        &self,
        variant: &str,
        pattern: &str,
        use_stub_as_fallback: bool,
    ) -> Result<BuildTagSnapshot> {
        self.resolve_with_warnings(variant, pattern, use_stub_as_fallback)
            .map(|resolution| resolution.snapshot)
    }

    /// Same as [`TagResolver::resolve`], also reporting non-fatal warnings
    pub fn resolve_with_warnings(
        &self,
        variant: &str,
        pattern: &str,
        use_stub_as_fallback: bool,
    ) -> Result<Resolution> {
        let tag_pattern = TagPattern::new(pattern, variant)?;
        let tags = self.repo.list_tags(tag_pattern.regex())?;
        log::debug!(
            "Found {} tags for variant '{}' with pattern '{}'",
            tags.len(),
            variant,
            pattern
        );

        let mut warnings = Vec::new();

        let (current_info, rest) = match tags.split_first() {
            Some(split) => split,
            None if use_stub_as_fallback => {
                log::info!("No build tags for variant '{}', using stub tag", variant);
                let snapshot = BuildTagSnapshot::stub(variant);
                warnings.push(BoundaryWarning::StubTagUsed {
                    variant: variant.to_string(),
                    tag: snapshot.current.name.clone(),
                });
                return Ok(Resolution { snapshot, warnings });
            }
            None => return Err(BuildPublishError::tag_not_found(variant, pattern)),
        };

        let current = parse(&tag_pattern, current_info)?;

        let previous_in_order = rest
            .first()
            .map(|info| parse(&tag_pattern, info))
            .transpose()?;

        let previous_on_different_commit = rest
            .iter()
            .find(|info| info.commit_sha != current.commit_sha)
            .map(|info| parse(&tag_pattern, info))
            .transpose()?;

        if let Some(duplicate) = rest
            .iter()
            .filter_map(|info| tag_pattern.parse(&info.name, &info.commit_sha, &info.message).ok())
            .find(|tag| tag.build_number == current.build_number)
        {
            warnings.push(BoundaryWarning::DuplicateBuildNumber {
                current: current.name.clone(),
                other: duplicate.name,
                build_number: current.build_number,
            });
        }

        if previous_in_order.is_some() && previous_on_different_commit.is_none() {
            warnings.push(BoundaryWarning::AllTagsOnSameCommit {
                tag: current.name.clone(),
                commit_sha: current.commit_sha.clone(),
            });
        }

        log::info!(
            "Resolved build tag '{}' (build {}) for variant '{}'",
            current.name,
            current.build_number,
            variant
        );

        Ok(Resolution {
            snapshot: BuildTagSnapshot {
                current,
                previous_in_order,
                previous_on_different_commit,
            },
            warnings,
        })
    }

    /// Name of the tag following the current one, e.g. `v1.0.2-debug` after `v1.0.1-debug`
    pub fn next_tag_name(
        &self,
        variant: &str,
        pattern: &str,
        use_stub_as_fallback: bool,
    ) -> Result<String> {
        let snapshot = self.resolve(variant, pattern, use_stub_as_fallback)?;
        TagPattern::new(pattern, variant)?.next_tag_name(&snapshot.current)
    }
}

fn parse(pattern: &TagPattern, info: &TagInfo) -> Result<BuildTag> {
    pattern.parse(&info.name, &info.commit_sha, &info.message)
}
