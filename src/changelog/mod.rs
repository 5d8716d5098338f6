//! Changelog generation from marked commit messages
//!
//! A commit contributes to the changelog through lines of the form
//! `CHANGELOG: [ABC-12] Fixed login`. Lines are collected from every commit
//! between the previous build tag on a different commit and the current tag,
//! newest first, and deduplicated by issue key.

pub mod render;

pub use render::{EmptyChangelogStrategy, LineStrategy, NOT_GENERATED_MESSAGE};

use crate::boundary::BoundaryWarning;
use crate::domain::BuildTagSnapshot;
use crate::error::{BuildPublishError, Result};
use crate::git::{CommitInfo, Repository, HEAD};
use regex::Regex;
use std::collections::HashSet;

/// Default marker that flags changelog lines in commit messages
pub const DEFAULT_COMMIT_MESSAGE_KEY: &str = "CHANGELOG";

/// Default issue key pattern (Jira-style `ABC-123`)
pub const DEFAULT_ISSUE_NUMBER_PATTERN: &str = r"[A-Z][A-Z0-9]*-\d+";

/// One changelog line extracted from a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Text after the marker, including any issue reference
    pub text: String,
    /// Issue key found in the text
    pub issue_key: Option<String>,
    /// Commit the line came from
    pub commit_sha: String,
}

/// A rendered changelog plus the non-fatal issues noticed while building it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChangelog {
    pub text: String,
    pub entries: Vec<ChangelogEntry>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Builds changelogs from the commits between build tags
pub struct ChangelogBuilder<'a, R: Repository> {
    repo: &'a R,
    issue_pattern: Option<Regex>,
}

impl<'a, R: Repository> ChangelogBuilder<'a, R> {
    /// Create a builder; an invalid issue pattern is rejected here, not per commit
    pub fn new(repo: &'a R, issue_number_pattern: Option<&str>) -> Result<Self> {
        let issue_pattern = issue_number_pattern
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| BuildPublishError::pattern(pattern, e))
            })
            .transpose()?;

        Ok(ChangelogBuilder {
            repo,
            issue_pattern,
        })
    }

    /// Build the changelog text for `snapshot`
    pub fn build(
        &self,
        commit_message_key: &str,
        snapshot: &BuildTagSnapshot,
        line_strategy: &LineStrategy,
        empty_strategy: &EmptyChangelogStrategy,
    ) -> Result<String> {
        self.build_with_warnings(commit_message_key, snapshot, line_strategy, empty_strategy)
            .map(|changelog| changelog.text)
    }

    /// Same as [`ChangelogBuilder::build`], also returning entries and warnings
    pub fn build_with_warnings(
        &self,
        commit_message_key: &str,
        snapshot: &BuildTagSnapshot,
        line_strategy: &LineStrategy,
        empty_strategy: &EmptyChangelogStrategy,
    ) -> Result<RenderedChangelog> {
        if commit_message_key.trim().is_empty() {
            return Err(BuildPublishError::config("Commit message key must not be empty"));
        }

        let mut warnings = Vec::new();
        let commits = self.commits_in_range(snapshot, &mut warnings)?;
        let entries = self.collect_entries(commit_message_key, &commits);

        log::debug!(
            "Collected {} changelog lines from {} commits for '{}'",
            entries.len(),
            commits.len(),
            snapshot.current.name
        );

        let text = if entries.is_empty() {
            empty_strategy.build(snapshot)
        } else {
            entries
                .iter()
                .map(|entry| line_strategy.build(&entry.text))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(RenderedChangelog {
            text,
            entries,
            warnings,
        })
    }

    /// Commits from the previous tag on a different commit (exclusive) to the
    /// current tag (inclusive), newest first
    fn commits_in_range(
        &self,
        snapshot: &BuildTagSnapshot,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Vec<CommitInfo>> {
        let to = if snapshot.current.is_stub() {
            HEAD
        } else {
            snapshot.current.commit_sha.as_str()
        };
        let from = snapshot
            .previous_on_different_commit
            .as_ref()
            .map(|tag| tag.commit_sha.as_str());

        match self.repo.list_commits(from, to) {
            Err(BuildPublishError::ChangelogRange(reason)) => {
                let from_commit = from.unwrap_or_default().to_string();
                log::warn!(
                    "Changelog range start {} not found, using repository start",
                    from_commit
                );
                warnings.push(BoundaryWarning::ChangelogRangeFallback {
                    from_commit,
                    reason,
                });
                self.repo.list_commits(None, to)
            }
            other => other,
        }
    }

    /// Marker lines of all commits, deduplicated by issue key (first wins)
    pub fn collect_entries(
        &self,
        commit_message_key: &str,
        commits: &[CommitInfo],
    ) -> Vec<ChangelogEntry> {
        let mut seen_issues = HashSet::new();
        let mut entries = Vec::new();

        for commit in commits {
            for text in marker_lines(&commit.message, commit_message_key) {
                let issue_key = self.issue_key(text);

                if let Some(key) = &issue_key {
                    if !seen_issues.insert(key.clone()) {
                        log::debug!("Skipping duplicate changelog line for {}", key);
                        continue;
                    }
                }

                entries.push(ChangelogEntry {
                    text: text.to_string(),
                    issue_key,
                    commit_sha: commit.sha.clone(),
                });
            }
        }

        entries
    }

    fn issue_key(&self, text: &str) -> Option<String> {
        let captures = self.issue_pattern.as_ref()?.captures(text)?;
        captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str().to_string())
    }
}

/// Text after `KEY:` on every line of `message` that starts with the marker
fn marker_lines<'m>(message: &'m str, key: &'m str) -> impl Iterator<Item = &'m str> + 'm {
    message.lines().filter_map(move |line| {
        line.trim_start()
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(':'))
            .map(str::trim)
            .filter(|text| !text.is_empty())
    })
}
