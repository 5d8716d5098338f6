use crate::error::{BuildPublishError, Result};
use crate::git::{compare_same_commit, CommitInfo, Repository, TagInfo, HEAD};
use regex::Regex;

/// Mock repository with a linear history, for testing without actual git operations
pub struct MockRepository {
    /// Oldest first
    commits: Vec<CommitInfo>,
    tags: Vec<TagInfo>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Append a commit on top of the history
    pub fn add_commit(&mut self, sha: impl Into<String>, message: impl Into<String>) {
        let time = self.commits.len() as i64;
        self.commits.push(CommitInfo {
            sha: sha.into(),
            message: message.into(),
            time,
        });
    }

    /// Add a lightweight tag pointing at a commit
    pub fn add_tag(&mut self, name: impl Into<String>, sha: &str) {
        self.push_tag(name.into(), sha, None, None);
    }

    /// Add an annotated tag with a message and creation time
    pub fn add_annotated_tag(
        &mut self,
        name: impl Into<String>,
        sha: &str,
        message: impl Into<String>,
        tagger_time: i64,
    ) {
        self.push_tag(name.into(), sha, Some(message.into()), Some(tagger_time));
    }

    fn push_tag(
        &mut self,
        name: String,
        sha: &str,
        message: Option<String>,
        tagger_time: Option<i64>,
    ) {
        let commit = self.commits.iter().find(|c| c.sha == sha);
        let (commit_message, commit_time) = commit
            .map(|c| (c.message.clone(), c.time))
            .unwrap_or_default();

        self.tags.push(TagInfo {
            name,
            commit_sha: sha.to_string(),
            message: message.unwrap_or(commit_message),
            commit_time,
            tagger_time,
        });
    }

    fn position(&self, rev: &str) -> Option<usize> {
        if rev == HEAD {
            return self.commits.len().checked_sub(1);
        }
        self.commits.iter().position(|c| c.sha == rev)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self, filter: &Regex) -> Result<Vec<TagInfo>> {
        let mut ranked: Vec<(usize, TagInfo)> = self
            .tags
            .iter()
            .filter(|tag| filter.is_match(&tag.name))
            .filter_map(|tag| self.position(&tag.commit_sha).map(|pos| (pos, tag.clone())))
            .collect();

        ranked.sort_by(|(pos_a, a), (pos_b, b)| {
            pos_b.cmp(pos_a).then_with(|| compare_same_commit(a, b))
        });

        Ok(ranked.into_iter().map(|(_, tag)| tag).collect())
    }

    fn list_commits(
        &self,
        from_exclusive: Option<&str>,
        to_inclusive: &str,
    ) -> Result<Vec<CommitInfo>> {
        if self.commits.is_empty() {
            return Ok(Vec::new());
        }

        let end = self.position(to_inclusive).ok_or_else(|| {
            BuildPublishError::Git(git2::Error::from_str(&format!(
                "revspec '{}' not found",
                to_inclusive
            )))
        })?;

        let start = match from_exclusive {
            Some(from) => {
                self.position(from).ok_or_else(|| {
                    BuildPublishError::changelog_range(format!(
                        "Commit {} is not present in history",
                        from
                    ))
                })? + 1
            }
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }

        Ok(self.commits[start..=end].iter().rev().cloned().collect())
    }
}
