//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only Git
//! queries the tag resolver and changelog builder need, with a real
//! implementation and a mock for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use build_publish::git::Repository;
//! # use regex::Regex;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let filter = Regex::new(r"^.+\.(\d+)-debug$")?;
//! let tags = repo.list_tags(&filter)?;
//! if let Some(latest) = tags.first() {
//!     let commits = repo.list_commits(None, &latest.commit_sha)?;
//!     println!("{} commits up to {}", commits.len(), latest.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use regex::Regex;
use std::cmp::Ordering;

/// Revision used as the changelog end point when no real tag commit exists
pub const HEAD: &str = "HEAD";

/// A tag as read from the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Short tag name (without `refs/tags/`)
    pub name: String,
    /// Full SHA of the commit the tag points at
    pub commit_sha: String,
    /// Annotated tag message, or the commit message for lightweight tags
    pub message: String,
    /// Commit time in seconds since the epoch
    pub commit_time: i64,
    /// Tagger time of annotated tags
    pub tagger_time: Option<i64>,
}

/// Commit information for changelog generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit hash
    pub sha: String,
    /// The full commit message
    pub message: String,
    /// Commit time in seconds since the epoch
    pub time: i64,
}

/// Read-only git queries
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`; build variants may be resolved
/// concurrently against the same repository.
///
/// ## Error Handling
///
/// "No tags" and "not a repository" are empty results, not errors. Errors are
/// reserved for unreadable repositories and for ranges that reference unknown
/// commits ([crate::error::BuildPublishError::ChangelogRange]).
pub trait Repository: Send + Sync {
    /// List tags whose whole name matches `filter`, most recent first
    ///
    /// Ordering is by commit topology (descendants first) and commit time; tags
    /// on the same commit are ordered by tagger time (newest first, lightweight
    /// tags last), then by name descending with numbers compared by value.
    fn list_tags(&self, filter: &Regex) -> Result<Vec<TagInfo>>;

    /// List commits reachable from `to_inclusive` but not from `from_exclusive`
    ///
    /// `to_inclusive` is any revision (`HEAD`, a SHA). Commits are returned most
    /// recent first. Without `from_exclusive` the walk runs to the root.
    ///
    /// # Returns
    /// * `Ok(Vec<CommitInfo>)` - Commits, newest first
    /// * `Err(ChangelogRange)` - If `from_exclusive` is not in the history
    fn list_commits(&self, from_exclusive: Option<&str>, to_inclusive: &str)
        -> Result<Vec<CommitInfo>>;
}

/// Tie-break for tags whose commits are equally recent
pub(crate) fn compare_same_commit(a: &TagInfo, b: &TagInfo) -> Ordering {
    match (a.tagger_time, b.tagger_time) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| compare_names(&b.name, &a.name))
}

/// Name order that compares digit runs by value, so `v1.0.9` < `v1.0.10`
fn compare_names(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x_run = digit_run(&mut left);
                let y_run = digit_run(&mut right);
                let x_trimmed = x_run.trim_start_matches('0');
                let y_trimmed = y_run.trim_start_matches('0');
                let ordering = x_trimmed
                    .len()
                    .cmp(&y_trimmed.len())
                    .then_with(|| x_trimmed.cmp(y_trimmed));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}
