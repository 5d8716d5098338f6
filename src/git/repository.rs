use crate::error::{BuildPublishError, Result};
use crate::git::{compare_same_commit, CommitInfo, TagInfo, HEAD};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
///
/// A directory that is not inside a repository opens successfully and behaves
/// like a repository without tags or commits.
pub struct Git2Repository {
    repo: Mutex<Option<Git2Repo>>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = match Git2Repo::discover(path) {
            Ok(repo) => Some(repo),
            Err(e) if e.code() == ErrorCode::NotFound => {
                log::warn!("No git repository found at {}", path.display());
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Git2Repository {
            repo: Mutex::new(repo),
        })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(Some(repo)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Git2Repo>> {
        // Reads never leave the repository in a half-updated state, so a
        // poisoned lock is still usable.
        self.repo.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Position of every commit reachable from `head`, newest first
fn commit_ranks(repo: &Git2Repo, head: Oid) -> Result<HashMap<Oid, usize>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    revwalk.push(head)?;

    let mut ranks = HashMap::new();
    for (rank, oid) in revwalk.enumerate() {
        ranks.insert(oid?, rank);
    }
    Ok(ranks)
}

fn head_commit(repo: &Git2Repo) -> Result<Option<Oid>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self, filter: &Regex) -> Result<Vec<TagInfo>> {
        let guard = self.lock();
        let repo = match guard.as_ref() {
            Some(repo) => repo,
            None => return Ok(Vec::new()),
        };

        let head = match head_commit(repo)? {
            Some(head) => head,
            None => {
                log::debug!("HEAD is unborn, no tags to list");
                return Ok(Vec::new());
            }
        };
        let ranks = commit_ranks(repo, head)?;

        let mut ranked = Vec::new();
        let names = repo.tag_names(None)?;

        for name in names.iter().flatten() {
            if !filter.is_match(name) {
                continue;
            }

            let reference = repo.find_reference(&format!("refs/tags/{}", name))?;
            let commit = match reference.peel_to_commit() {
                Ok(commit) => commit,
                Err(e) => {
                    log::debug!("Skipping tag '{}' that does not point at a commit: {}", name, e);
                    continue;
                }
            };

            let rank = match ranks.get(&commit.id()) {
                Some(rank) => *rank,
                None => {
                    log::debug!("Skipping tag '{}' not reachable from HEAD", name);
                    continue;
                }
            };

            let annotated = reference.target().and_then(|oid| repo.find_tag(oid).ok());
            let (message, tagger_time) = match &annotated {
                Some(tag) => (
                    tag.message().unwrap_or_default().to_string(),
                    tag.tagger().map(|sig| sig.when().seconds()),
                ),
                None => (commit.message().unwrap_or_default().to_string(), None),
            };

            ranked.push((
                rank,
                TagInfo {
                    name: name.to_string(),
                    commit_sha: commit.id().to_string(),
                    message,
                    commit_time: commit.time().seconds(),
                    tagger_time,
                },
            ));
        }

        ranked.sort_by(|(rank_a, a), (rank_b, b)| {
            rank_a.cmp(rank_b).then_with(|| compare_same_commit(a, b))
        });

        Ok(ranked.into_iter().map(|(_, tag)| tag).collect())
    }

    fn list_commits(
        &self,
        from_exclusive: Option<&str>,
        to_inclusive: &str,
    ) -> Result<Vec<CommitInfo>> {
        let guard = self.lock();
        let repo = match guard.as_ref() {
            Some(repo) => repo,
            None => return Ok(Vec::new()),
        };

        let to_oid = if to_inclusive == HEAD {
            match head_commit(repo)? {
                Some(head) => head,
                None => {
                    log::debug!("HEAD is unborn, no commits to list");
                    return Ok(Vec::new());
                }
            }
        } else {
            repo.revparse_single(to_inclusive)?.peel_to_commit()?.id()
        };

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;

        if let Some(from) = from_exclusive {
            let from_oid = Oid::from_str(from)
                .and_then(|oid| repo.find_commit(oid))
                .map(|commit| commit.id())
                .map_err(|e| {
                    BuildPublishError::changelog_range(format!(
                        "Commit {} is not present in history: {}",
                        from, e
                    ))
                })?;
            revwalk.hide(from_oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            commits.push(CommitInfo {
                sha: commit.id().to_string(),
                message: commit.message().unwrap_or_default().to_string(),
                time: commit.time().seconds(),
            });
        }

        Ok(commits)
    }
}
