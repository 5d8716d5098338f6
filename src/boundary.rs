use std::fmt;

/// Non-fatal issues noticed while resolving tags or building a changelog.
/// They do not change the result but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No tag matched and a stub tag was synthesized
    StubTagUsed { variant: String, tag: String },
    /// Another matching tag carries the same build number as the current tag
    DuplicateBuildNumber {
        current: String,
        other: String,
        build_number: u32,
    },
    /// Every previous tag sits on the current tag's commit
    AllTagsOnSameCommit { tag: String, commit_sha: String },
    /// The changelog range start is missing from history (e.g. shallow clone)
    ChangelogRangeFallback { from_commit: String, reason: String },
}

fn short_hash(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::StubTagUsed { variant, tag } => {
                write!(
                    f,
                    "No build tag found for variant '{}', using stub tag '{}'",
                    variant, tag
                )
            }
            BoundaryWarning::DuplicateBuildNumber {
                current,
                other,
                build_number,
            } => write!(
                f,
                "Tags '{}' and '{}' share build number {}; using the most recent '{}'",
                current, other, build_number, current
            ),
            BoundaryWarning::AllTagsOnSameCommit { tag, commit_sha } => write!(
                f,
                "All previous tags of '{}' point at the same commit ({})",
                tag,
                short_hash(commit_sha)
            ),
            BoundaryWarning::ChangelogRangeFallback {
                from_commit,
                reason,
            } => write!(
                f,
                "Commit {} is missing from history ({}); changelog starts at the repository root",
                short_hash(from_commit),
                reason
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_tag_display() {
        let warning = BoundaryWarning::StubTagUsed {
            variant: "debug".to_string(),
            tag: "v0.0.1-debug".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("debug"));
        assert!(msg.contains("v0.0.1-debug"));
    }

    #[test]
    fn test_same_commit_display_shortens_hash() {
        let warning = BoundaryWarning::AllTagsOnSameCommit {
            tag: "v1.0.2-debug".to_string(),
            commit_sha: "abc1234def5678".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("abc1234"));
        assert!(!msg.contains("abc1234d"));
    }

    #[test]
    fn test_range_fallback_display() {
        let warning = BoundaryWarning::ChangelogRangeFallback {
            from_commit: "abc".to_string(),
            reason: "shallow clone".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("shallow clone"));
    }
}
