use crate::domain::BuildTagSnapshot;
use serde::{Deserialize, Serialize};

/// Prefix of the default bullet line
pub const BULLET: &str = "• ";

/// Text written when no snapshot exists to build a changelog from
pub const NOT_GENERATED_MESSAGE: &str = "Changelog was not generated";

/// How a single changelog line is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LineStrategy {
    /// `• {line}`
    #[default]
    Bullet,
    /// The line as-is
    Plain,
    /// `{prefix}{line}`
    Prefix(String),
}

impl LineStrategy {
    pub fn build(&self, line: &str) -> String {
        match self {
            LineStrategy::Bullet => format!("{}{}", BULLET, line),
            LineStrategy::Plain => line.to_string(),
            LineStrategy::Prefix(prefix) => format!("{}{}", prefix, line),
        }
    }
}

/// What the changelog says when no qualifying commits were found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyChangelogStrategy {
    /// Mention the previous tag, or that this is the first tagged build
    #[default]
    SincePreviousTag,
    /// Always the given text
    Fixed(String),
}

impl EmptyChangelogStrategy {
    pub fn build(&self, snapshot: &BuildTagSnapshot) -> String {
        match self {
            EmptyChangelogStrategy::Fixed(text) => text.clone(),
            EmptyChangelogStrategy::SincePreviousTag => {
                let previous = snapshot
                    .previous_in_order
                    .as_ref()
                    .or(snapshot.previous_on_different_commit.as_ref());

                match previous {
                    Some(tag) => format!("No changes since tag {}", tag.name),
                    None => format!(
                        "No changes: {} is the first build tag of the repository",
                        snapshot.current.name
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BuildTag;

    #[test]
    fn test_line_strategies() {
        assert_eq!(LineStrategy::Bullet.build("[X-1] fix"), "• [X-1] fix");
        assert_eq!(LineStrategy::Plain.build("[X-1] fix"), "[X-1] fix");
        assert_eq!(
            LineStrategy::Prefix("- ".to_string()).build("[X-1] fix"),
            "- [X-1] fix"
        );
    }

    #[test]
    fn test_empty_message_mentions_previous_tag() {
        let mut snapshot = BuildTagSnapshot::stub("debug");
        snapshot.previous_in_order = Some(BuildTag::stub("debug"));
        snapshot.previous_in_order.as_mut().unwrap().name = "v1.0.1-debug".to_string();

        assert_eq!(
            EmptyChangelogStrategy::SincePreviousTag.build(&snapshot),
            "No changes since tag v1.0.1-debug"
        );
    }

    #[test]
    fn test_empty_message_for_first_tag() {
        let snapshot = BuildTagSnapshot::stub("debug");
        let text = EmptyChangelogStrategy::SincePreviousTag.build(&snapshot);
        assert!(text.contains("first build tag"));
        assert!(text.contains("v0.0.1-debug"));
    }

    #[test]
    fn test_fixed_empty_message() {
        let snapshot = BuildTagSnapshot::stub("debug");
        let strategy = EmptyChangelogStrategy::Fixed("Nothing new".to_string());
        assert_eq!(strategy.build(&snapshot), "Nothing new");
    }
}
