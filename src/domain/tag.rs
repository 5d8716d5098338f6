use crate::error::{BuildPublishError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default tag pattern; `%s` is replaced with the build variant name.
pub const DEFAULT_TAG_PATTERN: &str = r".+\.(\d+)-%s";

/// Version used when no tag exists.
pub const DEFAULT_BUILD_VERSION: &str = "0.0";

/// Build number used when no tag exists.
pub const DEFAULT_BUILD_NUMBER: u32 = 1;

/// Sentinel commit SHA and message of a synthesized stub tag.
pub const STUB_COMMIT_SHA: &str = "stub-commit-sha";
pub const STUB_MESSAGE: &str = "stub-message";

/// Placeholder in tag patterns that stands for the variant name.
const VARIANT_PLACEHOLDER: &str = "%s";

/// A resolved build tag for one build variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildTag {
    pub name: String,
    pub commit_sha: String,
    pub message: String,
    pub build_version: String,
    pub build_variant: String,
    pub build_number: u32,
}

impl BuildTag {
    /// Synthesize the fallback tag used when a variant has no build tags yet
    pub fn stub(variant: &str) -> Self {
        BuildTag {
            name: format!(
                "v{}.{}-{}",
                DEFAULT_BUILD_VERSION, DEFAULT_BUILD_NUMBER, variant
            ),
            commit_sha: STUB_COMMIT_SHA.to_string(),
            message: STUB_MESSAGE.to_string(),
            build_version: DEFAULT_BUILD_VERSION.to_string(),
            build_variant: variant.to_string(),
            build_number: DEFAULT_BUILD_NUMBER,
        }
    }

    /// Whether this tag was synthesized rather than read from the repository
    pub fn is_stub(&self) -> bool {
        self.commit_sha == STUB_COMMIT_SHA
    }
}

/// A variant-bound tag pattern.
///
/// The template is a format string such as `.+\.(\d+)-%s`; binding it to a
/// variant replaces `%s` with the (escaped) variant name. The whole tag name
/// must match, and the first capture group holds the build number.
#[derive(Debug, Clone)]
pub struct TagPattern {
    template: String,
    variant: String,
    regex: Regex,
}

impl TagPattern {
    /// Bind a pattern template to a build variant and compile it
    pub fn new(template: impl Into<String>, variant: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let variant = variant.into();
        let source = template.replace(VARIANT_PLACEHOLDER, &regex::escape(&variant));

        let regex = Regex::new(&format!("^(?:{})$", source))
            .map_err(|e| BuildPublishError::pattern(source.clone(), e))?;

        if regex.captures_len() < 2 {
            return Err(BuildPublishError::config(format!(
                "Tag pattern '{}' must contain a capture group for the build number",
                template
            )));
        }

        Ok(TagPattern {
            template,
            variant,
            regex,
        })
    }

    /// The unbound template string
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The variant this pattern is bound to
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// The compiled regular expression
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Validate if a tag name matches this pattern
    pub fn matches(&self, tag_name: &str) -> bool {
        self.regex.is_match(tag_name)
    }

    /// Parse a matching tag name into a [`BuildTag`]
    ///
    /// The build number comes from the first capture group; the build version is
    /// the dotted-number run right before it (`v1.0.2-debug` -> `1.0`).
    pub fn parse(&self, tag_name: &str, commit_sha: &str, message: &str) -> Result<BuildTag> {
        let captures = self.regex.captures(tag_name).ok_or_else(|| {
            BuildPublishError::tag_parse(
                &self.variant,
                tag_name,
                format!("does not match pattern '{}'", self.template),
            )
        })?;
        let number = captures.get(1).ok_or_else(|| {
            BuildPublishError::tag_parse(&self.variant, tag_name, "build number group is empty")
        })?;

        let build_number = number.as_str().parse::<u32>().map_err(|e| {
            BuildPublishError::tag_parse(
                &self.variant,
                tag_name,
                format!("build number '{}' is not a valid integer: {}", number.as_str(), e),
            )
        })?;

        Ok(BuildTag {
            name: tag_name.to_string(),
            commit_sha: commit_sha.to_string(),
            message: message.to_string(),
            build_version: extract_build_version(&tag_name[..number.start()]),
            build_variant: self.variant.clone(),
            build_number,
        })
    }

    /// Rewrite a tag name with its build number incremented by one
    ///
    /// Only the captured digits change, e.g. `v1.0.1-debug` -> `v1.0.2-debug`.
    pub fn next_tag_name(&self, tag: &BuildTag) -> Result<String> {
        let captures = self.regex.captures(&tag.name).ok_or_else(|| {
            BuildPublishError::tag_parse(
                &self.variant,
                &tag.name,
                format!("does not match pattern '{}'", self.template),
            )
        })?;
        let number = captures.get(1).ok_or_else(|| {
            BuildPublishError::tag_parse(&self.variant, &tag.name, "build number group is empty")
        })?;

        let next = tag.build_number.checked_add(1).ok_or_else(|| {
            BuildPublishError::tag_parse(&self.variant, &tag.name, "build number overflow")
        })?;

        Ok(format!(
            "{}{}{}",
            &tag.name[..number.start()],
            next,
            &tag.name[number.end()..]
        ))
    }
}

fn extract_build_version(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches(['.', '-', '_']);

    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map(|(i, _)| i);

    match start {
        Some(i) => trimmed[i..].trim_start_matches('.').to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug_pattern() -> TagPattern {
        TagPattern::new(DEFAULT_TAG_PATTERN, "debug").unwrap()
    }

    #[test]
    fn test_pattern_matches_variant_tags_only() {
        let pattern = debug_pattern();
        assert!(pattern.matches("v1.0.1-debug"));
        assert!(!pattern.matches("v1.0.1-release"));
        assert!(!pattern.matches("v1.0.1-debugX"));
        assert!(!pattern.matches("v1.0-debug-extra"));
    }

    #[test]
    fn test_parse_extracts_number_and_version() {
        let tag = debug_pattern().parse("v1.0.12-debug", "abc", "msg").unwrap();
        assert_eq!(tag.build_number, 12);
        assert_eq!(tag.build_version, "1.0");
        assert_eq!(tag.build_variant, "debug");
        assert_eq!(tag.commit_sha, "abc");
        assert_eq!(tag.message, "msg");
    }

    #[test]
    fn test_parse_version_with_text_prefix() {
        let pattern = TagPattern::new(r"release-.+\.(\d+)-%s", "googleRelease").unwrap();
        let tag = pattern
            .parse("release-2.3.7-googleRelease", "abc", "")
            .unwrap();
        assert_eq!(tag.build_number, 7);
        assert_eq!(tag.build_version, "2.3");
    }

    #[test]
    fn test_parse_non_numeric_build_number_fails() {
        let pattern = TagPattern::new(r"v.+\.(\w+)-%s", "debug").unwrap();
        let err = pattern.parse("v1.0.abc-debug", "sha", "").unwrap_err();
        assert!(matches!(err, BuildPublishError::TagParse { .. }));
        assert!(err.to_string().contains("v1.0.abc-debug"));
    }

    #[test]
    fn test_pattern_without_group_is_config_error() {
        let err = TagPattern::new(r"v.+-%s", "debug").unwrap_err();
        assert!(matches!(err, BuildPublishError::Config(_)));
    }

    #[test]
    fn test_invalid_pattern_is_pattern_error() {
        let err = TagPattern::new(r"v(\d+-%s", "debug").unwrap_err();
        assert!(matches!(err, BuildPublishError::Pattern { .. }));
    }

    #[test]
    fn test_next_tag_name_preserves_format() {
        let pattern = debug_pattern();
        let tag = pattern.parse("v1.0.1-debug", "sha", "").unwrap();
        assert_eq!(pattern.next_tag_name(&tag).unwrap(), "v1.0.2-debug");

        let tag = pattern.parse("v1.0.99-debug", "sha", "").unwrap();
        assert_eq!(pattern.next_tag_name(&tag).unwrap(), "v1.0.100-debug");
    }

    #[test]
    fn test_next_tag_name_of_stub() {
        let pattern = debug_pattern();
        let stub = BuildTag::stub("debug");
        assert_eq!(pattern.next_tag_name(&stub).unwrap(), "v0.0.2-debug");
    }

    #[test]
    fn test_stub_defaults() {
        let stub = BuildTag::stub("googleDebug");
        assert_eq!(stub.build_number, 1);
        assert_eq!(stub.build_version, "0.0");
        assert!(stub.name.contains("googleDebug"));
        assert!(stub.is_stub());
    }

    #[test]
    fn test_variant_name_is_escaped() {
        let pattern = TagPattern::new(DEFAULT_TAG_PATTERN, "a.b").unwrap();
        assert!(pattern.matches("v1.0.1-a.b"));
        assert!(!pattern.matches("v1.0.1-aXb"));
    }

    #[test]
    fn test_extract_build_version() {
        assert_eq!(extract_build_version("v1.0."), "1.0");
        assert_eq!(extract_build_version("1.2.3."), "1.2.3");
        assert_eq!(extract_build_version("build-"), "build");
        assert_eq!(extract_build_version(""), "");
    }
}
