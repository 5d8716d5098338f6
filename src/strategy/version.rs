use crate::domain::tag::{DEFAULT_BUILD_NUMBER, DEFAULT_BUILD_VERSION};
use crate::domain::BuildTag;
use serde::{Deserialize, Serialize};

/// How the version code is derived from a build tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VersionCodeStrategy {
    /// The tag's build number, or `1` without a tag
    #[default]
    BuildNumber,
    /// Always the given value
    Fixed(u32),
}

impl VersionCodeStrategy {
    pub fn build(&self, tag: Option<&BuildTag>) -> u32 {
        match self {
            VersionCodeStrategy::BuildNumber => {
                tag.map(|t| t.build_number).unwrap_or(DEFAULT_BUILD_NUMBER)
            }
            VersionCodeStrategy::Fixed(code) => *code,
        }
    }
}

/// How the version name is derived from a build tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VersionNameStrategy {
    /// The tag's build version, e.g. `1.0`
    #[default]
    BuildVersion,
    /// The raw tag name, e.g. `v1.0.2-debug`
    TagName,
    /// `{version}.{buildNumber}`, e.g. `1.0.2`
    VersionAndBuildNumber,
    /// `{version}-{variant}`, e.g. `1.0-debug`
    VersionAndVariant,
    /// Always the given value
    Fixed(String),
}

impl VersionNameStrategy {
    /// Build the version name; without a tag every tag-based policy yields `0.0`
    pub fn build(&self, tag: Option<&BuildTag>) -> String {
        let tag = match (self, tag) {
            (VersionNameStrategy::Fixed(name), _) => return name.clone(),
            (_, Some(tag)) => tag,
            (_, None) => return DEFAULT_BUILD_VERSION.to_string(),
        };

        match self {
            VersionNameStrategy::BuildVersion => tag.build_version.clone(),
            VersionNameStrategy::TagName => tag.name.clone(),
            VersionNameStrategy::VersionAndBuildNumber => {
                format!("{}.{}", tag.build_version, tag.build_number)
            }
            VersionNameStrategy::VersionAndVariant => {
                format!("{}-{}", tag.build_version, tag.build_variant)
            }
            VersionNameStrategy::Fixed(name) => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag() -> BuildTag {
        BuildTag {
            name: "v1.2.34-googleDebug".to_string(),
            commit_sha: "abc".to_string(),
            message: String::new(),
            build_version: "1.2".to_string(),
            build_variant: "googleDebug".to_string(),
            build_number: 34,
        }
    }

    #[test]
    fn test_version_code_from_tag() {
        assert_eq!(VersionCodeStrategy::BuildNumber.build(Some(&tag())), 34);
    }

    #[test]
    fn test_version_code_without_tag() {
        assert_eq!(VersionCodeStrategy::BuildNumber.build(None), 1);
        assert_eq!(VersionCodeStrategy::Fixed(7).build(None), 7);
        assert_eq!(VersionCodeStrategy::Fixed(7).build(Some(&tag())), 7);
    }

    #[test]
    fn test_version_name_policies() {
        let tag = tag();
        assert_eq!(VersionNameStrategy::BuildVersion.build(Some(&tag)), "1.2");
        assert_eq!(
            VersionNameStrategy::TagName.build(Some(&tag)),
            "v1.2.34-googleDebug"
        );
        assert_eq!(
            VersionNameStrategy::VersionAndBuildNumber.build(Some(&tag)),
            "1.2.34"
        );
        assert_eq!(
            VersionNameStrategy::VersionAndVariant.build(Some(&tag)),
            "1.2-googleDebug"
        );
    }

    #[test]
    fn test_version_name_without_tag() {
        assert_eq!(VersionNameStrategy::BuildVersion.build(None), "0.0");
        assert_eq!(VersionNameStrategy::TagName.build(None), "0.0");
        assert_eq!(
            VersionNameStrategy::Fixed("3.0".to_string()).build(None),
            "3.0"
        );
    }

    #[test]
    fn test_strategies_deserialize_from_config_strings() {
        #[derive(Deserialize)]
        struct Wrapper {
            code: VersionCodeStrategy,
            name: VersionNameStrategy,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
code = "build-number"
name = "version-and-build-number"
"#,
        )
        .unwrap();
        assert_eq!(parsed.code, VersionCodeStrategy::BuildNumber);
        assert_eq!(parsed.name, VersionNameStrategy::VersionAndBuildNumber);

        let fixed: Wrapper = toml::from_str(
            r#"
code = { fixed = 12 }
name = { fixed = "2.0" }
"#,
        )
        .unwrap();
        assert_eq!(fixed.code, VersionCodeStrategy::Fixed(12));
        assert_eq!(fixed.name, VersionNameStrategy::Fixed("2.0".to_string()));
    }
}
