use std::fmt;

/// Identity of a build target (flavor + build type)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildVariant {
    pub name: String,
    pub flavor_name: Option<String>,
    pub build_type: String,
}

impl BuildVariant {
    /// Create a variant from explicit parts
    pub fn new(flavor_name: Option<&str>, build_type: impl Into<String>) -> Self {
        let build_type = build_type.into();
        let name = match flavor_name {
            Some(flavor) if !flavor.is_empty() => {
                format!("{}{}", flavor, capitalize(&build_type))
            }
            _ => build_type.clone(),
        };

        BuildVariant {
            name,
            flavor_name: flavor_name.filter(|f| !f.is_empty()).map(str::to_string),
            build_type,
        }
    }

    /// Parse a full variant name
    ///
    /// The last camel-case segment is the build type and everything before it is
    /// the flavor: `googleDebug` -> (`google`, `debug`), `debug` -> (none, `debug`).
    pub fn parse(name: &str) -> Self {
        let split = name
            .char_indices()
            .filter(|(i, c)| *i > 0 && c.is_ascii_uppercase())
            .map(|(i, _)| i)
            .last();

        match split {
            Some(i) => BuildVariant {
                name: name.to_string(),
                flavor_name: Some(name[..i].to_string()),
                build_type: decapitalize(&name[i..]),
            },
            None => BuildVariant {
                name: name.to_string(),
                flavor_name: None,
                build_type: name.to_string(),
            },
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flavored_variant() {
        let variant = BuildVariant::parse("googleDebug");
        assert_eq!(variant.name, "googleDebug");
        assert_eq!(variant.flavor_name.as_deref(), Some("google"));
        assert_eq!(variant.build_type, "debug");
    }

    #[test]
    fn test_parse_plain_build_type() {
        let variant = BuildVariant::parse("release");
        assert_eq!(variant.flavor_name, None);
        assert_eq!(variant.build_type, "release");
    }

    #[test]
    fn test_parse_multi_segment_flavor() {
        let variant = BuildVariant::parse("googlePaidRelease");
        assert_eq!(variant.flavor_name.as_deref(), Some("googlePaid"));
        assert_eq!(variant.build_type, "release");
    }

    #[test]
    fn test_new_builds_camel_case_name() {
        assert_eq!(BuildVariant::new(Some("google"), "debug").name, "googleDebug");
        assert_eq!(BuildVariant::new(None, "debug").name, "debug");
        assert_eq!(BuildVariant::new(Some(""), "debug").flavor_name, None);
    }
}
