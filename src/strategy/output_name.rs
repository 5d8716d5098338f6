use crate::domain::BuildTag;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extension of artifacts that get versioned names
pub const APK_EXTENSION: &str = "apk";

const DATE_FORMAT: &str = "%d%m%Y";

/// How the output artifact file is renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputNameStrategy {
    /// `{base}-{variant}-vc{buildNumber}-{ddMMyyyy}.apk` for apk files,
    /// `{base}.{ext}` for anything else
    #[default]
    Versioned,
    /// Always `{base}.{ext}`
    Simple,
    /// Always the given file name
    Fixed(String),
}

impl OutputNameStrategy {
    /// Build the output file name stamped with today's local date
    pub fn build(
        &self,
        original_file_name: &str,
        tag: Option<&BuildTag>,
        base_file_name: &str,
    ) -> String {
        self.build_for_date(
            original_file_name,
            tag,
            base_file_name,
            Local::now().date_naive(),
        )
    }

    /// Build the output file name stamped with `date`
    pub fn build_for_date(
        &self,
        original_file_name: &str,
        tag: Option<&BuildTag>,
        base_file_name: &str,
        date: NaiveDate,
    ) -> String {
        let extension = Path::new(original_file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match self {
            OutputNameStrategy::Fixed(name) => name.clone(),
            OutputNameStrategy::Simple => with_extension(base_file_name, extension),
            OutputNameStrategy::Versioned if extension == APK_EXTENSION => {
                let stamp = date.format(DATE_FORMAT);
                match tag {
                    Some(tag) => format!(
                        "{}-{}-vc{}-{}.{}",
                        base_file_name, tag.build_variant, tag.build_number, stamp, extension
                    ),
                    None => format!("{}-{}.{}", base_file_name, stamp, extension),
                }
            }
            OutputNameStrategy::Versioned => with_extension(base_file_name, extension),
        }
    }
}

fn with_extension(base: &str, extension: &str) -> String {
    if extension.is_empty() {
        base.to_string()
    } else {
        format!("{}.{}", base, extension)
    }
}
