//! Package format validation: required-file presence and the license
//! allow-list check against the `meta.yaml` descriptor.

use crate::ExitCode;
use serde::Deserialize;
use std::fs;
use std::path::Path;


pub const META_FILENAME: &str = "meta.yaml";
pub const REQUIRED_FILES: [&str; 4] = ["README.md", "meta.yaml", "_index.yaml", "LICENSE"];
pub const ALLOWED_LICENSES: [&str; 3] = ["MIT", "CC-BY-4.0", "CC-BY-NC-SA-4.0"];

/// Metadata descriptor. Only `license` is required; extra keys pass through
/// untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub license: String,
}

/// Terminal outcome of one validation pass. The first failing step wins;
/// there are no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReport {
    Valid,
    MissingFiles(Vec<String>),
    InvalidMetadata(String),
    InvalidLicense(String),
}

impl ValidationReport {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Valid => ExitCode::Success,
            Self::MissingFiles(_) | Self::InvalidMetadata(_) | Self::InvalidLicense(_) => {
                ExitCode::Validation
            }
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Valid => "✅ Format is valid.".to_string(),
            Self::MissingFiles(names) => {
                format!("Missing required files: {}", names.join(", "))
            }
            Self::InvalidMetadata(detail) => format!("Invalid metadata: {detail}"),
            Self::InvalidLicense(value) => format!("Invalid license: {value}"),
        }
    }
}

/// Required names absent from `root`, in the fixed required-list order.
pub fn check_required_files(root: &Path) -> Vec<String> {
    REQUIRED_FILES
        .iter()
        .filter(|name| !root.join(name).exists())
        .map(|name| (*name).to_string())
        .collect()
}

pub fn load_meta(path: &Path) -> Result<Meta, String> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_yaml::from_str(&text).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

#[must_use]
pub fn check_license(meta: &Meta) -> bool {
    ALLOWED_LICENSES.contains(&meta.license.as_str())
}

/// Two-step check: file presence first, then the declared license. A corrupt
/// or unreadable descriptor is a structured failure, not a fault.
pub fn validate_package(root: &Path) -> ValidationReport {
    let missing = check_required_files(root);
    if !missing.is_empty() {
        return ValidationReport::MissingFiles(missing);
    }
    match load_meta(&root.join(META_FILENAME)) {
        Ok(meta) if check_license(&meta) => ValidationReport::Valid,
        Ok(meta) => ValidationReport::InvalidLicense(meta.license),
        Err(detail) => ValidationReport::InvalidMetadata(detail),
    }
}
