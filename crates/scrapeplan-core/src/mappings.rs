//! Curated category mappings loaded from YAML, used to seed the lookup store.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::TargetKind;
use crate::ConfigError;

/// One curated group: every value of `kind` for a category or subcategory,
/// listed in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub kind: TargetKind,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    pub values: Vec<String>,
}

impl CategoryMapping {
    /// Lowercased, trimmed lookup keys.
    #[must_use]
    pub fn keys(&self) -> (String, String) {
        (
            self.category.trim().to_lowercase(),
            self.subcategory.trim().to_lowercase(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingsFile {
    #[serde(default)]
    pub mappings: Vec<CategoryMapping>,
}

/// Load and validate curated mappings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_category_mappings(path: &Path) -> Result<MappingsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::MappingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: MappingsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::MappingsFileParse)?;

    validate_mappings(&file)?;

    Ok(file)
}

fn validate_mappings(file: &MappingsFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for mapping in &file.mappings {
        let (category, subcategory) = mapping.keys();
        if category.is_empty() && subcategory.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{} mapping needs a category or a subcategory",
                mapping.kind
            )));
        }

        if mapping.values.iter().any(|v| v.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} mapping for '{category}/{subcategory}' has a blank value",
                mapping.kind
            )));
        }

        if !seen.insert((mapping.kind, category.clone(), subcategory.clone())) {
            return Err(ConfigError::Validation(format!(
                "duplicate {} mapping for '{category}/{subcategory}'",
                mapping.kind
            )));
        }
    }

    Ok(())
}
