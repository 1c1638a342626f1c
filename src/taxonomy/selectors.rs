use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::Category;

/// Maps a 4-byte custom-error selector to the category it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRule {
    pub selector: String,
    pub category: Category,
}

impl SelectorRule {
    pub fn new(selector: &str, category: Category) -> Self {
        Self {
            selector: selector.to_string(),
            category,
        }
    }
}

/// The parts of the taxonomy that track the contracts under test and the
/// runner's locale. Everything else in the rule list is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Checked in order after the custom-revert phrase has matched.
    pub selectors: Vec<SelectorRule>,
    pub encoding_mismatch_markers: Vec<String>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            selectors: vec![
                // onlySelf guard
                SelectorRule::new("0x47ab394e", Category::OnlySelfErrors),
                SelectorRule::new("0xbea726ef", Category::MetaTransactionErrors),
                SelectorRule::new("0x734e6e1c", Category::FunctionNotFoundErrors),
            ],
            encoding_mismatch_markers: vec!["错误编码不匹配".to_string()],
        }
    }
}

impl TaxonomyConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read taxonomy file {}: {}", path.display(), e))
        })?;
        let config: TaxonomyConfig = serde_json::from_str(&raw)
            .map_err(|e| Error::Taxonomy(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            "Loaded {} selector rules from {}",
            config.selectors.len(),
            path.display()
        );
        config.normalized()
    }

    /// Validates the table and lowercases selector literals.
    pub fn normalized(mut self) -> Result<Self> {
        for rule in &mut self.selectors {
            let selector = rule.selector.trim().to_lowercase();
            if selector.is_empty() {
                return Err(Error::Taxonomy("selector literal is empty".to_string()));
            }
            if rule.category == Category::UnclassifiedErrors {
                return Err(Error::Taxonomy(format!(
                    "selector {} cannot map to {}",
                    selector,
                    Category::UnclassifiedErrors
                )));
            }
            rule.selector = selector;
        }

        self.encoding_mismatch_markers.retain(|m| !m.trim().is_empty());
        if self.encoding_mismatch_markers.is_empty() {
            return Err(Error::Taxonomy(
                "at least one encoding mismatch marker is required".to_string(),
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let config = TaxonomyConfig::default();
        assert_eq!(config.clone().normalized().unwrap(), config);
    }

    #[test]
    fn test_load_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.json");
        std::fs::write(
            &path,
            r#"{"selectors": [{"selector": " 0xDEADBEEF ", "category": "META_TRANSACTION_ERRORS"}]}"#,
        )
        .unwrap();

        let config = TaxonomyConfig::from_file(&path).unwrap();
        assert_eq!(
            config.selectors,
            vec![SelectorRule::new("0xdeadbeef", Category::MetaTransactionErrors)]
        );
        // omitted fields fall back to the defaults
        assert_eq!(
            config.encoding_mismatch_markers,
            TaxonomyConfig::default().encoding_mismatch_markers
        );
    }

    #[test]
    fn test_rejects_bad_tables() {
        let unclassified = TaxonomyConfig {
            selectors: vec![SelectorRule::new("0x01020304", Category::UnclassifiedErrors)],
            ..Default::default()
        };
        assert!(matches!(unclassified.normalized(), Err(Error::Taxonomy(_))));

        let blank = TaxonomyConfig {
            selectors: vec![SelectorRule::new("  ", Category::OnlySelfErrors)],
            ..Default::default()
        };
        assert!(blank.normalized().is_err());

        let no_markers = TaxonomyConfig {
            encoding_mismatch_markers: vec![String::new()],
            ..Default::default()
        };
        assert!(no_markers.normalized().is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TaxonomyConfig::from_file("/nonexistent/taxonomy.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
