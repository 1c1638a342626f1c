pub mod selectors;

use crate::error::Result;
use crate::models::Category;

pub use selectors::{SelectorRule, TaxonomyConfig};

pub const ABI_COMPONENT_MISSING: &str = "missing value for component id";
pub const REVERT_WITHOUT_REASON: &str = "Transaction reverted without a reason string";
pub const CUSTOM_ERROR_REVERT: &str = "reverted with an unrecognized custom error";
pub const EXPECTED_REVERT_REASON: &str = "Expected transaction to be reverted with reason";
pub const ASSERTION_EXPECTED: &str = "AssertionError: expected";
pub const ASSERTION_TO_EQUAL: &str = "to equal";
pub const TYPE_ERROR: &str = "TypeError:";
pub const NOT_A_FUNCTION: &str = "is not a function";
pub const DATA_OUT_OF_BOUNDS: &str = "data out-of-bounds";
pub const PARAMETERS_NOT_SET: &str = "does not have all its parameter values set";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Every phrase must occur in the body.
    AllOf(Vec<String>),
    /// At least one phrase must occur in the body.
    AnyOf(Vec<String>),
}

impl Predicate {
    fn all(phrases: &[&str]) -> Self {
        Predicate::AllOf(phrases.iter().map(|p| p.to_string()).collect())
    }

    pub fn matches(&self, body: &str) -> bool {
        match self {
            Predicate::AllOf(phrases) => phrases.iter().all(|p| body.contains(p.as_str())),
            Predicate::AnyOf(phrases) => phrases.iter().any(|p| body.contains(p.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub category: Category,
    pub predicate: Predicate,
}

impl Rule {
    fn new(category: Category, predicate: Predicate) -> Self {
        Self {
            category,
            predicate,
        }
    }
}

/// Ordered first-match-wins classifier over failure bodies.
///
/// Bodies often satisfy several rules at once (a custom-error revert is
/// usually also reported through a generic assertion), so the order of
/// `rules` decides the outcome. Anything no rule matches is
/// `Category::UnclassifiedErrors`.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::from_table(&TaxonomyConfig::default())
    }

    /// Validates `config` first; an empty selector would otherwise match
    /// every custom-error body.
    pub fn with_config(config: &TaxonomyConfig) -> Result<Self> {
        let config = config.clone().normalized()?;
        Ok(Self::from_table(&config))
    }

    fn from_table(config: &TaxonomyConfig) -> Self {
        let mut rules = vec![
            Rule::new(Category::AbiEncodingErrors, Predicate::all(&[ABI_COMPONENT_MISSING])),
            Rule::new(Category::TransactionReverts, Predicate::all(&[REVERT_WITHOUT_REASON])),
        ];

        // A selector only counts inside a custom-error revert.
        for selector in &config.selectors {
            rules.push(Rule::new(
                selector.category,
                Predicate::all(&[CUSTOM_ERROR_REVERT, selector.selector.as_str()]),
            ));
        }

        rules.extend([
            Rule::new(Category::OtherCustomErrors, Predicate::all(&[CUSTOM_ERROR_REVERT])),
            Rule::new(
                Category::RevertAssertionErrors,
                Predicate::all(&[EXPECTED_REVERT_REASON]),
            ),
            Rule::new(
                Category::ValueAssertionErrors,
                Predicate::all(&[ASSERTION_EXPECTED, ASSERTION_TO_EQUAL]),
            ),
            Rule::new(
                Category::FunctionNotFoundErrors,
                Predicate::all(&[TYPE_ERROR, NOT_A_FUNCTION]),
            ),
            Rule::new(Category::TypeErrors, Predicate::all(&[TYPE_ERROR])),
            Rule::new(Category::DataBoundsErrors, Predicate::all(&[DATA_OUT_OF_BOUNDS])),
            Rule::new(
                Category::ParameterMissingErrors,
                Predicate::all(&[PARAMETERS_NOT_SET]),
            ),
            Rule::new(
                Category::ErrorEncodingMismatch,
                Predicate::AnyOf(config.encoding_mismatch_markers.clone()),
            ),
        ]);

        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule whose predicate holds, or `None` when the body falls
    /// through to the unclassified bucket.
    pub fn matching_rule(&self, body: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.predicate.matches(body))
    }

    pub fn classify(&self, body: &str) -> Category {
        self.matching_rule(body)
            .map(|rule| rule.category)
            .unwrap_or(Category::UnclassifiedErrors)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_error(selector: &str) -> String {
        format!(
            "Error: VM Exception while processing transaction: {} ({})",
            CUSTOM_ERROR_REVERT, selector
        )
    }

    #[test]
    fn test_each_rule_in_isolation() {
        let classifier = Classifier::new();
        let cases = [
            ("Error: missing value for component id".to_string(), Category::AbiEncodingErrors),
            (
                "Error: Transaction reverted without a reason string".to_string(),
                Category::TransactionReverts,
            ),
            (custom_error("0x47ab394e"), Category::OnlySelfErrors),
            (custom_error("0xbea726ef"), Category::MetaTransactionErrors),
            (custom_error("0x734e6e1c"), Category::FunctionNotFoundErrors),
            (custom_error("0x12345678"), Category::OtherCustomErrors),
            (
                "AssertionError: Expected transaction to be reverted with reason 'nope'".to_string(),
                Category::RevertAssertionErrors,
            ),
            (
                "AssertionError: expected 1 to equal 2".to_string(),
                Category::ValueAssertionErrors,
            ),
            (
                "TypeError: contract.foo is not a function".to_string(),
                Category::FunctionNotFoundErrors,
            ),
            (
                "TypeError: Cannot read properties of undefined".to_string(),
                Category::TypeErrors,
            ),
            (
                "RangeError: data out-of-bounds (length=4, offset=32)".to_string(),
                Category::DataBoundsErrors,
            ),
            (
                "Error: Instance of OrderInfo does not have all its parameter values set".to_string(),
                Category::ParameterMissingErrors,
            ),
            ("错误编码不匹配: 0x08c379a0".to_string(), Category::ErrorEncodingMismatch),
            ("Error: timeout of 2000ms exceeded".to_string(), Category::UnclassifiedErrors),
        ];

        for (body, expected) in cases {
            assert_eq!(classifier.classify(&body), expected, "body: {}", body);
        }
    }

    #[test]
    fn test_selector_beats_value_assertion() {
        let classifier = Classifier::new();
        let body = format!(
            "AssertionError: expected '0x' to equal '0x01'\n{}",
            custom_error("0x47ab394e")
        );
        assert_eq!(classifier.classify(&body), Category::OnlySelfErrors);
    }

    #[test]
    fn test_selector_without_custom_error_phrase() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.classify("returned data 0x47ab394e0000"),
            Category::UnclassifiedErrors
        );
        assert_eq!(
            classifier.classify("AssertionError: expected 0x47ab394e to equal 0x00"),
            Category::ValueAssertionErrors
        );
    }

    #[test]
    fn test_earlier_rules_win() {
        let classifier = Classifier::new();
        let body = format!(
            "{}\n{}\nTypeError: x is not a function",
            REVERT_WITHOUT_REASON,
            custom_error("0xbea726ef")
        );
        assert_eq!(classifier.classify(&body), Category::TransactionReverts);

        let body = format!("{}\n{}", ABI_COMPONENT_MISSING, REVERT_WITHOUT_REASON);
        assert_eq!(classifier.classify(&body), Category::AbiEncodingErrors);
    }

    #[test]
    fn test_value_assertion_needs_both_phrases() {
        let classifier = Classifier::new();
        assert_eq!(
            classifier.classify("AssertionError: expected true"),
            Category::UnclassifiedErrors
        );
        assert_eq!(
            classifier.classify("values to equal each other"),
            Category::UnclassifiedErrors
        );
    }

    #[test]
    fn test_unclassified_iff_no_rule_matches() {
        let classifier = Classifier::new();
        let bodies = [
            "",
            "plain text",
            "TypeError: boom",
            "data out-of-bounds",
            custom_error("0xffffffff").as_str(),
        ]
        .map(String::from);

        for body in &bodies {
            let any_match = classifier.rules().iter().any(|r| r.predicate.matches(body));
            assert_eq!(
                classifier.classify(body) == Category::UnclassifiedErrors,
                !any_match
            );
        }
    }

    #[test]
    fn test_configured_selector_table() {
        let config = TaxonomyConfig {
            selectors: vec![SelectorRule::new("0xcafebabe", Category::OnlySelfErrors)],
            encoding_mismatch_markers: vec!["encoding mismatch".to_string()],
        };
        let classifier = Classifier::with_config(&config).unwrap();

        assert_eq!(
            classifier.classify(&custom_error("0xcafebabe")),
            Category::OnlySelfErrors
        );
        // the default selectors are gone
        assert_eq!(
            classifier.classify(&custom_error("0x47ab394e")),
            Category::OtherCustomErrors
        );
        assert_eq!(
            classifier.classify("error: encoding mismatch"),
            Category::ErrorEncodingMismatch
        );
    }

    #[test]
    fn test_with_config_rejects_blank_selector() {
        let config = TaxonomyConfig {
            selectors: vec![SelectorRule::new("", Category::OnlySelfErrors)],
            ..Default::default()
        };
        assert!(matches!(
            Classifier::with_config(&config),
            Err(crate::error::Error::Taxonomy(_))
        ));
    }

    #[test]
    fn test_with_config_lowercases_selectors() {
        let config = TaxonomyConfig {
            selectors: vec![SelectorRule::new("0xCAFEBABE", Category::MetaTransactionErrors)],
            ..Default::default()
        };
        let classifier = Classifier::with_config(&config).unwrap();
        assert_eq!(
            classifier.classify(&custom_error("0xcafebabe")),
            Category::MetaTransactionErrors
        );
    }

    #[test]
    fn test_default_rule_order() {
        let order: Vec<Category> = Classifier::new().rules().iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::AbiEncodingErrors,
                Category::TransactionReverts,
                Category::OnlySelfErrors,
                Category::MetaTransactionErrors,
                Category::FunctionNotFoundErrors,
                Category::OtherCustomErrors,
                Category::RevertAssertionErrors,
                Category::ValueAssertionErrors,
                Category::FunctionNotFoundErrors,
                Category::TypeErrors,
                Category::DataBoundsErrors,
                Category::ParameterMissingErrors,
                Category::ErrorEncodingMismatch,
            ]
        );
    }
}
