use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Root-cause category assigned to a failure.
///
/// Declaration order is the taxonomy order. It is used to break ties when
/// ranking categories and to lay out the export, so do not reorder variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    AbiEncodingErrors,
    TransactionReverts,
    OnlySelfErrors,
    MetaTransactionErrors,
    FunctionNotFoundErrors,
    OtherCustomErrors,
    RevertAssertionErrors,
    ValueAssertionErrors,
    TypeErrors,
    DataBoundsErrors,
    ParameterMissingErrors,
    ErrorEncodingMismatch,
    UnclassifiedErrors,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::AbiEncodingErrors,
        Category::TransactionReverts,
        Category::OnlySelfErrors,
        Category::MetaTransactionErrors,
        Category::FunctionNotFoundErrors,
        Category::OtherCustomErrors,
        Category::RevertAssertionErrors,
        Category::ValueAssertionErrors,
        Category::TypeErrors,
        Category::DataBoundsErrors,
        Category::ParameterMissingErrors,
        Category::ErrorEncodingMismatch,
        Category::UnclassifiedErrors,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::AbiEncodingErrors => "ABI_ENCODING_ERRORS",
            Category::TransactionReverts => "TRANSACTION_REVERTS",
            Category::OnlySelfErrors => "ONLY_SELF_ERRORS",
            Category::MetaTransactionErrors => "META_TRANSACTION_ERRORS",
            Category::FunctionNotFoundErrors => "FUNCTION_NOT_FOUND_ERRORS",
            Category::OtherCustomErrors => "OTHER_CUSTOM_ERRORS",
            Category::RevertAssertionErrors => "REVERT_ASSERTION_ERRORS",
            Category::ValueAssertionErrors => "VALUE_ASSERTION_ERRORS",
            Category::TypeErrors => "TYPE_ERRORS",
            Category::DataBoundsErrors => "DATA_BOUNDS_ERRORS",
            Category::ParameterMissingErrors => "PARAMETER_MISSING_ERRORS",
            Category::ErrorEncodingMismatch => "ERROR_ENCODING_MISMATCH",
            Category::UnclassifiedErrors => "UNCLASSIFIED_ERRORS",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}
