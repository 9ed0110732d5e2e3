//! Aggregate function categories

/// Functions the builder refuses to emit.
///
/// These need conditional, range or raw expressions as parameters, which an
/// [`super::AggregationItem`] cannot carry. The platform may extend this set;
/// keep it in sync with the aggregate API's capabilities.
pub const UNSUPPORTED_FUNCTIONS: &[&str] =
    &["CASE", "BETWEEN", "LEFT", "RAW", "NONE", "COUNT_SUBITEMS"];

/// Functions that map each item's value to a different value.
///
/// Distinct transformed values form distinct groups on the backend.
pub const TRANSFORMING_FUNCTIONS: &[&str] = &[
    // text
    "LOWER",
    "UPPER",
    "TRIM",
    "LENGTH",
    // dates
    "HOUR",
    "START_OF_DAY",
    "END_OF_DAY",
    "START_OF_WEEK",
    "END_OF_WEEK",
    "START_OF_MONTH",
    "END_OF_MONTH",
    "START_OF_QUARTER",
    "END_OF_QUARTER",
    "START_OF_YEAR",
    "END_OF_YEAR",
    // column value resolution
    "COLOR",
    "LABEL",
    "IS_DONE",
    "PERSON",
    "PHONE_COUNTRY_SHORT_NAME",
];

/// How a function behaves with respect to grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionCategory {
    /// Cannot be expressed by the builder; selecting it fails the build
    Unsupported,
    /// Changes each value; its column must be a grouping key
    Transforming,
    /// Produces one scalar per group (COUNT, SUM, AVERAGE, ...)
    Reducing,
}

/// Static lookup of [`FunctionCategory`] by function identifier
pub struct FunctionClassifier;

impl FunctionClassifier {
    /// Classify a function identifier, ignoring ASCII case
    ///
    /// Anything not listed as unsupported or transforming is reducing.
    pub fn classify(function_name: &str) -> FunctionCategory {
        let listed = |table: &[&str]| {
            table
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(function_name))
        };

        if listed(UNSUPPORTED_FUNCTIONS) {
            FunctionCategory::Unsupported
        } else if listed(TRANSFORMING_FUNCTIONS) {
            FunctionCategory::Transforming
        } else {
            FunctionCategory::Reducing
        }
    }
}
