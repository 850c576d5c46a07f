//! Argument and content validation.
//!
//! Shape checks (`check_*`, `require_*`) fail with an [`Error`]; content
//! predicates (`is_valid_*`, `compute_validity`) never fail and only answer
//! yes or no, because invalid content is recorded rather than rejected.

use bytes::Bytes;
use donation_ledger_state::StateError;
use serde_json::Value as JsonValue;

use crate::{DomainConfig, Error};

/// Validation rules bound to one domain configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: DomainConfig,
}

fn join_values<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

fn describe_json(value: &JsonValue) -> String {
    let type_name = match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    };
    format!("{} {}", type_name, value)
}

fn reads_as_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return unsigned == "Infinity";
    }
    !unsigned.is_empty() && text.parse::<f64>().is_ok_and(|v| !v.is_nan())
}

impl Validator {
    pub fn new(config: DomainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    // === Shape checks ===

    /// Fail unless exactly `expected` values were given.
    pub fn check_exact_arity<S: AsRef<str>>(values: &[S], expected: usize) -> Result<(), Error> {
        if values.len() != expected {
            return Err(Error::Arity {
                expected,
                actual: values.len(),
                values: join_values(values),
            });
        }
        Ok(())
    }

    /// Fail unless the number of values lies in `[lower, upper]`.
    pub fn check_arity_in_range<S: AsRef<str>>(
        values: &[S],
        lower: usize,
        upper: usize,
    ) -> Result<(), Error> {
        if values.len() < lower || values.len() > upper {
            return Err(Error::ArityRange {
                lower,
                upper,
                actual: values.len(),
                values: join_values(values),
            });
        }
        Ok(())
    }

    /// Fail unless `value` is exactly `expected` characters long.
    pub fn check_fixed_length(value: &str, expected: usize) -> Result<(), Error> {
        let actual = value.chars().count();
        if actual != expected {
            return Err(Error::Arity {
                expected,
                actual,
                values: value.to_string(),
            });
        }
        Ok(())
    }

    /// Pin a record key to the configured key length.
    pub fn check_key(&self, key: &str) -> Result<(), Error> {
        Self::check_fixed_length(key, self.config.key_length)
    }

    /// Fail unless `value` is a JSON array.
    pub fn require_array(value: &JsonValue) -> Result<&Vec<JsonValue>, Error> {
        value.as_array().ok_or_else(|| Error::Type {
            expected: "array",
            found: describe_json(value),
        })
    }

    /// Fail if the store read call itself failed.
    pub fn require_retrieved(raw: Result<Bytes, StateError>) -> Result<Bytes, Error> {
        raw.map_err(Error::Retrieval)
    }

    /// Fail if the stored bytes say the key is not present.
    pub fn require_existing_record(raw: &[u8]) -> Result<(), Error> {
        if raw.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    /// Fail if `count` is odd.
    pub fn require_even_count(count: usize) -> Result<(), Error> {
        if count % 2 != 0 {
            return Err(Error::UnevenPairs { count });
        }
        Ok(())
    }

    // === Content predicates ===

    pub fn is_valid_project(&self, code: &str) -> bool {
        let valid = self.config.projects.iter().any(|p| p == code);
        if !valid {
            tracing::info!(
                project = code,
                valid_projects = %self.config.projects.join(","),
                "project is not valid"
            );
        }
        valid
    }

    pub fn is_valid_item_type(&self, code: &str) -> bool {
        let valid = self.config.item_types.iter().any(|t| t == code);
        if !valid {
            tracing::info!(
                item_type = code,
                valid_item_types = %self.config.item_types.join(","),
                "item type is not valid"
            );
        }
        valid
    }

    /// Whether `text` reads as a number (surrounding whitespace allowed).
    ///
    /// The only spelled-out value accepted is `Infinity`, optionally signed.
    pub fn is_valid_amount(&self, text: &str) -> bool {
        let valid = reads_as_number(text.trim());
        if !valid {
            tracing::info!(amount = text, "amount is not valid, it should be a number");
        }
        valid
    }

    /// All three content checks together.
    pub fn compute_validity(&self, project: &str, item_type: &str, amount: &str) -> bool {
        self.is_valid_project(project)
            && self.is_valid_item_type(item_type)
            && self.is_valid_amount(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn exact_arity_message_lists_everything() {
        let err = Validator::check_exact_arity(&["ITU", "toys", "1", "unexpected arg"], 3)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert_eq!(
            err.to_string(),
            "Invalid number of arguments. Expected 3, got 4 in args: ITU,toys,1,unexpected arg."
        );
        assert!(Validator::check_exact_arity(&["a", "b", "c"], 3).is_ok());
    }

    #[test]
    fn init_arity_on_single_param() {
        let err = Validator::check_exact_arity(&["unexpected param"], 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid number of arguments. Expected 0, got 1 in args: unexpected param."
        );
    }

    #[test]
    fn range_is_inclusive() {
        let values = ["a", "b", "c", "d"];
        assert!(Validator::check_arity_in_range(&values, 2, 5).is_ok());
        assert!(Validator::check_arity_in_range(&values, 4, 4).is_ok());
        let err = Validator::check_arity_in_range(&values, 2, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert!(err.to_string().contains("between 2-3, got 4"));
    }

    #[test]
    fn fixed_length_counts_characters() {
        let err = Validator::check_fixed_length("test", 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid number of arguments. Expected 2, got 4 in args: test."
        );
        assert!(Validator::check_fixed_length("test", 4).is_ok());
        assert!(Validator::check_fixed_length("héé", 3).is_ok());
    }

    #[test]
    fn key_length_comes_from_config() {
        let validator = Validator::new(DomainConfig::new(["P"], ["I"], 4));
        assert!(validator.check_key("abcd").is_ok());
        assert!(validator.check_key(&"a".repeat(64)).is_err());
        assert!(Validator::default().check_key(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn require_array_rejects_scalars() {
        let err = Validator::require_array(&serde_json::json!(123)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(
            err.to_string(),
            "Invalid argument type. Expected array, got number 123."
        );
        assert_eq!(
            Validator::require_array(&serde_json::json!([1, 2]))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn retrieval_failure_is_distinct_from_empty() {
        let err = Validator::require_retrieved(Err(StateError::unavailable("down"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Retrieval);

        let empty = Validator::require_retrieved(Ok(Bytes::new())).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn empty_stored_value_is_not_found() {
        let err = Validator::require_existing_record(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "Donation data is absent OR no state registered."
        );
        assert!(Validator::require_existing_record(b"test").is_ok());
    }

    #[test]
    fn even_count() {
        assert!(Validator::require_even_count(0).is_ok());
        assert!(Validator::require_even_count(4).is_ok());
        assert_eq!(
            Validator::require_even_count(3).unwrap_err().kind(),
            ErrorKind::Arity
        );
    }

    #[test]
    fn domain_predicates() {
        let v = Validator::default();
        assert!(v.is_valid_project("FAO"));
        assert!(!v.is_valid_project("test"));
        assert!(!v.is_valid_project("fao"));
        assert!(v.is_valid_item_type("water"));
        assert!(v.is_valid_item_type("packed food"));
        assert!(!v.is_valid_item_type("test"));
        assert!(v.is_valid_amount("87"));
        assert!(v.is_valid_amount(" 3.2 "));
        assert!(v.is_valid_amount("1e3"));
        assert!(!v.is_valid_amount("abc"));
        assert!(!v.is_valid_amount(""));
        assert!(!v.is_valid_amount("NaN"));
    }

    #[test]
    fn only_the_exact_infinity_spelling_is_a_number() {
        let v = Validator::default();
        assert!(v.is_valid_amount("Infinity"));
        assert!(v.is_valid_amount("+Infinity"));
        assert!(v.is_valid_amount(" -Infinity "));
        for text in ["inf", "+inf", "-inf", "INF", "infinity", "+infinity", "INFINITY", "nan", "+"] {
            assert!(!v.is_valid_amount(text), "{}", text);
        }
        assert!(v.compute_validity("FAO", "water", "Infinity"));
        assert!(!v.compute_validity("FAO", "water", "inf"));
    }

    #[test]
    fn validity_of_known_triples() {
        let v = Validator::default();
        assert!(v.compute_validity("FAO", "water", "3.2"));
        assert!(!v.compute_validity("test", "test", "3.2"));
        assert!(!v.compute_validity("XXX", "water", "3.2"));
    }

    #[test]
    fn substituted_domain_changes_validity() {
        let v = Validator::new(DomainConfig::new(["UNICEF"], ["books"], 64));
        assert!(v.compute_validity("UNICEF", "books", "1"));
        assert!(!v.compute_validity("FAO", "water", "1"));
    }

    proptest! {
        #[test]
        fn validity_is_conjunction_of_field_checks(
            project in prop::sample::select(vec!["FAO", "ILO", "WHO", "XXX", ""]),
            item_type in prop::sample::select(vec!["water", "toys", "lantern", "rocks", ""]),
            amount in prop_oneof![
                any::<i64>().prop_map(|n| n.to_string()),
                any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| f.to_string()),
                "[a-z]{1,6}",
            ],
        ) {
            let v = Validator::default();
            let expected = DomainConfig::default().projects.iter().any(|p| p == project)
                && DomainConfig::default().item_types.iter().any(|t| t == item_type)
                && amount.parse::<f64>().is_ok_and(|f| f.is_finite());
            prop_assert_eq!(v.compute_validity(project, item_type, &amount), expected);
        }

        #[test]
        fn exact_arity_error_names_both_counts(len in 0usize..8, expected in 0usize..8) {
            let values: Vec<String> = (0..len).map(|i| format!("v{}", i)).collect();
            let result = Validator::check_exact_arity(&values, expected);
            if len == expected {
                prop_assert!(result.is_ok());
            } else {
                let message = result.unwrap_err().to_string();
                let expected_text = format!("Expected {}", expected);
                let actual_text = format!("got {}", len);
                prop_assert!(message.contains(&expected_text));
                prop_assert!(message.contains(&actual_text));
                prop_assert!(message.contains(&values.join(",")));
            }
        }
    }
}
