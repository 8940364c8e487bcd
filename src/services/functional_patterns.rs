//! Validation combinators for the service layer.
//!
//! A [`Validator`] is an ordered list of rules; validation stops at the first
//! rule that fails and returns its error unchanged.

use crate::error::{ServiceError, ServiceResult};

/// Functional validation combinator
pub struct Validator<T> {
    rules: Vec<Box<dyn Fn(&T) -> ServiceResult<()> + Send + Sync>>,
}

impl<T> Validator<T> {
    /// Create a new empty validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a validation rule
    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> ServiceResult<()> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Validate the input against all rules, first failure wins
    pub fn validate(&self, input: &T) -> ServiceResult<()> {
        self.rules.iter().try_for_each(|rule| rule(input))
    }

    /// Apply the current rules only when a condition is met
    pub fn when<F>(self, condition: F) -> Validator<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
        T: 'static,
    {
        let rules = self.rules;
        Validator::new().rule(move |input: &T| {
            if condition(input) {
                rules.iter().try_for_each(|rule| rule(input))
            } else {
                Ok(())
            }
        })
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Common reusable validation rules
pub mod validation_rules {
    use super::{ServiceError, ServiceResult};
    use regex::Regex;

    /// Validate that an optional value was supplied
    pub fn present<V>(message: &'static str) -> impl Fn(&Option<V>) -> ServiceResult<()> {
        move |value: &Option<V>| match value {
            Some(_) => Ok(()),
            None => Err(ServiceError::field_validation(message)),
        }
    }

    /// Validate that a string has a minimum length, counted in characters
    pub fn min_length(field_name: &'static str, min: usize) -> impl Fn(&str) -> ServiceResult<()> {
        move |value: &str| {
            if value.chars().count() < min {
                Err(ServiceError::field_validation(format!(
                    "{} must be at least {} characters long",
                    field_name, min
                )))
            } else {
                Ok(())
            }
        }
    }

    /// Validate that a string matches a precompiled pattern
    pub fn matches(
        regex: &'static Regex,
        message: &'static str,
    ) -> impl Fn(&str) -> ServiceResult<()> {
        move |value: &str| {
            if regex.is_match(value) {
                Ok(())
            } else {
                Err(ServiceError::field_validation(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use once_cell::sync::Lazy;
    use regex::Regex;

    static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

    #[test]
    fn test_validator() {
        let validator = Validator::<i32>::new()
            .rule(|&x| {
                if x > 0 {
                    Ok(())
                } else {
                    Err(ServiceError::field_validation("Must be positive"))
                }
            })
            .rule(|&x| {
                if x < 100 {
                    Ok(())
                } else {
                    Err(ServiceError::field_validation("Must be less than 100"))
                }
            });

        assert!(validator.validate(&50).is_ok());
        assert!(validator.validate(&-1).is_err());
        assert!(validator.validate(&101).is_err());
    }

    #[test]
    fn test_first_failure_wins() {
        let validator = Validator::<String>::new()
            .rule(|s: &String| validation_rules::min_length("value", 5)(s.as_str()))
            .rule(|s: &String| validation_rules::matches(&DIGITS, "digits only")(s.as_str()));

        let err = validator.validate(&"ab".to_string()).unwrap_err();
        assert_eq!(
            err.kind(),
            &FailureKind::FieldValidation("value must be at least 5 characters long".into())
        );

        let err = validator.validate(&"abcdef".to_string()).unwrap_err();
        assert_eq!(err.kind(), &FailureKind::FieldValidation("digits only".into()));
    }

    #[test]
    fn test_when_skips_rules() {
        let validator = Validator::<Option<String>>::new()
            .rule(|v: &Option<String>| match v {
                Some(s) => validation_rules::matches(&DIGITS, "digits only")(s.as_str()),
                None => Ok(()),
            })
            .when(|v: &Option<String>| v.is_some());

        assert!(validator.validate(&None).is_ok());
        assert!(validator.validate(&Some("123".into())).is_ok());
        assert!(validator.validate(&Some("12a".into())).is_err());
    }

    #[test]
    fn test_present_rule() {
        let rule = validation_rules::present::<String>("number is required");
        assert!(rule(&Some("1".into())).is_ok());
        assert_eq!(
            rule(&None).unwrap_err().to_string(),
            "number is required"
        );
    }

    #[test]
    fn test_min_length_counts_chars() {
        let rule = validation_rules::min_length("content", 3);
        assert!(rule("äöü").is_ok());
        assert!(rule("äö").is_err());
    }
}
