//! Assertions for test validation.

use std::fmt::Debug;

use crate::result::{EntrarError, EntrarResult};

/// Result of an assertion
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message
    pub message: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }

    /// Convert into an [`EntrarResult`], so test bodies can `?` assertions.
    ///
    /// # Errors
    ///
    /// Returns [`EntrarError::AssertionFailed`] when the assertion did not hold.
    pub fn into_result(self) -> EntrarResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(EntrarError::AssertionFailed {
                message: self.message,
            })
        }
    }
}

/// Assertion helpers for testing
pub struct Assertion;

impl Assertion {
    /// Assert a string contains a substring
    #[must_use]
    pub fn contains(haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected '{haystack}' to contain '{needle}'"))
        }
    }

    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug>(expected: &T, actual: &T) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(format!("expected {expected:?}, got {actual:?}"))
        }
    }

    /// Assert a condition is true
    #[must_use]
    pub fn is_true(condition: bool, message: &str) -> AssertionResult {
        if condition {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(message)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pass() {
        let result = Assertion::contains("You logged into a secure area!", "secure area");
        assert!(result.passed);
        assert!(result.message.is_empty());
    }

    #[test]
    fn test_contains_fail_names_both_strings() {
        let result = Assertion::contains("Your username is invalid!", "secure area");
        assert!(!result.passed);
        assert!(result.message.contains("Your username is invalid!"));
        assert!(result.message.contains("secure area"));
    }

    #[test]
    fn test_equals() {
        assert!(Assertion::equals(&3, &3).passed);
        assert!(!Assertion::equals(&3, &4).passed);
    }

    #[test]
    fn test_into_result_maps_failure_to_error() {
        assert!(AssertionResult::pass().into_result().is_ok());
        let err = AssertionResult::fail("nope").into_result().unwrap_err();
        assert!(matches!(err, EntrarError::AssertionFailed { .. }));
    }
}
