//! Assertion helpers for the error kinds callers branch on.

use common::{DbError, DbResult};

/// Assert that an operation returns an error containing a specific substring.
///
/// # Example
///
/// ```
/// use testsupport::prelude::*;
///
/// let result: Result<(), common::DbError> =
///     Err(common::DbError::NotFound("flight 9 does not exist".into()));
/// assert_error_contains(result, "flight 9");
/// ```
pub fn assert_error_contains<T>(result: DbResult<T>, expected_msg: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}', but got Ok", expected_msg),
        Err(e) => {
            let error_string = e.to_string();
            assert!(
                error_string.contains(expected_msg),
                "Expected error to contain '{}', but got: {}",
                expected_msg,
                error_string
            );
        }
    }
}

pub fn assert_not_found<T>(result: DbResult<T>) {
    match result {
        Err(DbError::NotFound(_)) => {}
        Err(other) => panic!("Expected not found error, but got: {}", other),
        Ok(_) => panic!("Expected not found error, but got Ok"),
    }
}

pub fn assert_conflict<T>(result: DbResult<T>) {
    match result {
        Err(DbError::Conflict(_)) => {}
        Err(other) => panic!("Expected conflict error, but got: {}", other),
        Ok(_) => panic!("Expected conflict error, but got Ok"),
    }
}

/// Assert a validation failure whose message contains `expected_msg`.
pub fn assert_validation<T>(result: DbResult<T>, expected_msg: &str) {
    match result {
        Err(DbError::Validation(msg)) => assert!(
            msg.contains(expected_msg),
            "Expected validation error to contain '{}', but got: {}",
            expected_msg,
            msg
        ),
        Err(other) => panic!(
            "Expected validation error '{}', but got different error: {}",
            expected_msg, other
        ),
        Ok(_) => panic!("Expected validation error '{}', but got Ok", expected_msg),
    }
}

/// Assert a fatal store failure.
pub fn assert_storage_error<T>(result: DbResult<T>) {
    match result {
        Err(e) if e.is_fatal() => {}
        Err(other) => panic!("Expected storage error, but got: {}", other),
        Ok(_) => panic!("Expected storage error, but got Ok"),
    }
}
