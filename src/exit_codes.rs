//! Exit code constants for the prestart CLI.
//!
//! - 0: Success, the managed server may start
//! - 1: Usage or configuration error, nothing was attempted
//! - 2: A preflight step failed and its policy is fail-fast

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Usage error: wrong argument count or invalid configuration.
pub const USAGE_ERROR: i32 = 1;

/// Preflight failure: template compilation, path resolution, or the
/// environment check failed.
pub const PREFLIGHT_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USAGE_ERROR, PREFLIGHT_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn usage_error_is_one() {
        // The launcher only distinguishes zero from non-zero, but the usage
        // contract pins 1 specifically.
        assert_eq!(USAGE_ERROR, 1);
    }
}
