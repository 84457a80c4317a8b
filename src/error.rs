//! Error classification shared by every layer.
//!
//! Each error enum in the crate carries a grepable `E_*` code and a
//! `retryable` flag. Nothing retries automatically: the flag only tells the
//! host whether resubmitting the same input can reasonably succeed.

/// Grepable error code + retry hint for surfaced errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
