//! Result and error types for Entrar.

use thiserror::Error;

/// Result type for Entrar operations
pub type EntrarResult<T> = Result<T, EntrarError>;

/// Errors that can occur in Entrar
///
/// Backend failures (navigation, lookup, input) map one-to-one into these
/// variants and propagate to the test harness. There are no retries and no
/// fallback locators: the first failing step aborts its test case.
#[derive(Debug, Error)]
pub enum EntrarError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// Page error (script evaluation or protocol failure)
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// No element matched a locator
    #[error("No element matched {locator}")]
    ElementNotFound {
        /// Display form of the locator that found nothing
        locator: String,
    },

    /// Input simulation error
    #[error("Input simulation failed: {message}")]
    InputError {
        /// Error message
        message: String,
    },

    /// Reading an element's visible text failed
    #[error("Failed to read element text: {message}")]
    TextReadError {
        /// Error message
        message: String,
    },

    /// Invalid state error (operation called in wrong state)
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Fixture error (setup/teardown failed)
    #[error("Fixture error: {message}")]
    FixtureError {
        /// Error message
        message: String,
    },
}
