//! Logging trait for Gemini client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every exchange passing through the [`Gemini`](crate::Gemini) client.

use crate::error::Error;
use crate::types::{GenerateContentRequest, GenerateContentResponse, Model};

/// A trait for logging Gemini client operations.
///
/// # Example
///
/// ```rust,ignore
/// use ace_explainer::{ClientLogger, Error, GenerateContentRequest, GenerateContentResponse, Model};
///
/// struct StderrLogger;
///
/// impl ClientLogger for StderrLogger {
///     fn log_request(&self, model: &Model, request: &GenerateContentRequest) {
///         eprintln!("-> {model}: {} contents", request.contents.len());
///     }
///
///     fn log_response(&self, _: &Model, response: &GenerateContentResponse) {
///         eprintln!("<- {:?}", response.usage_metadata);
///     }
///
///     fn log_error(&self, _: &Model, error: &Error) {
///         eprintln!("<- error: {error}");
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, model: &Model, request: &GenerateContentRequest);

    /// Log a successfully parsed response.
    fn log_response(&self, model: &Model, response: &GenerateContentResponse);

    /// Log a failed call.
    fn log_error(&self, model: &Model, error: &Error);
}
