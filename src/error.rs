//! Error types for pressroom

use thiserror::Error;

/// Opaque failure surfaced by the browser collaborator.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for pressroom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pressroom
///
/// Every pipeline step wraps the underlying collaborator failure into its own
/// variant with the cause attached; no step is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// An operation was attempted before `initialize` acquired the page handle
    #[error("Browser not initialized")]
    BrowserNotInitialized,

    /// Acquiring the page handle from the browser collaborator failed
    #[error("Failed to initialize browser page: {0}")]
    InitializationFailed(#[source] DriverError),

    /// The navigation trigger itself failed (network error, timeout)
    #[error("Failed to navigate to page: {0}")]
    NavigationFailed(#[source] DriverError),

    /// An off-origin top-level navigation was detected and aborted
    #[error("Failed to generate document due to an external redirect to: \"{url}\"")]
    RedirectBlocked { url: String },

    /// Waiting for the rendered content failed for a reason other than a redirect
    #[error("Failed to wait for content: {0}")]
    ContentWaitFailed(#[source] DriverError),

    /// Switching the page to screen-media rendering failed
    #[error("Failed to emulate screen media: {0}")]
    MediaEmulationFailed(#[source] DriverError),

    /// Applying the timezone override failed
    #[error("Failed to emulate timezone \"{timezone}\": {source}")]
    TimezoneEmulationFailed {
        timezone: String,
        #[source]
        source: DriverError,
    },

    /// Adding the generation marker class to the body failed.
    /// A missing body element is a no-op, not this error.
    #[error("Failed to inject class to body element: {0}")]
    MarkerInjectionFailed(#[source] DriverError),

    /// The PDF export call failed
    #[error("Failed to export to PDF: {0}")]
    PdfExportFailed(#[source] DriverError),

    /// Reading the page performance metrics failed
    #[error("Failed to read page metrics: {0}")]
    MetricsFailed(#[source] DriverError),
}
