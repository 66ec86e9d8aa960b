//! # Pressroom
//!
//! Headless-browser document rendering with redirect containment.
//!
//! Pressroom drives a single browser page through one tightly controlled
//! generation attempt: every network request is intercepted and classified
//! before it proceeds, off-origin navigations abort the attempt, the
//! content-ready wait races the abort signal, presentation emulation and
//! DOM-derived render parameters shape the export, and the result is a PDF
//! with header/footer chrome consistent with those parameters.
//!
//! The browser engine itself is a collaborator injected behind the
//! [`DocumentBrowser`]/[`DocumentPage`] capability traits; pressroom is the
//! coordination layer.
//!
//! ## Features
//!
//! - **Redirect containment** - every top-level navigation leaving the
//!   application origin is aborted at the network level and cancels the attempt
//! - **Single trusted navigation** - exactly one navigation request per attempt
//!   carries the security-token header, always the first one observed
//! - **Raced content wait** - navigation-settled and content-visible must both
//!   complete, unless the abort signal wins first
//! - **DOM-driven export** - orientation, paper size and page-number chrome are
//!   read from the rendered document and validated against an allow-list
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pressroom::{DocumentBrowser, DocumentGenerator, RenderRequest};
//!
//! async fn render<B: DocumentBrowser>(browser: B) -> pressroom::Result<Vec<u8>> {
//!     let mut generator = DocumentGenerator::new(browser);
//!     generator.initialize().await?;
//!
//!     let request = RenderRequest {
//!         app_origin: "https://app.example.com".into(),
//!         page_url: "https://app.example.com/document/42".into(),
//!         security_token: "generation-token".into(),
//!         ..Default::default()
//!     };
//!     generator.generate_document(&request).await
//! }
//! ```

pub mod abort;
pub mod browser;
pub mod emulate;
pub mod error;
pub mod generator;
pub mod inspect;
pub mod navigate;
pub mod network;
pub mod pipeline;

// Re-exports
pub use abort::{AbortController, AbortSignal, RedirectError};
pub use browser::{
    AbortCode, DocumentBrowser, DocumentPage, DriverResult, InterceptedRequest, MediaType,
    NetworkQuiescence, PageMetrics, PdfOptions, RequestStatistics, ResponseAnalyzer,
    ResponseSummary,
};
pub use emulate::{DEFAULT_TIMEZONE, GENERATION_MARKER_CLASS};
pub use error::{DriverError, Error, Result};
pub use generator::DocumentGenerator;
pub use inspect::{PageSize, RenderParameters};
pub use navigate::CONTENT_SELECTOR;
pub use network::{RequestInterceptor, SECURITY_TOKEN_HEADER};
pub use pipeline::HeaderFooterOptions;

/// One document-generation request.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    /// Origin the page must stay within; any top-level navigation leaving it
    /// is treated as a hostile redirect and aborts the attempt.
    pub app_origin: String,
    /// URL of the page that renders the document.
    pub page_url: String,
    /// Token attached to the trusted top-level navigation so the application
    /// can verify the request came from this generation session.
    pub security_token: String,
    /// Timezone to emulate before navigation; GMT when unset.
    pub timezone: Option<String>,
    /// Render with screen media instead of print media.
    pub use_screen_media: bool,
    /// Require a fully idle network before content counts as loaded.
    pub wait_for_idle_network: bool,
}

impl RenderRequest {
    /// A request for `page_url` contained to `app_origin` with defaults for
    /// everything else.
    pub fn new(
        app_origin: impl Into<String>,
        page_url: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            app_origin: app_origin.into(),
            page_url: page_url.into(),
            security_token: security_token.into(),
            timezone: None,
            use_screen_media: false,
            wait_for_idle_network: false,
        }
    }
}
