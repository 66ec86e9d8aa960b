//! Browser collaborator contract.
//!
//! The pipeline never talks to a concrete engine. It is handed capabilities:
//! a browser that opens pages, pages that navigate, intercept requests,
//! emulate presentation and export PDFs, and requests that are resolved
//! exactly once. Implementations adapt whatever transport they use (CDP,
//! Playwright, a test double) to these traits.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::DriverError;
use crate::inspect::PageSize;

/// Result type at the collaborator boundary; causes stay opaque until a
/// pipeline step wraps them into a named [`crate::Error`] variant.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Media type applied by presentation emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Screen,
    Print,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Screen => "screen",
            MediaType::Print => "print",
        }
    }
}

/// Network-quiescence strategy used to decide that a navigation has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkQuiescence {
    /// No in-flight requests at all for the stability window.
    FullyIdle,
    /// A small number of long-lived requests may remain in flight.
    MostlyIdle,
}

impl std::fmt::Display for NetworkQuiescence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NetworkQuiescence::FullyIdle => "fully-idle",
            NetworkQuiescence::MostlyIdle => "mostly-idle",
        })
    }
}

/// Network error code handed to the engine when aborting a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortCode {
    /// Generic failure.
    Failed,
    /// The client chose to block the request.
    BlockedByClient,
}

impl AbortCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbortCode::Failed => "failed",
            AbortCode::BlockedByClient => "blockedbyclient",
        }
    }
}

/// One in-flight network request, paused until it is classified.
///
/// A request must be resolved exactly once: continued (optionally with a
/// modified header set) or aborted. Resolving twice is an error in the
/// transport, so the resolution state is queryable and every classification
/// rule checks it before acting.
#[async_trait]
pub trait InterceptedRequest: Send {
    fn url(&self) -> &str;

    /// Resource kind as reported by the engine ("document", "script", ...).
    fn resource_kind(&self) -> &str;

    /// True when this request would replace a frame's primary document.
    fn is_navigation_request(&self) -> bool;

    /// True when the request originates from the page's root browsing context.
    fn is_main_frame(&self) -> bool;

    fn headers(&self) -> &HashMap<String, String>;

    /// Whether some rule already resolved this request.
    fn is_resolution_handled(&self) -> bool;

    async fn continue_unmodified(&mut self) -> DriverResult<()>;

    async fn continue_with_headers(
        &mut self,
        headers: HashMap<String, String>,
    ) -> DriverResult<()>;

    async fn abort(&mut self, code: AbortCode) -> DriverResult<()>;
}

/// Response metadata forwarded to the optional traffic observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSummary {
    pub url: String,
    pub status: i32,
    pub resource_kind: Option<String>,
    pub mime_type: Option<String>,
    pub encoded_data_length: Option<i64>,
}

/// Aggregate traffic numbers reported by a [`ResponseAnalyzer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStatistics {
    pub response_count: u64,
    pub error_count: u64,
    pub encoded_bytes: u64,
}

/// Optional response-level traffic observer.
///
/// Forwarding is fire-and-forget: the pipeline never fails or stalls because
/// an observer misbehaved.
pub trait ResponseAnalyzer: Send + Sync {
    fn analyze_response(&self, response: &ResponseSummary);

    /// Aggregate numbers collected so far, if the observer keeps any.
    fn statistics(&self) -> Option<RequestStatistics>;
}

/// Snapshot of the page's performance counters.
///
/// Field names serialize in the engine's own casing so the snapshot can be
/// passed through to service callers unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageMetrics {
    pub documents: u64,
    pub frames: u64,
    #[serde(rename = "JSEventListeners")]
    pub js_event_listeners: u64,
    pub nodes: u64,
    pub layout_count: u64,
    pub script_duration: f64,
    pub task_duration: f64,
    #[serde(rename = "JSHeapUsedSize")]
    pub js_heap_used_size: u64,
    #[serde(rename = "JSHeapTotalSize")]
    pub js_heap_total_size: u64,
}

/// Parameters for the PDF export capability.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub landscape: bool,
    pub format: PageSize,
    /// Let a CSS `@page` size win over `format` when the document declares one.
    pub prefer_css_page_size: bool,
    pub print_background: bool,
    pub display_header_footer: bool,
    pub header_template: String,
    pub footer_template: String,
    /// Bottom margin in CSS units (`"10mm"` or `"0"`).
    pub margin_bottom: String,
}

/// A single browser tab, exclusively owned by one generator for its lifetime.
///
/// Ordering contract: [`DocumentPage::request_events`] must be taken and its
/// consumer running before [`DocumentPage::navigate`] is issued, so the very
/// first navigation request is observed by the interceptor.
#[async_trait]
pub trait DocumentPage: Send + Sync {
    type Request: InterceptedRequest + 'static;

    /// Turn request interception on or off for this page.
    async fn set_request_interception(&self, enabled: bool) -> DriverResult<()>;

    /// Stream of paused requests for the current interception session.
    async fn request_events(&self) -> DriverResult<mpsc::Receiver<Self::Request>>;

    /// Stream of response summaries for the optional traffic observer.
    async fn response_events(&self) -> DriverResult<mpsc::Receiver<ResponseSummary>>;

    /// Issue a navigation to `url`.
    async fn navigate(&self, url: &str) -> DriverResult<()>;

    /// Resolve once the current navigation has settled under `quiescence`.
    async fn wait_for_navigation(&self, quiescence: NetworkQuiescence) -> DriverResult<()>;

    /// Resolve once an element matching `selector` is rendered and visible.
    async fn wait_for_visible(&self, selector: &str) -> DriverResult<()>;

    /// Whether any element currently matches `selector`.
    async fn element_exists(&self, selector: &str) -> DriverResult<bool>;

    /// Class list of the first element matching `selector`, `None` when there
    /// is no match.
    async fn class_list(&self, selector: &str) -> DriverResult<Option<Vec<String>>>;

    /// Add `class` to the document body. Returns `false` when the body cannot
    /// be located.
    async fn add_body_class(&self, class: &str) -> DriverResult<bool>;

    async fn emulate_media_type(&self, media: MediaType) -> DriverResult<()>;

    async fn emulate_timezone(&self, timezone: &str) -> DriverResult<()>;

    /// Render the current document to PDF.
    async fn export_pdf(&self, options: &PdfOptions) -> DriverResult<Vec<u8>>;

    /// Snapshot the page's performance metrics.
    async fn metrics(&self) -> DriverResult<PageMetrics>;
}

/// The browser process collaborator: hands out page handles.
#[async_trait]
pub trait DocumentBrowser: Send + Sync {
    type Page: DocumentPage;

    async fn open_page(&self) -> DriverResult<Self::Page>;
}
