//! Document generator facade.
//!
//! Owns the one page handle for its lifetime. Two states: until
//! `initialize` succeeds, every other operation fails with
//! [`Error::BrowserNotInitialized`].

use std::sync::Arc;

use crate::browser::{
    DocumentBrowser, DocumentPage, PageMetrics, RequestStatistics, ResponseAnalyzer,
};
use crate::error::{Error, Result};
use crate::pipeline;
use crate::RenderRequest;

/// Renders documents against a single page acquired from the browser
/// collaborator.
///
/// Generation takes `&mut self`, so attempts against one facade are
/// serialized by the borrow checker; the per-attempt interception state and
/// abort scope are never shared between concurrent renders.
pub struct DocumentGenerator<B: DocumentBrowser> {
    browser: B,
    analyzer: Option<Arc<dyn ResponseAnalyzer>>,
    page: Option<B::Page>,
}

impl<B: DocumentBrowser> DocumentGenerator<B> {
    pub fn new(browser: B) -> Self {
        Self {
            browser,
            analyzer: None,
            page: None,
        }
    }

    /// Attach an optional response-level traffic observer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn ResponseAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Acquire the page handle. Call once before generating.
    pub async fn initialize(&mut self) -> Result<()> {
        let page = self
            .browser
            .open_page()
            .await
            .map_err(Error::InitializationFailed)?;
        self.page = Some(page);
        Ok(())
    }

    /// Render `request` into PDF bytes.
    pub async fn generate_document(&mut self, request: &RenderRequest) -> Result<Vec<u8>> {
        let page = self.page.as_ref().ok_or(Error::BrowserNotInitialized)?;
        tracing::info!(url = %request.page_url, "Generating document");
        pipeline::generate_document(page, request, self.analyzer.clone()).await
    }

    /// Snapshot the page's performance metrics.
    pub async fn page_metrics(&self) -> Result<PageMetrics> {
        let page = self.page.as_ref().ok_or(Error::BrowserNotInitialized)?;
        page.metrics().await.map_err(Error::MetricsFailed)
    }

    /// Aggregate traffic statistics, when an observer is configured.
    ///
    /// `Ok(None)` is not a failure: it means no observer was attached, or the
    /// observer keeps no aggregates.
    pub fn request_statistics(&self) -> Result<Option<RequestStatistics>> {
        if self.page.is_none() {
            return Err(Error::BrowserNotInitialized);
        }
        Ok(self.analyzer.as_ref().and_then(|a| a.statistics()))
    }
}
