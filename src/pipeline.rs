//! The generation pipeline.
//!
//! Fixed sequence: emulation, navigation, content wait, marker injection,
//! parameter inspection, PDF export. Each step either succeeds or aborts the
//! whole attempt with its own error; nothing is retried and no partial
//! output is ever returned.

use std::sync::Arc;

use crate::abort::AbortController;
use crate::browser::{DocumentPage, PdfOptions, ResponseAnalyzer};
use crate::emulate;
use crate::error::{Error, Result};
use crate::inspect::{self, RenderParameters};
use crate::navigate;
use crate::RenderRequest;

const HEADER_TEMPLATE: &str = "<div></div>";
const FOOTER_TEMPLATE: &str = "<div style='width:50%'>&nbsp;</div><div style='padding-right: 5mm; width:50%; text-align:right; font-size:8px;'><span class='pageNumber'></span> / <span class='totalPages'></span></div>";

/// Header/footer chrome, derived deterministically from the page-number flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFooterOptions {
    pub display_header_footer: bool,
    pub header_template: String,
    pub footer_template: String,
    pub margin_bottom: String,
}

impl HeaderFooterOptions {
    /// Page numbers on means footer chrome plus a 10mm bottom margin; off
    /// means no chrome and no margin.
    pub fn for_page_numbers(enabled: bool) -> Self {
        Self {
            display_header_footer: enabled,
            header_template: HEADER_TEMPLATE.to_string(),
            footer_template: FOOTER_TEMPLATE.to_string(),
            margin_bottom: if enabled { "10mm" } else { "0" }.to_string(),
        }
    }
}

/// Run one full generation attempt against `page` and return the PDF bytes.
pub async fn generate_document<P: DocumentPage>(
    page: &P,
    request: &RenderRequest,
    analyzer: Option<Arc<dyn ResponseAnalyzer>>,
) -> Result<Vec<u8>> {
    if request.use_screen_media {
        emulate::emulate_screen_media(page).await?;
    }
    emulate::emulate_timezone(page, request.timezone.as_deref()).await?;

    // Fresh cancellation scope per attempt: the interceptor owns the write
    // side, the content wait races the read side.
    let abort = AbortController::new();
    let signal = abort.signal();

    let _guard = navigate::navigate_to_page(
        &request.app_origin,
        page,
        &request.page_url,
        &request.security_token,
        analyzer,
        request.wait_for_idle_network,
        abort,
    )
    .await?;

    navigate::wait_for_content(page, request.wait_for_idle_network, signal).await?;

    emulate::inject_body_marker(page).await?;

    let parameters = inspect::inspect_render_parameters(page).await;
    let options = pdf_options(&parameters);

    tracing::info!(
        format = %parameters.page_size,
        landscape = parameters.landscape,
        page_numbers = parameters.page_numbers_enabled,
        "Exporting to PDF"
    );
    page.export_pdf(&options)
        .await
        .map_err(Error::PdfExportFailed)
}

fn pdf_options(parameters: &RenderParameters) -> PdfOptions {
    let chrome = HeaderFooterOptions::for_page_numbers(parameters.page_numbers_enabled);
    PdfOptions {
        landscape: parameters.landscape,
        format: parameters.page_size,
        prefer_css_page_size: true,
        print_background: true,
        display_header_footer: chrome.display_header_footer,
        header_template: chrome.header_template,
        footer_template: chrome.footer_template,
        margin_bottom: chrome.margin_bottom,
    }
}
