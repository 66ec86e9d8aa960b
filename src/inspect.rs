//! Render-parameter inspection.
//!
//! After content is ready the rendered DOM carries three independent hints:
//! an orientation marker, a `page-size-<value>` class token, and a
//! page-numbers marker. Each read is resilient to absence and falls back to
//! its default.

use serde::{Deserialize, Serialize};

use crate::browser::DocumentPage;

const LANDSCAPE_SELECTOR: &str = ".page-orientation-landscape";
const PAGE_SIZE_SELECTOR: &str = "[class*='page-size']";
const PAGE_SIZE_PREFIX: &str = "page-size-";
const PAGE_NUMBERS_SELECTOR: &str = ".enable-page-numbers";

/// Paper sizes accepted by the PDF exporter.
///
/// Anything read from the DOM that is not in this list is coerced to
/// [`PageSize::A4`] with a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    Letter,
    Legal,
    Tabloid,
    A0,
    A1,
    A2,
    A3,
    #[default]
    A4,
    A5,
    A6,
}

impl PageSize {
    /// Parse a DOM-supplied token against the allow-list.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "letter" => Some(Self::Letter),
            "legal" => Some(Self::Legal),
            "tabloid" => Some(Self::Tabloid),
            "a0" => Some(Self::A0),
            "a1" => Some(Self::A1),
            "a2" => Some(Self::A2),
            "a3" => Some(Self::A3),
            "a4" => Some(Self::A4),
            "a5" => Some(Self::A5),
            "a6" => Some(Self::A6),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Legal => "legal",
            Self::Tabloid => "tabloid",
            Self::A0 => "a0",
            Self::A1 => "a1",
            Self::A2 => "a2",
            Self::A3 => "a3",
            Self::A4 => "a4",
            Self::A5 => "a5",
            Self::A6 => "a6",
        }
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hints derived from the live DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParameters {
    pub page_size: PageSize,
    pub landscape: bool,
    pub page_numbers_enabled: bool,
}

/// Read orientation, paper size and page-number visibility from the page.
///
/// The three reads touch disjoint DOM state; order is irrelevant.
pub async fn inspect_render_parameters<P: DocumentPage>(page: &P) -> RenderParameters {
    let landscape = marker_present(page, LANDSCAPE_SELECTOR).await;
    let page_size = determine_page_size(page).await;
    let page_numbers_enabled = marker_present(page, PAGE_NUMBERS_SELECTOR).await;

    tracing::debug!(
        %page_size,
        landscape,
        page_numbers_enabled,
        "Inspected render parameters"
    );
    RenderParameters {
        page_size,
        landscape,
        page_numbers_enabled,
    }
}

async fn marker_present<P: DocumentPage>(page: &P, selector: &str) -> bool {
    match page.element_exists(selector).await {
        Ok(present) => present,
        Err(error) => {
            tracing::warn!(selector, error = %error, "Marker lookup failed, treating as absent");
            false
        }
    }
}

async fn determine_page_size<P: DocumentPage>(page: &P) -> PageSize {
    let classes = match page.class_list(PAGE_SIZE_SELECTOR).await {
        Ok(Some(classes)) => classes,
        Ok(None) => {
            tracing::debug!("No page-size element found, using default");
            return PageSize::A4;
        }
        Err(error) => {
            tracing::warn!(error = %error, "Page-size lookup failed, using default");
            return PageSize::A4;
        }
    };
    page_size_from_classes(&classes)
}

/// Extract and validate the `page-size-<value>` token from a class list.
fn page_size_from_classes(classes: &[String]) -> PageSize {
    let Some(token) = classes
        .iter()
        .find_map(|class| class.strip_prefix(PAGE_SIZE_PREFIX))
    else {
        tracing::debug!("No page-size class token found, using default");
        return PageSize::A4;
    };

    match PageSize::parse(token) {
        Some(size) => size,
        None => {
            tracing::warn!(token, "Invalid page size, setting page size to A4");
            PageSize::A4
        }
    }
}
