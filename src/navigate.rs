//! Navigation coordination.
//!
//! One navigation attempt per call: interception is installed strictly before
//! the trigger is issued, and the content wait races the redirect abort so a
//! hijacked page never hangs the pipeline.

use std::sync::Arc;

use crate::abort::{AbortController, AbortSignal};
use crate::browser::{DocumentPage, NetworkQuiescence, ResponseAnalyzer};
use crate::error::{Error, Result};
use crate::network::{InterceptGuard, RequestInterceptor};

/// Selector that marks the primary document content as rendered.
pub const CONTENT_SELECTOR: &str = "#content .document-content";

/// Install interception on `page` and issue one navigation to `target_url`.
///
/// The returned guard owns the interception pump (and the response forwarder
/// when an analyzer is supplied); hold it until the attempt is finished so
/// requests arriving after earlier steps complete are still classified.
pub async fn navigate_to_page<P: DocumentPage>(
    app_origin: &str,
    page: &P,
    target_url: &str,
    security_token: &str,
    analyzer: Option<Arc<dyn ResponseAnalyzer>>,
    wait_for_idle_network: bool,
    abort: AbortController,
) -> Result<InterceptGuard> {
    page.set_request_interception(true)
        .await
        .map_err(Error::NavigationFailed)?;
    let requests = page
        .request_events()
        .await
        .map_err(Error::NavigationFailed)?;

    let interceptor =
        RequestInterceptor::new(app_origin, security_token, wait_for_idle_network, abort);
    let mut guard = InterceptGuard::spawn(interceptor, requests);

    if let Some(analyzer) = analyzer {
        let responses = page
            .response_events()
            .await
            .map_err(Error::NavigationFailed)?;
        guard.watch_responses(responses, analyzer);
    }

    tracing::info!(url = target_url, "Navigating to page");
    page.navigate(target_url)
        .await
        .map_err(Error::NavigationFailed)?;

    Ok(guard)
}

/// Wait until the navigation has settled and the primary content is visible,
/// unless the redirect abort wins the race first.
///
/// Both waiters must complete for success; the first abort to fire cancels
/// the rest and surfaces as [`Error::RedirectBlocked`] with the offending URL.
pub async fn wait_for_content<P: DocumentPage>(
    page: &P,
    wait_for_idle_network: bool,
    signal: AbortSignal,
) -> Result<()> {
    let quiescence = if wait_for_idle_network {
        NetworkQuiescence::FullyIdle
    } else {
        NetworkQuiescence::MostlyIdle
    };
    tracing::info!(strategy = %quiescence, "Waiting for content to load");

    let raced = signal.clone();
    tokio::select! {
        reason = raced.aborted() => {
            return Err(Error::RedirectBlocked { url: reason.url });
        }
        settled = async {
            tokio::try_join!(
                page.wait_for_navigation(quiescence),
                page.wait_for_visible(CONTENT_SELECTOR),
            )
        } => {
            settled.map_err(Error::ContentWaitFailed)?;
        }
    }

    // Both waiters finished, but the signal may have fired in the same poll;
    // an aborted attempt must never be reported as success.
    if let Some(reason) = signal.reason() {
        return Err(Error::RedirectBlocked { url: reason.url });
    }
    Ok(())
}
