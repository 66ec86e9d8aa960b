//! Network Request Interception
//!
//! Classifies and resolves every request the page issues during one
//! navigation attempt: live-reload suppression, redirect containment,
//! security-header injection, plain continue. A request is resolved at most
//! once; every rule checks the resolution state before acting.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::abort::{AbortController, RedirectError};
use crate::browser::{
    AbortCode, DriverResult, InterceptedRequest, ResponseAnalyzer, ResponseSummary,
};

/// Header carrying the per-session security token on the trusted navigation.
pub const SECURITY_TOKEN_HEADER: &str = "X-Security-Token";

/// Development live-reload script, dropped when the caller insists on a fully
/// idle network (its open socket would keep the network busy forever).
const LIVE_RELOAD_MARKER: &str = "livereload.js";

/// Per-navigation interception state machine.
///
/// One interceptor exists per navigation attempt and owns the write side of
/// that attempt's [`AbortController`]. The header flag starts pending and
/// flips the moment the token is attached, so only one principal navigation
/// per attempt is trusted with it.
pub struct RequestInterceptor {
    app_origin: String,
    security_token: String,
    drop_live_reload: bool,
    navigation_header_pending: bool,
    abort: AbortController,
}

impl RequestInterceptor {
    pub fn new(
        app_origin: impl Into<String>,
        security_token: impl Into<String>,
        drop_live_reload: bool,
        abort: AbortController,
    ) -> Self {
        Self {
            app_origin: app_origin.into(),
            security_token: security_token.into(),
            drop_live_reload,
            navigation_header_pending: true,
            abort,
        }
    }

    /// Classify and resolve one request.
    ///
    /// Rules run in a fixed order; transport failures are returned to the
    /// pump for logging and never stop classification of later requests.
    pub async fn dispatch<R: InterceptedRequest>(&mut self, request: &mut R) -> DriverResult<()> {
        if self.drop_live_reload
            && request.url().contains(LIVE_RELOAD_MARKER)
            && !request.is_resolution_handled()
        {
            tracing::debug!(url = request.url(), "Dropping live-reload request");
            request.abort(AbortCode::Failed).await?;
        }

        self.block_external_navigation(request).await?;

        if self.navigation_header_pending
            && request.is_navigation_request()
            && !request.is_resolution_handled()
        {
            let mut headers = request.headers().clone();
            headers.insert(
                SECURITY_TOKEN_HEADER.to_string(),
                self.security_token.clone(),
            );
            self.navigation_header_pending = false;
            return request.continue_with_headers(headers).await;
        }

        if request.is_resolution_handled() {
            return Ok(());
        }
        request.continue_unmodified().await
    }

    /// Redirect containment: a top-level navigation leaving the application
    /// origin in the main frame is aborted and the attempt is cancelled.
    ///
    /// Fires for every violating request. The cancellation reason is
    /// single-assignment, so only the first offending URL is recorded; later
    /// violations are still aborted at the network level.
    async fn block_external_navigation<R: InterceptedRequest>(
        &self,
        request: &mut R,
    ) -> DriverResult<()> {
        if request.is_resolution_handled() {
            return Ok(());
        }
        if request.is_navigation_request()
            && request.is_main_frame()
            && !request.url().starts_with(&self.app_origin)
        {
            tracing::warn!(
                kind = request.resource_kind(),
                url = request.url(),
                "Intercepted external redirect, aborting request"
            );
            let url = request.url().to_string();
            let aborted = request.abort(AbortCode::BlockedByClient).await;
            self.abort.abort(RedirectError::new(url));
            aborted?;
        }
        Ok(())
    }
}

/// Owns the background tasks of one interception session.
///
/// The pump drains the page's request stream through the interceptor; an
/// optional forwarder feeds response summaries to the traffic observer.
/// Dropping the guard stops both, bounding the navigation attempt.
pub struct InterceptGuard {
    tasks: Vec<JoinHandle<()>>,
}

impl InterceptGuard {
    /// Spawn the request pump. Requests that fail to resolve are logged and
    /// skipped; the pump itself only exits when the stream closes.
    pub(crate) fn spawn<R>(
        mut interceptor: RequestInterceptor,
        mut requests: mpsc::Receiver<R>,
    ) -> Self
    where
        R: InterceptedRequest + 'static,
    {
        let pump = tokio::spawn(async move {
            while let Some(mut request) = requests.recv().await {
                let url = request.url().to_string();
                if let Err(error) = interceptor.dispatch(&mut request).await {
                    tracing::warn!(%url, error = %error, "Failed to resolve intercepted request");
                }
            }
        });
        Self { tasks: vec![pump] }
    }

    /// Spawn the fire-and-forget response forwarder.
    pub(crate) fn watch_responses(
        &mut self,
        mut responses: mpsc::Receiver<ResponseSummary>,
        analyzer: Arc<dyn ResponseAnalyzer>,
    ) {
        let forwarder = tokio::spawn(async move {
            while let Some(response) = responses.recv().await {
                analyzer.analyze_response(&response);
            }
        });
        self.tasks.push(forwarder);
    }
}

impl Drop for InterceptGuard {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
