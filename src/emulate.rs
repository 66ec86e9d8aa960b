//! Presentation emulation applied around navigation.
//!
//! Three independent steps: screen-media emulation (opt-in, before
//! navigation), timezone emulation (before navigation, GMT default), and the
//! body marker injection (after content is ready).

use crate::browser::{DocumentPage, MediaType};
use crate::error::{Error, Result};

/// Class added to the document body once content is ready. Downstream
/// styling keys off it to detect generation mode.
pub const GENERATION_MARKER_CLASS: &str = "document-generation-body-injected";

/// Timezone applied when the caller does not supply one.
pub const DEFAULT_TIMEZONE: &str = "GMT";

/// Switch the page to screen-media rendering.
pub async fn emulate_screen_media<P: DocumentPage>(page: &P) -> Result<()> {
    tracing::info!("Emulating screen media");
    page.emulate_media_type(MediaType::Screen)
        .await
        .map_err(Error::MediaEmulationFailed)
}

/// Apply the caller-supplied timezone, defaulting to GMT when unset.
pub async fn emulate_timezone<P: DocumentPage>(page: &P, timezone: Option<&str>) -> Result<()> {
    let timezone = timezone.unwrap_or(DEFAULT_TIMEZONE);
    tracing::info!(timezone, "Emulating timezone");
    page.emulate_timezone(timezone)
        .await
        .map_err(|source| Error::TimezoneEmulationFailed {
            timezone: timezone.to_string(),
            source,
        })
}

/// Add the generation marker class to the body.
///
/// A page without a body element is a no-op, not a failure.
pub async fn inject_body_marker<P: DocumentPage>(page: &P) -> Result<()> {
    let injected = page
        .add_body_class(GENERATION_MARKER_CLASS)
        .await
        .map_err(Error::MarkerInjectionFailed)?;

    if injected {
        tracing::debug!(class = GENERATION_MARKER_CLASS, "Injected class into body element");
    } else {
        tracing::debug!("Body element not found, skipping marker injection");
    }
    Ok(())
}
