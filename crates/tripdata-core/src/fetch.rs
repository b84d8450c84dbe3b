use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct FetchReport {
    pub bytes: u64,
}

/// Download one dataset slice to `destination`.
///
/// Non-2xx responses are failures. No retries and no resumption: the
/// orchestrator re-runs the whole sequence on failure.
pub async fn fetch(url: &str, destination: &Path) -> Result<FetchReport> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let body = response.bytes().await?;
    fs::write(destination, &body)?;

    info!(
        url,
        destination = %destination.display(),
        bytes = body.len(),
        "downloaded source artifact"
    );
    Ok(FetchReport {
        bytes: body.len() as u64,
    })
}
