use std::future::Future;

use futures::future::try_join;
use reqwest::Client;

use crate::error::UpdateError;
use crate::scraping::document_source::DocumentSource;
use crate::scraping::extract_version::extract_version;

/// Versions extracted from the overview page and the release page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedVersions {
    pub current: String,
    pub remote: String,
}

/// Fetches the current and the remote version concurrently.
///
/// Each extraction runs in its own task and fills its own result slot. Both are
/// awaited before returning; the first failure is returned as soon as it is seen
/// and the other task is left to be dropped with the runtime.
pub async fn fetch_versions(
    client: &Client,
    current_source: DocumentSource,
    current_selector: &str,
    remote_source: DocumentSource,
    remote_selector: &str,
) -> Result<FetchedVersions, UpdateError> {
    let current_task = spawn_extraction(client.clone(), current_source, current_selector.to_string());
    let remote_task = spawn_extraction(client.clone(), remote_source, remote_selector.to_string());

    let (current, remote) = try_join(current_task, remote_task).await?;

    Ok(FetchedVersions { current, remote })
}

fn spawn_extraction(
    client: Client,
    source: DocumentSource,
    selector: String,
) -> impl Future<Output = Result<String, UpdateError>> {
    let handle = tokio::spawn(async move { extract_version(&client, &source, &selector).await });

    async move { handle.await? }
}
