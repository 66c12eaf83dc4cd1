use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::UpdateError;
use crate::scraping::document_source::DocumentSource;

/// Version line in the footer of the overview page.
pub const OVERVIEW_SELECTOR: &str = r#"p[class="small text-center"]"#;

/// Version banner on the release information page.
pub const RELEASE_SELECTOR: &str = r#"span[class="releaseInformation"]"#;

/// Loads the document behind `source` and extracts the text of the first element
/// matching `selector`.
pub async fn extract_version(
    client: &Client,
    source: &DocumentSource,
    selector: &str,
) -> Result<String, UpdateError> {
    let html_content = source.fetch(client).await?;
    extract_version_from_html(&html_content, selector)
}

/// Returns the trimmed text of the first element matching `selector`, or an empty
/// string if nothing matches.
pub fn extract_version_from_html(html_content: &str, selector: &str) -> Result<String, UpdateError> {
    let document = Html::parse_document(html_content);
    let selector = Selector::parse(selector).map_err(|e| UpdateError::Parse {
        selector: selector.to_string(),
        message: e.to_string(),
    })?;

    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<Vec<_>>().join("").trim().to_string())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mockito::Server;
    use tempfile::TempDir;

    use super::*;

    const OVERVIEW_PAGE: &str = r#"
<html>
  <body>
    <p class="lead">Welcome</p>
    <p class="small text-center">
        Version 1.0.0
    </p>
    <p class="small text-center">Version 0.9.0</p>
  </body>
</html>"#;

    const RELEASE_PAGE: &str = r#"
<html>
  <body>
    <div><span class="releaseInformation"> v2 <b>1.1.0</b> </span></div>
  </body>
</html>"#;

    #[test]
    fn first_matching_element_is_trimmed() {
        let version = extract_version_from_html(OVERVIEW_PAGE, OVERVIEW_SELECTOR).unwrap();

        assert_eq!(version, "Version 1.0.0");
    }

    #[test]
    fn text_of_nested_elements_is_concatenated() {
        let version = extract_version_from_html(RELEASE_PAGE, RELEASE_SELECTOR).unwrap();

        assert_eq!(version, "v2 1.1.0");
    }

    #[test]
    fn class_must_match_exactly() {
        let html = r#"<p class="small text-center muted">1.0.0</p><p class="small">2.0.0</p>"#;

        let version = extract_version_from_html(html, OVERVIEW_SELECTOR).unwrap();

        assert_eq!(version, "");
    }

    #[test]
    fn no_match_yields_empty_string() {
        let version = extract_version_from_html("<html><body></body></html>", RELEASE_SELECTOR).unwrap();

        assert_eq!(version, "");
    }

    #[test]
    fn invalid_selector_is_a_parse_error() {
        let result = extract_version_from_html(OVERVIEW_PAGE, "p[class=");

        assert!(matches!(result, Err(UpdateError::Parse { .. })));
    }

    #[tokio::test]
    async fn extracts_from_remote_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/releases")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(RELEASE_PAGE)
            .create_async()
            .await;

        let source = DocumentSource::Remote(format!("{}/releases", server.url()));
        let version = extract_version(&Client::new(), &source, RELEASE_SELECTOR)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(version, "v2 1.1.0");
    }

    #[tokio::test]
    async fn extracts_from_local_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, OVERVIEW_PAGE).unwrap();

        let version = extract_version(&Client::new(), &DocumentSource::Local(path), OVERVIEW_SELECTOR)
            .await
            .unwrap();

        assert_eq!(version, "Version 1.0.0");
    }
}
